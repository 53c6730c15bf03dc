//! Bootstrap padding regression test
//!
//!   Test 0: a fully populated recognizer is returned unchanged
//!   Test 1: a thin digit class is padded from the bootstrap digits
//!   Test 2: padding a charset without bootstrap digits fails
//!   Test 3: padding from a caller-supplied template set

use glyphtrain_core::{Pix, Pixa};
use glyphtrain_recog::RecogError;
use glyphtrain_recog::recog::{
    CharsetType, Recog, RecogParams, create_from_pixa_with_params, make_boot_digit_templates,
    pad_digit_training_set, pad_training_set_with,
};
use glyphtrain_test::{RegParams, solid_glyph};

/// Bootstrap digits with `per_digit` samples each, except `short_count`
/// samples for `short`
fn digit_training_set(per_digit: usize, short: &str, short_count: usize) -> Pixa {
    let boot = make_boot_digit_templates().unwrap();
    let mut pixa = Pixa::new();
    for digit in CharsetType::ArabicNumerals.characters() {
        let label = digit.to_string();
        let n = if label == short { short_count } else { per_digit };
        boot.iter()
            .filter(|p| p.text() == Some(label.as_str()))
            .take(n)
            .for_each(|p| pixa.push(p.clone()));
    }
    pixa
}

fn digit_recog(pixa: &Pixa, min_nopad: usize) -> Recog {
    create_from_pixa_with_params(
        pixa,
        RecogParams {
            charset_type: CharsetType::ArabicNumerals,
            min_nopad,
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn pad_reg_no_op() {
    let mut rp = RegParams::new("pad_noop");
    let recog = digit_recog(&digit_training_set(5, "", 0), 5);
    rp.compare_values(1.0, recog.padding_needed().is_none() as u8 as f64, 0.0);

    let counts = recog.sample_counts();
    let padded = pad_digit_training_set(recog, 40, 0).unwrap();
    // no rebuild, so the requested height is not applied
    rp.compare_values(0.0, padded.params.scale_h as f64, 0.0);
    rp.compare_values(50.0, padded.num_samples() as f64, 0.0);
    rp.compare_values(1.0, (padded.sample_counts() == counts) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pad no-op failed");
}

#[test]
fn pad_reg_digit_five() {
    let mut rp = RegParams::new("pad_digit_five");
    let recog = digit_recog(&digit_training_set(6, "5", 3), 5);
    let labels = recog.padding_needed().unwrap_or_default();
    rp.compare_strings("5", &labels.join(","));

    let five_before: Vec<Pix> = recog
        .class(recog.class_index("5").unwrap())
        .unwrap()
        .unscaled()
        .pix()
        .to_vec();
    let three_before: Vec<Pix> = recog
        .class(recog.class_index("3").unwrap())
        .unwrap()
        .unscaled()
        .pix()
        .to_vec();

    let padded = pad_digit_training_set(recog, 30, 0).unwrap();
    eprintln!("  {padded}");
    rp.compare_values(1.0, padded.is_train_done() as u8 as f64, 0.0);
    rp.compare_values(30.0, padded.params.scale_h as f64, 0.0);
    rp.compare_values(5.0, padded.params.min_nopad as f64, 0.0);
    rp.compare_values(10.0, padded.set_size() as f64, 0.0);
    rp.compare_values(1.0, padded.padding_needed().is_none() as u8 as f64, 0.0);

    let five = padded.class(padded.class_index("5").unwrap()).unwrap();
    rp.compare_values(15.0, five.unscaled().len() as f64, 0.0);
    // the original samples come first and are unchanged
    for (i, pix) in five_before.iter().enumerate() {
        rp.compare_pix(pix, &five.unscaled().pix()[i]);
    }

    let three = padded.class(padded.class_index("3").unwrap()).unwrap();
    rp.compare_values(6.0, three.unscaled().len() as f64, 0.0);
    for (before, after) in three_before.iter().zip(three.unscaled().pix()) {
        rp.compare_pix(before, after);
    }
    rp.compare_values(
        30.0,
        three.average().map_or(0, |a| a.pix.height()) as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pad digit five failed");
}

#[test]
fn pad_reg_unsupported_charset() {
    let mut rp = RegParams::new("pad_unsupported");
    let pixa: Pixa = vec![solid_glyph(4, 10, "A").unwrap()].into_iter().collect();
    let recog = create_from_pixa_with_params(
        &pixa,
        RecogParams {
            charset_type: CharsetType::UcAlpha,
            ..Default::default()
        },
    )
    .unwrap();
    let res = pad_digit_training_set(recog, 0, 0);
    rp.compare_values(
        1.0,
        matches!(res, Err(RecogError::UnsupportedCharset(_))) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pad unsupported charset failed");
}

#[test]
fn pad_reg_custom_boot_set() {
    let mut rp = RegParams::new("pad_custom");
    let pixa: Pixa = vec![
        solid_glyph(4, 10, "a").unwrap(),
        solid_glyph(4, 10, "b").unwrap(),
        solid_glyph(4, 10, "b").unwrap(),
        solid_glyph(4, 10, "b").unwrap(),
    ]
    .into_iter()
    .collect();
    let recog = create_from_pixa_with_params(&pixa, RecogParams::default()).unwrap();
    let boot: Pixa = ["a", "a", "b", "c"]
        .iter()
        .map(|l| solid_glyph(5, 12, l).unwrap())
        .collect();

    let padded = pad_training_set_with(recog, &boot, 0, 0).unwrap();
    let counts: Vec<String> = padded.sample_counts().iter().map(usize::to_string).collect();
    rp.compare_strings("a b", &padded.class_labels().join(" "));
    rp.compare_strings("3 3", &counts.join(" "));

    assert!(rp.cleanup(), "pad custom boot set failed");
}
