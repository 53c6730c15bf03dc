//! Outlier removal regression test
//!
//!   Test 0: cutoff for the scores [0.9, 0.8, 0.3, 0.1]
//!   Test 1: at least ceil(fraction * n) scores pass the cutoff
//!   Test 2: the same floor holds for a real class, and a class whose
//!           scores all reach the minimum keeps every sample
//!   Test 3: an odd sample is removed from a class of near copies

use glyphtrain_core::{Pix, Pixa};
use glyphtrain_recog::recog::{OutlierOptions, remove_outliers, retention_cutoff};
use glyphtrain_test::{RegParams, glyph, solid_glyph};

#[test]
fn outlier_reg_cutoff() {
    let mut rp = RegParams::new("outlier_cutoff");

    let scores = [0.9, 0.8, 0.3, 0.1];
    let cutoff = retention_cutoff(&scores, 0.75, 0.5).unwrap();
    rp.compare_values(0.3, cutoff as f64, 1e-6);
    let kept = scores.iter().filter(|&&s| s >= cutoff).count();
    rp.compare_values(3.0, kept as f64, 0.0);

    // with high scores the fixed minimum decides
    let cutoff = retention_cutoff(&[0.99, 0.97, 0.95, 0.5], 0.75, 0.5).unwrap();
    rp.compare_values(0.75, cutoff as f64, 1e-6);

    assert!(rp.cleanup(), "outlier cutoff failed");
}

#[test]
fn outlier_reg_retention_floor() {
    let mut rp = RegParams::new("outlier_floor");

    // deterministic pseudo-random score sets of many sizes; min_score 1.0
    // leaves the rank as the only thing keeping samples
    let mut seed = 12345u32;
    let mut next = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((seed >> 16) & 0x7fff) as f32 / 32768.0
    };
    let mut violations = 0;
    for n in 1..=200usize {
        let scores: Vec<f32> = (0..n).map(|_| next()).collect();
        for percent in 1..=100usize {
            let fraction = percent as f32 / 100.0;
            let cutoff = retention_cutoff(&scores, 1.0, fraction).unwrap();
            let kept = scores.iter().filter(|&&s| s >= cutoff).count();
            let required = (percent * n).div_ceil(100);
            if kept < required {
                eprintln!("  n = {n}, fraction = {fraction}: kept {kept} < {required}");
                violations += 1;
            }
        }
    }
    rp.compare_values(0.0, violations as f64, 0.0);

    assert!(rp.cleanup(), "outlier retention floor failed");
}

/// One class "o" of six 10x16 samples: three solid blocks, a frame, a
/// left half bar and a right half bar.
fn mixed_class() -> Pixa {
    let frame_rows: Vec<String> = (0..16)
        .map(|y| {
            if y == 0 || y == 15 {
                "#".repeat(10)
            } else {
                format!("#{}#", ".".repeat(8))
            }
        })
        .collect();
    let rows: Vec<&str> = frame_rows.iter().map(String::as_str).collect();
    let left = ["#####....."; 16];
    let right = [".....#####"; 16];

    let mut pixa = Pixa::new();
    for _ in 0..3 {
        pixa.push(solid_glyph(10, 16, "o").unwrap());
    }
    pixa.push(glyph(&rows, Some("o")).unwrap());
    pixa.push(glyph(&left, Some("o")).unwrap());
    pixa.push(glyph(&right, Some("o")).unwrap());
    pixa
}

#[test]
fn outlier_reg_class_floor() {
    let mut rp = RegParams::new("outlier_class_floor");

    let pixa = mixed_class();
    let n = pixa.len();

    // an unreachable minimum score: only the fraction keeps samples
    for percent in [20usize, 50, 80, 100] {
        let options = OutlierOptions {
            min_score: 1.0,
            min_fraction: percent as f32 / 100.0,
        };
        let result = remove_outliers(&pixa, &options).unwrap();
        let kept = result.kept.len();
        let required = (percent * n).div_ceil(100);
        eprintln!("  fraction {percent}%: kept {kept}, required {required}");
        rp.compare_values(1.0, (kept >= required) as u8 as f64, 0.0);
        rp.compare_values(n as f64, (kept + result.removed.len()) as f64, 0.0);
    }

    // the blocks and the frame all score above a low minimum, so nothing
    // is removed even with a small fraction
    let blocks_and_frame: Pixa = pixa.iter().take(4).cloned().collect();
    let options = OutlierOptions {
        min_score: 0.05,
        min_fraction: 0.1,
    };
    let result = remove_outliers(&blocks_and_frame, &options).unwrap();
    rp.compare_values(4.0, result.kept.len() as f64, 0.0);
    rp.compare_values(0.0, result.removed.len() as f64, 0.0);

    // identical samples all score 1.0 under the default options
    let same: Pixa = (0..4).map(|_| solid_glyph(10, 16, "o").unwrap()).collect();
    let result = remove_outliers(&same, &OutlierOptions::default()).unwrap();
    rp.compare_values(4.0, result.kept.len() as f64, 0.0);

    assert!(rp.cleanup(), "outlier class floor failed");
}

#[test]
fn outlier_reg_remove() {
    let mut rp = RegParams::new("outlier_remove");

    let block = |label: &str| solid_glyph(10, 16, label).unwrap();
    let frame_rows: Vec<String> = (0..16)
        .map(|y| {
            if y == 0 || y == 15 {
                "#".repeat(10)
            } else {
                format!("#{}#", ".".repeat(8))
            }
        })
        .collect();
    let rows: Vec<&str> = frame_rows.iter().map(String::as_str).collect();
    let frame = glyph(&rows, Some("o")).unwrap();

    let mut pixa = Pixa::new();
    for _ in 0..3 {
        pixa.push(block("o"));
    }
    pixa.push(frame);
    for _ in 0..2 {
        pixa.push(block("i"));
    }

    let result = remove_outliers(&pixa, &OutlierOptions::default()).unwrap();
    eprintln!(
        "  kept {}, removed {}, scores {:?}",
        result.kept.len(),
        result.removed.len(),
        result.removed_scores
    );
    rp.compare_values(5.0, result.kept.len() as f64, 0.0);
    rp.compare_values(1.0, result.removed.len() as f64, 0.0);
    rp.compare_values(1.0, result.removed_scores.len() as f64, 0.0);
    let score = result.removed_scores.first().copied().unwrap_or(1.0);
    rp.compare_values(1.0, (score < 0.75) as u8 as f64, 0.0);

    // kept samples are the unscaled, labeled originals in class order
    let labels: String = result.kept.iter().filter_map(Pix::text).collect();
    rp.compare_strings("oooii", &labels);
    let first = result.kept.get(0).unwrap();
    rp.compare_pix(&block("o"), first);
    let removed = result.removed.get(0).unwrap();
    rp.compare_values(48.0, removed.count_pixels() as f64, 0.0);

    assert!(rp.cleanup(), "outlier remove failed");
}
