//! Bootstrap digit templates
//!
//! A small hand-drawn library of the ten arabic digits in three styles.
//! Every glyph is also stored horizontally rescaled by 0.9, 1.1 and 1.2 so
//! padding covers narrow and wide fonts.

use glyphtrain_core::{Pix, Pixa};
use glyphtrain_imgproc::{dilate_brick, scale_by_sampling};

use crate::error::RecogResult;

use super::train::create_from_pixa_with_params;
use super::types::{CharsetType, Recog, RecogParams};

/// Horizontal scale factors applied to every base template
pub const BOOT_WIDTH_FACTORS: [f32; 3] = [0.9, 1.1, 1.2];

/// Number of drawing styles per digit
pub const BOOT_STYLES: usize = 3;

const DIGIT_ROWS: [[&str; 7]; 10] = [
    [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."],
    ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."],
    [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"],
    ["####.", "....#", "....#", ".###.", "....#", "....#", "####."],
    ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."],
    ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."],
    ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."],
    ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."],
    [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."],
    [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."],
];

/// The three styles of one digit: plain, bold, and condensed
fn digit_styles(rows: &[&str]) -> RecogResult<[Pix; BOOT_STYLES]> {
    let base = Pix::from_rows(rows)?;
    let plain = scale_by_sampling(&base, 4.0, 4.0)?;
    let bold = dilate_brick(&plain, 3, 3)?;
    let condensed = scale_by_sampling(&base, 3.0, 5.0)?;
    Ok([plain, bold, condensed])
}

/// Builds the labeled bootstrap digit templates
///
/// For each digit and style the base template is followed by its
/// horizontally rescaled variants, giving
/// `BOOT_STYLES * (1 + BOOT_WIDTH_FACTORS.len())` templates per digit.
pub fn make_boot_digit_templates() -> RecogResult<Pixa> {
    let per_digit = BOOT_STYLES * (1 + BOOT_WIDTH_FACTORS.len());
    let mut pixa = Pixa::with_capacity(DIGIT_ROWS.len() * per_digit);
    let digits = CharsetType::ArabicNumerals.characters();
    let mut buf = [0u8; 4];

    for (rows, &digit) in DIGIT_ROWS.iter().zip(digits) {
        let label: &str = digit.encode_utf8(&mut buf);
        for style in digit_styles(rows)? {
            for &factor in &BOOT_WIDTH_FACTORS {
                pixa.push(scale_by_sampling(&style, factor, 1.0)?.with_text(Some(label)));
            }
            pixa.push(style.with_text(Some(label)));
        }
    }
    Ok(pixa)
}

/// Builds a finished, averaged recognizer from the bootstrap digits
///
/// # Arguments
///
/// * `scale_h` - Template height (0 = unscaled)
/// * `line_w` - Stroke width (0 = unchanged)
/// * `max_y_shift` - Maximum vertical shift during matching
pub fn make_boot_digit_recog(scale_h: u32, line_w: u32, max_y_shift: u32) -> RecogResult<Recog> {
    let pixa = make_boot_digit_templates()?;
    create_from_pixa_with_params(
        &pixa,
        RecogParams {
            scale_h,
            line_w,
            max_y_shift,
            charset_type: CharsetType::ArabicNumerals,
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_templates_cover_digits() {
        let pixa = make_boot_digit_templates().unwrap();
        assert_eq!(pixa.len(), 10 * 12);
        for digit in CharsetType::ArabicNumerals.characters() {
            let label = digit.to_string();
            let n = pixa.iter().filter(|p| p.text() == Some(label.as_str())).count();
            assert_eq!(n, 12, "digit {digit}");
        }
    }

    #[test]
    fn test_boot_templates_are_rescaled() {
        let pixa = make_boot_digit_templates().unwrap();
        // first style of '0': 20x28 base, then 0.9, 1.1 and 1.2 wide
        let widths: Vec<u32> = pixa.iter().take(4).map(Pix::width).collect();
        assert_eq!(widths, vec![18, 22, 24, 20]);
        assert!(pixa.iter().take(4).all(|p| p.height() == 28));
    }

    #[test]
    fn test_boot_digit_recog() {
        let recog = make_boot_digit_recog(20, 0, 1).unwrap();
        assert_eq!(recog.set_size(), 10);
        assert_eq!(recog.num_samples(), 120);
        assert!(recog.is_train_done());
        assert!(recog.is_ave_done());
        assert_eq!(recog.params.charset_type, CharsetType::ArabicNumerals);
        for class in recog.classes() {
            assert_eq!(class.average().unwrap().pix.height(), 20);
        }
    }
}
