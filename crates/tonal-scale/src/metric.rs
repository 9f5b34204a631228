//! Contrast metrics: WCAG 2 contrast ratio and APCA lightness contrast.
//!
//! - [`wcag_ratio`] is symmetric and lies in [1, 21].
//! - [`apca_lc`] is asymmetric: positive for dark text on a light
//!   background, negative for light text on a dark background. Its
//!   magnitude is the usable contrast.
//!
//! Both read the clamped sRGB projection of an OKLCH color. Gamut handling
//! is the color crate's job; these functions are total over any `Color`.

use serde::{Deserialize, Serialize};
use tonal_color::Color;
use tonal_color::color::srgb_to_linear;

use crate::config::WcagThresholds;

// ─── WCAG 2 ──────────────────────────────────────────────────────────────────

/// Relative luminance per WCAG 2.1, in [0, 1].
///
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let r_lin = f64::from(srgb_to_linear(r));
    let g_lin = f64::from(srgb_to_linear(g));
    let b_lin = f64::from(srgb_to_linear(b));
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// WCAG 2.1 contrast ratio, `(L_lighter + 0.05) / (L_darker + 0.05)`.
///
/// Argument order does not matter.
#[must_use]
pub fn wcag_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance level of a contrast ratio, ordered `Fail < A < AA < AAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    Fail,
    A,
    AA,
    AAA,
}

impl WcagLevel {
    /// Classify a ratio against the configured thresholds.
    ///
    /// `aaa_normal` and above is AAA, `aa_normal` is AA, `aa_large` is A.
    #[must_use]
    pub fn classify(ratio: f64, thresholds: &WcagThresholds) -> Self {
        if ratio >= thresholds.aaa_normal {
            Self::AAA
        } else if ratio >= thresholds.aa_normal {
            Self::AA
        } else if ratio >= thresholds.aa_large {
            Self::A
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::A => "A",
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }
}

// ─── APCA ────────────────────────────────────────────────────────────────────
//
// APCA-W3 0.0.98G constants. The luminance estimate uses a plain 2.4 power
// curve, not the piecewise sRGB transfer function.

const MAIN_TRC: f64 = 2.4;
const S_RCO: f64 = 0.212_672_9;
const S_GCO: f64 = 0.715_152_2;
const S_BCO: f64 = 0.072_175;

const NORM_BG: f64 = 0.56;
const NORM_TXT: f64 = 0.57;
const REV_BG: f64 = 0.65;
const REV_TXT: f64 = 0.62;

const BLK_THRS: f64 = 0.022;
const BLK_CLMP: f64 = 1.414;

const SCALE: f64 = 1.14;
const LO_OFFSET: f64 = 0.027;
const DELTA_Y_MIN: f64 = 0.0005;
const LO_CLIP: f64 = 0.1;

/// APCA screen luminance with the black soft clamp applied.
#[must_use]
pub fn apca_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    let lin = |v: f32| f64::from(v).powf(MAIN_TRC);
    let y = S_BCO.mul_add(lin(b), S_RCO.mul_add(lin(r), S_GCO * lin(g)));
    if y > BLK_THRS {
        y
    } else {
        y + (BLK_THRS - y).powf(BLK_CLMP)
    }
}

/// APCA lightness contrast (Lc) of `fg` text on `bg`.
///
/// Roughly -108 (white on black) to +106 (black on white). Swapping the
/// arguments changes both sign and magnitude.
#[must_use]
pub fn apca_lc(fg: Color, bg: Color) -> f64 {
    let txt_y = apca_luminance(fg);
    let bg_y = apca_luminance(bg);

    if (bg_y - txt_y).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let sapc = if bg_y > txt_y {
        let s = (bg_y.powf(NORM_BG) - txt_y.powf(NORM_TXT)) * SCALE;
        if s < LO_CLIP { 0.0 } else { s - LO_OFFSET }
    } else {
        let s = (bg_y.powf(REV_BG) - txt_y.powf(REV_TXT)) * SCALE;
        if s > -LO_CLIP { 0.0 } else { s + LO_OFFSET }
    };

    sapc * 100.0
}

/// Whether an Lc value meets an APCA threshold by magnitude.
#[inline]
#[must_use]
pub fn apca_passes(lc: f64, threshold: f64) -> bool {
    lc.abs() >= threshold
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    fn hex(s: &str) -> Color {
        Color::hex(s).unwrap()
    }

    // ── WCAG ────────────────────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 0.001));
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 0.001));
    }

    #[test]
    fn luminance_pure_green() {
        let lum = relative_luminance(Color::srgb(0.0, 1.0, 0.0));
        assert!(approx_eq(lum, 0.7152, 0.01), "green luminance: {lum}");
    }

    #[test]
    fn black_white_is_21() {
        let ratio = wcag_ratio(Color::BLACK, Color::WHITE);
        assert!(approx_eq(ratio, 21.0, 0.1), "B/W ratio: {ratio}");
    }

    #[test]
    fn wcag_is_symmetric() {
        let a = hex("#cc3355");
        let b = hex("#1a1a66");
        assert!(approx_eq(wcag_ratio(a, b), wcag_ratio(b, a), 1e-12));
    }

    #[test]
    fn wcag_same_color_is_one() {
        let c = Color::oklch(0.5, 0.1, 180.0);
        assert!(approx_eq(wcag_ratio(c, c), 1.0, 1e-9));
    }

    #[test]
    fn gray_767676_is_about_4_54() {
        let ratio = wcag_ratio(hex("#767676"), Color::WHITE);
        assert!(approx_eq(ratio, 4.54, 0.02), "ratio: {ratio}");
    }

    // ── Levels ──────────────────────────────────────────────────────

    #[test]
    fn levels_classify_by_threshold() {
        let t = WcagThresholds::default();
        assert_eq!(WcagLevel::classify(2.9, &t), WcagLevel::Fail);
        assert_eq!(WcagLevel::classify(3.0, &t), WcagLevel::A);
        assert_eq!(WcagLevel::classify(4.49, &t), WcagLevel::A);
        assert_eq!(WcagLevel::classify(4.5, &t), WcagLevel::AA);
        assert_eq!(WcagLevel::classify(7.0, &t), WcagLevel::AAA);
        assert_eq!(WcagLevel::classify(21.0, &t), WcagLevel::AAA);
    }

    #[test]
    fn levels_are_totally_ordered() {
        assert!(WcagLevel::Fail < WcagLevel::A);
        assert!(WcagLevel::A < WcagLevel::AA);
        assert!(WcagLevel::AA < WcagLevel::AAA);
    }

    #[test]
    fn classification_is_repeatable() {
        let t = WcagThresholds::default();
        for ratio in [1.0, 2.5, 3.7, 5.1, 9.9] {
            assert_eq!(WcagLevel::classify(ratio, &t), WcagLevel::classify(ratio, &t));
        }
    }

    // ── APCA ────────────────────────────────────────────────────────

    #[test]
    fn apca_black_on_white() {
        let lc = apca_lc(Color::BLACK, Color::WHITE);
        assert!(approx_eq(lc, 106.0, 1.0), "got {lc}");
    }

    #[test]
    fn apca_white_on_black() {
        let lc = apca_lc(Color::WHITE, Color::BLACK);
        assert!(approx_eq(lc, -107.9, 1.0), "got {lc}");
    }

    #[test]
    fn apca_gray_on_white() {
        let lc = apca_lc(hex("#767676"), Color::WHITE);
        assert!(approx_eq(lc, 71.6, 1.0), "got {lc}");
    }

    #[test]
    fn apca_same_color_is_zero() {
        let c = hex("#808080");
        assert!(apca_lc(c, c).abs() < f64::EPSILON);
    }

    #[test]
    fn apca_is_directional() {
        let a = hex("#1e293b");
        let b = hex("#f4f4f5");
        let ab = apca_lc(a, b);
        let ba = apca_lc(b, a);
        assert!(ab > 0.0 && ba < 0.0);
        assert!(!approx_eq(ab.abs(), ba.abs(), 0.1), "{ab} vs {ba}");
    }

    #[test]
    fn apca_pass_uses_magnitude() {
        assert!(apca_passes(-65.0, 60.0));
        assert!(apca_passes(60.0, 60.0));
        assert!(!apca_passes(59.9, 60.0));
    }
}
