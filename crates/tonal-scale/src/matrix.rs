//! Pairwise contrast matrix — every ordered (foreground, background) pair.
//!
//! APCA is directional, so `(a, b)` and `(b, a)` are distinct pairs with
//! different Lc values. Only self-pairs (same index) are skipped, giving
//! `N * (N - 1)` pairs in foreground-major order.

use serde::Serialize;

use crate::config::ContrastConfig;
use crate::generator::ScaleColor;
use crate::metric::{WcagLevel, apca_lc, apca_passes, wcag_ratio};

/// Contrast of one step used as text on another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastPair {
    pub foreground_step: f32,
    pub background_step: f32,
    pub foreground_hex: String,
    pub background_hex: String,
    /// Signed Lc; the sign encodes polarity.
    pub apca_lc: f64,
    pub wcag_ratio: f64,
    pub wcag_level: WcagLevel,
    pub apca_passes: bool,
}

impl ContrastPair {
    /// Measure `fg` as text on `bg`.
    #[must_use]
    pub fn measure(fg: &ScaleColor, bg: &ScaleColor, config: &ContrastConfig) -> Self {
        let lc = apca_lc(fg.color, bg.color);
        let ratio = wcag_ratio(fg.color, bg.color);
        Self {
            foreground_step: fg.step,
            background_step: bg.step,
            foreground_hex: fg.hex.clone(),
            background_hex: bg.hex.clone(),
            apca_lc: lc,
            wcag_ratio: ratio,
            wcag_level: WcagLevel::classify(ratio, &config.wcag),
            apca_passes: apca_passes(lc, config.apca_pass),
        }
    }

    /// `|Lc|`, the usable APCA contrast.
    #[inline]
    #[must_use]
    pub fn apca_magnitude(&self) -> f64 {
        self.apca_lc.abs()
    }
}

/// Build the full directional contrast matrix for a generated scale.
#[must_use]
pub fn build_matrix(colors: &[ScaleColor], config: &ContrastConfig) -> Vec<ContrastPair> {
    let n = colors.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1));
    for (i, fg) in colors.iter().enumerate() {
        for (j, bg) in colors.iter().enumerate() {
            if i != j {
                pairs.push(ContrastPair::measure(fg, bg, config));
            }
        }
    }
    pairs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STEP_LABELS;
    use crate::scale::ColorScale;

    fn default_colors() -> Vec<ScaleColor> {
        ColorScale::default().colors(&DEFAULT_STEP_LABELS)
    }

    #[test]
    fn matrix_has_n_times_n_minus_one_pairs() {
        let config = ContrastConfig::default();
        let colors = default_colors();
        let n = colors.len();
        assert_eq!(build_matrix(&colors, &config).len(), n * (n - 1));
    }

    #[test]
    fn matrix_of_one_or_zero_is_empty() {
        let config = ContrastConfig::default();
        let colors = default_colors();
        assert!(build_matrix(&colors[..1], &config).is_empty());
        assert!(build_matrix(&[], &config).is_empty());
    }

    #[test]
    fn no_self_pairs() {
        let config = ContrastConfig::default();
        let pairs = build_matrix(&default_colors(), &config);
        assert!(pairs.iter().all(|p| p.foreground_step != p.background_step));
    }

    #[test]
    fn order_is_foreground_major() {
        let config = ContrastConfig::default();
        let colors = default_colors();
        let pairs = build_matrix(&colors, &config);
        assert_eq!(pairs[0].foreground_step, 100.0);
        assert_eq!(pairs[0].background_step, 90.0);
        assert_eq!(pairs[1].background_step, 80.0);
        let n = colors.len();
        assert_eq!(pairs[n - 1].foreground_step, 90.0);
        assert_eq!(pairs[n - 1].background_step, 100.0);
    }

    #[test]
    fn pairs_are_directional() {
        let config = ContrastConfig::default();
        let pairs = build_matrix(&default_colors(), &config);
        let find = |fg: f32, bg: f32| {
            pairs
                .iter()
                .find(|p| p.foreground_step == fg && p.background_step == bg)
                .unwrap()
        };
        let dark_on_light = find(10.0, 90.0);
        let light_on_dark = find(90.0, 10.0);
        assert!(dark_on_light.apca_lc > 0.0);
        assert!(light_on_dark.apca_lc < 0.0);
        assert!((dark_on_light.wcag_ratio - light_on_dark.wcag_ratio).abs() < 1e-9);
    }

    #[test]
    fn classification_matches_metrics() {
        let config = ContrastConfig::default();
        for p in build_matrix(&default_colors(), &config) {
            assert_eq!(p.apca_passes, p.apca_magnitude() >= 60.0);
            assert_eq!(p.wcag_level, WcagLevel::classify(p.wcag_ratio, &config.wcag));
            assert!(p.wcag_ratio >= 1.0);
        }
    }
}
