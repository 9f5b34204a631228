//! Threshold filtering and badge rankings over a contrast matrix.
//!
//! A [`ContrastThreshold`] filters by APCA or by WCAG, never both at once.
//! Unset bounds impose nothing, and a threshold with no bounds at all hands
//! the input back untouched.
//!
//! Badge rankings surface the pairs that *just* clear a threshold. The
//! barely-passing pairs are the broadly useful ones; the extremes (black on
//! white) pass every badge and say little.

use serde::{Deserialize, Serialize};

use crate::config::ContrastConfig;
use crate::matrix::ContrastPair;
use crate::scale::ContrastMode;

/// How many pairs each badge ranking keeps.
pub const BADGE_RANK_LIMIT: usize = 5;

/// APCA badge levels (Lc magnitude).
pub const APCA_BADGE_LEVELS: [f64; 3] = [45.0, 70.0, 90.0];

/// Filter predicate over contrast pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastThreshold {
    /// Apply the APCA bounds (`true`) or the WCAG bounds (`false`).
    pub use_apca: bool,
    pub min_apca: Option<f64>,
    pub max_apca: Option<f64>,
    pub min_wcag: Option<f64>,
    pub max_wcag: Option<f64>,
}

impl ContrastThreshold {
    /// APCA-only threshold with a lower bound on `|Lc|`.
    #[must_use]
    pub const fn apca_min(min: f64) -> Self {
        Self {
            use_apca: true,
            min_apca: Some(min),
            max_apca: None,
            min_wcag: None,
            max_wcag: None,
        }
    }

    /// WCAG-only threshold with a lower bound on the ratio.
    #[must_use]
    pub const fn wcag_min(min: f64) -> Self {
        Self {
            use_apca: false,
            min_apca: None,
            max_apca: None,
            min_wcag: Some(min),
            max_wcag: None,
        }
    }

    /// A threshold that filters on the metric the scale is tuned for.
    #[must_use]
    pub fn for_mode(mode: ContrastMode, config: &ContrastConfig) -> Self {
        if mode.uses_apca() {
            Self::apca_min(config.apca_pass)
        } else {
            Self::wcag_min(config.wcag.aa_normal)
        }
    }

    /// True when no bound on either metric is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min_apca.is_none()
            && self.max_apca.is_none()
            && self.min_wcag.is_none()
            && self.max_wcag.is_none()
    }

    /// Whether `pair` satisfies the active metric's bounds.
    #[must_use]
    pub fn accepts(&self, pair: &ContrastPair) -> bool {
        let (value, min, max) = if self.use_apca {
            (pair.apca_magnitude(), self.min_apca, self.max_apca)
        } else {
            (pair.wcag_ratio, self.min_wcag, self.max_wcag)
        };
        min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m)
    }
}

/// Keep the pairs that satisfy `threshold`, preserving order.
#[must_use]
pub fn filter_pairs(
    mut pairs: Vec<ContrastPair>,
    threshold: &ContrastThreshold,
) -> Vec<ContrastPair> {
    if threshold.is_unbounded() {
        return pairs;
    }
    pairs.retain(|p| threshold.accepts(p));
    pairs
}

// ─── Badges ──────────────────────────────────────────────────────────────────

/// The metric a badge is judged on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Wcag,
    Apca,
}

impl Metric {
    /// This metric's value for `pair` (APCA as magnitude).
    #[must_use]
    pub fn of(self, pair: &ContrastPair) -> f64 {
        match self {
            Self::Wcag => pair.wcag_ratio,
            Self::Apca => pair.apca_magnitude(),
        }
    }
}

/// A contrast badge: a label and the minimum value that earns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub label: String,
    pub metric: Metric,
    pub min: f64,
}

/// The declared badges: WCAG A and AA, then APCA Lc 45 / 70 / 90.
#[must_use]
pub fn badges(config: &ContrastConfig) -> Vec<Badge> {
    let mut badges = vec![
        Badge {
            label: "A".into(),
            metric: Metric::Wcag,
            min: config.wcag.aa_large,
        },
        Badge {
            label: "AA".into(),
            metric: Metric::Wcag,
            min: config.wcag.aa_normal,
        },
    ];
    badges.extend(APCA_BADGE_LEVELS.iter().map(|&lc| Badge {
        label: format!("Lc {lc:.0}"),
        metric: Metric::Apca,
        min: lc,
    }));
    badges
}

/// The pairs that earn `badge`, closest to its threshold first, at most `limit`.
#[must_use]
pub fn rank_for_badge<'a>(
    pairs: &'a [ContrastPair],
    badge: &Badge,
    limit: usize,
) -> Vec<&'a ContrastPair> {
    let mut earned: Vec<&ContrastPair> = pairs
        .iter()
        .filter(|p| badge.metric.of(p) >= badge.min)
        .collect();
    earned.sort_by(|a, b| badge.metric.of(a).total_cmp(&badge.metric.of(b)));
    earned.truncate(limit);
    earned
}

/// One badge with its ranked pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeRanking {
    pub badge: Badge,
    pub pairs: Vec<ContrastPair>,
}

/// Rank every declared badge, [`BADGE_RANK_LIMIT`] pairs each.
#[must_use]
pub fn rank_badges(pairs: &[ContrastPair], config: &ContrastConfig) -> Vec<BadgeRanking> {
    badges(config)
        .into_iter()
        .map(|badge| {
            let ranked = rank_for_badge(pairs, &badge, BADGE_RANK_LIMIT)
                .into_iter()
                .cloned()
                .collect();
            BadgeRanking { badge, pairs: ranked }
        })
        .collect()
}

/// The strongest `n` pairings with `step` as foreground that pass `threshold`.
#[must_use]
pub fn top_pairs_for_step<'a>(
    pairs: &'a [ContrastPair],
    step: f32,
    threshold: &ContrastThreshold,
    n: usize,
) -> Vec<&'a ContrastPair> {
    let metric = if threshold.use_apca { Metric::Apca } else { Metric::Wcag };
    let mut matching: Vec<&ContrastPair> = pairs
        .iter()
        .filter(|p| (p.foreground_step - step).abs() < 1e-3 && threshold.accepts(p))
        .collect();
    matching.sort_by(|a, b| metric.of(b).total_cmp(&metric.of(a)));
    matching.truncate(n);
    matching
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STEP_LABELS;
    use crate::matrix::build_matrix;
    use crate::metric::WcagLevel;
    use crate::scale::ColorScale;
    use pretty_assertions::assert_eq;

    fn pair(fg: f32, bg: f32, apca: f64, wcag: f64) -> ContrastPair {
        ContrastPair {
            foreground_step: fg,
            background_step: bg,
            foreground_hex: "#000000".into(),
            background_hex: "#ffffff".into(),
            apca_lc: apca,
            wcag_ratio: wcag,
            wcag_level: WcagLevel::classify(wcag, &ContrastConfig::default().wcag),
            apca_passes: apca.abs() >= 60.0,
        }
    }

    fn matrix() -> Vec<ContrastPair> {
        let config = ContrastConfig::default();
        build_matrix(&ColorScale::default().colors(&DEFAULT_STEP_LABELS), &config)
    }

    #[test]
    fn unbounded_threshold_is_identity() {
        let pairs = matrix();
        let filtered = filter_pairs(pairs.clone(), &ContrastThreshold::default());
        assert_eq!(filtered, pairs);

        let apca_flag_only = ContrastThreshold {
            use_apca: true,
            ..ContrastThreshold::default()
        };
        assert_eq!(filter_pairs(pairs.clone(), &apca_flag_only).len(), pairs.len());
    }

    #[test]
    fn apca_minimum_keeps_only_passing_pair() {
        let pairs = vec![pair(10.0, 90.0, 55.0, 4.0), pair(5.0, 90.0, 65.0, 5.0)];
        let filtered = filter_pairs(pairs, &ContrastThreshold::apca_min(60.0));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].apca_lc, 65.0);
    }

    #[test]
    fn apca_bounds_use_magnitude() {
        let pairs = vec![pair(90.0, 10.0, -70.0, 6.0), pair(10.0, 90.0, 40.0, 3.0)];
        let filtered = filter_pairs(pairs, &ContrastThreshold::apca_min(60.0));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].apca_lc, -70.0);
    }

    #[test]
    fn metrics_are_never_combined() {
        // WCAG bounds are ignored in APCA mode.
        let threshold = ContrastThreshold {
            use_apca: true,
            min_apca: Some(60.0),
            min_wcag: Some(20.0),
            ..ContrastThreshold::default()
        };
        let filtered = filter_pairs(vec![pair(5.0, 90.0, 65.0, 5.0)], &threshold);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn wcag_window() {
        let threshold = ContrastThreshold {
            min_wcag: Some(3.0),
            max_wcag: Some(7.0),
            ..ContrastThreshold::default()
        };
        let pairs = vec![
            pair(1.0, 2.0, 10.0, 2.0),
            pair(1.0, 3.0, 50.0, 4.5),
            pair(1.0, 4.0, 90.0, 12.0),
        ];
        let filtered = filter_pairs(pairs, &threshold);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].wcag_ratio, 4.5);
    }

    #[test]
    fn filter_preserves_order() {
        let pairs = matrix();
        let filtered = filter_pairs(pairs.clone(), &ContrastThreshold::wcag_min(4.5));
        let expected: Vec<_> = pairs.into_iter().filter(|p| p.wcag_ratio >= 4.5).collect();
        assert_eq!(filtered, expected);
    }

    #[test]
    fn mode_threshold_uses_the_mode_metric() {
        let config = ContrastConfig::default();
        let wcag = ContrastThreshold::for_mode(ContrastMode::Standard, &config);
        assert!(!wcag.use_apca);
        assert_eq!(wcag.min_wcag, Some(4.5));
        let apca = ContrastThreshold::for_mode(ContrastMode::FixedApca, &config);
        assert!(apca.use_apca);
        assert_eq!(apca.min_apca, Some(60.0));

        let kept = filter_pairs(vec![pair(0.0, 100.0, -65.0, 4.0)], &apca);
        assert_eq!(kept.len(), 1);
        assert!(filter_pairs(vec![pair(0.0, 100.0, -65.0, 4.0)], &wcag).is_empty());
    }

    #[test]
    fn five_badges_declared() {
        let labels: Vec<String> = badges(&ContrastConfig::default())
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, vec!["A", "AA", "Lc 45", "Lc 70", "Lc 90"]);
    }

    #[test]
    fn badge_ranking_prefers_just_passing() {
        let pairs = vec![
            pair(1.0, 2.0, 20.0, 2.9),
            pair(1.0, 3.0, 30.0, 3.1),
            pair(1.0, 4.0, 90.0, 15.0),
            pair(1.0, 5.0, 40.0, 3.4),
        ];
        let badge = Badge {
            label: "A".into(),
            metric: Metric::Wcag,
            min: 3.0,
        };
        let ranked = rank_for_badge(&pairs, &badge, 2);
        let ratios: Vec<f64> = ranked.iter().map(|p| p.wcag_ratio).collect();
        assert_eq!(ratios, vec![3.1, 3.4]);
    }

    #[test]
    fn badge_rankings_capped_and_ascending() {
        let config = ContrastConfig::default();
        for ranking in rank_badges(&matrix(), &config) {
            assert!(ranking.pairs.len() <= BADGE_RANK_LIMIT);
            let values: Vec<f64> =
                ranking.pairs.iter().map(|p| ranking.badge.metric.of(p)).collect();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{}: {values:?}", ranking.badge.label);
            assert!(values.iter().all(|&v| v >= ranking.badge.min));
        }
    }

    #[test]
    fn top_pairs_for_step_strongest_first() {
        let pairs = matrix();
        let threshold = ContrastThreshold::wcag_min(3.0);
        let top = top_pairs_for_step(&pairs, 10.0, &threshold, 5);
        assert!(!top.is_empty() && top.len() <= 5);
        assert!(top.iter().all(|p| p.foreground_step == 10.0));
        assert!(top.windows(2).all(|w| w[0].wcag_ratio >= w[1].wcag_ratio));
    }
}
