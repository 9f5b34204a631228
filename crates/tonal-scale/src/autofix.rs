//! Auto-fix optimizer — nudge a scale until it meets APCA targets.
//!
//! The optimizer works in a fixed order, and any stage may do nothing:
//!
//! 1. Sort targets by priority. The highest one drives the search; the
//!    rest are advisory and never searched on their own.
//! 2. Switch the scale to fixed-APCA contrast mode.
//! 3. Trim chroma above 0.2, which otherwise caps the reachable contrast.
//! 4. Binary-search a new lightness for every step (optionally skipping the
//!    98 / 14 endpoints) and keep it only when the search succeeded and the
//!    step moved by at least two points.
//! 5. Turn on chroma compensation.
//!
//! The search runs against the scale exactly as it is returned (stages 2,
//! 3 and 5 applied), so every recorded adjustment still meets its target on
//! the final scale.
//!
//! Lc is not strictly monotonic in lightness for every hue and chroma, so
//! the search is bounded (30 iterations, 0.005 interval width) and reports
//! the best candidate it saw with an explicit success flag.

use serde::{Deserialize, Serialize};
use tonal_color::Color;

use crate::metric::apca_lc;
use crate::scale::{ColorScale, ContrastMode, ScaleOverrides};

/// Lowest lightness the search will propose.
pub const SEARCH_MIN_L: f32 = 0.05;
/// Highest lightness the search will propose.
pub const SEARCH_MAX_L: f32 = 0.98;
/// The search stops once its interval is narrower than this.
pub const SEARCH_MIN_WIDTH: f32 = 0.005;
/// Hard cap on search iterations.
pub const SEARCH_MAX_ITERATIONS: u32 = 30;

/// Smallest lightness change (label points) worth applying.
pub const MIN_STEP_CHANGE: f32 = 2.0;
/// Chroma above this is trimmed before searching.
pub const CHROMA_LIMIT: f32 = 0.2;
const CHROMA_MAX_REDUCTION: f32 = 0.05;
const CHROMA_REDUCTION_RATIO: f32 = 0.15;

/// Step labels left alone when `preserve_endpoints` is set.
pub const ENDPOINT_STEPS: [f32; 2] = [98.0, 14.0];

/// Share of targets achieved that still counts as an overall success.
const SUCCESS_FRACTION: f64 = 0.7;

// ─── Targets ─────────────────────────────────────────────────────────────────

/// How much a target matters. Orders `Nice < Should < Must`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Nice,
    Should,
    Must,
}

impl Priority {
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Must => 3,
            Self::Should => 2,
            Self::Nice => 1,
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "must" => Some(Self::Must),
            "should" => Some(Self::Should),
            "nice" => Some(Self::Nice),
            _ => None,
        }
    }
}

/// A minimum APCA contrast against a background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApcaTarget {
    pub min_lc: f64,
    /// Background as a hex string.
    pub background: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ApcaTarget {
    #[must_use]
    pub fn new(min_lc: f64, background: &str, priority: Priority) -> Self {
        Self {
            min_lc,
            background: background.to_string(),
            priority,
            name: None,
        }
    }

    #[must_use]
    pub fn named(self, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..self
        }
    }

    /// The background color; malformed hex resolves to white.
    #[must_use]
    pub fn background_color(&self) -> Color {
        Color::hex_or_white(&self.background)
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Lc {:.0} on {}", self.min_lc, self.background))
    }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Outcome of [`find_lightness_for_target`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightnessSearch {
    /// Best lightness seen, always within [`SEARCH_MIN_L`, `SEARCH_MAX_L`].
    pub lightness: f32,
    /// `|Lc|` at that lightness.
    pub achieved_lc: f64,
    pub success: bool,
    pub iterations: u32,
}

/// Binary-search the lightness at which the scale's color reaches `target_lc`
/// against `background`.
///
/// On a light background more contrast means darker, so the search moves
/// down; on a dark background it moves up. The best candidate by distance to
/// the target is kept across all iterations, not just the last midpoint.
#[must_use]
pub fn find_lightness_for_target(
    scale: &ColorScale,
    target_lc: f64,
    background: Color,
    tolerance: f64,
) -> LightnessSearch {
    let light_bg = background.is_light();
    let mut low = SEARCH_MIN_L;
    let mut high = SEARCH_MAX_L;

    let mut best_l = (low + high) * 0.5;
    let mut best_lc = apca_lc(scale.color_at(best_l), background).abs();
    let mut best_dist = (best_lc - target_lc).abs();
    let mut iterations = 0;

    while high - low >= SEARCH_MIN_WIDTH && iterations < SEARCH_MAX_ITERATIONS {
        iterations += 1;
        let mid = (low + high) * 0.5;
        let lc = apca_lc(scale.color_at(mid), background).abs();
        let dist = (lc - target_lc).abs();

        if dist < best_dist {
            best_dist = dist;
            best_l = mid;
            best_lc = lc;
        }

        let need_more_contrast = lc < target_lc;
        if need_more_contrast == light_bg {
            high = mid;
        } else {
            low = mid;
        }
    }

    LightnessSearch {
        lightness: best_l.clamp(SEARCH_MIN_L, SEARCH_MAX_L),
        achieved_lc: best_lc,
        success: best_dist <= tolerance,
        iterations,
    }
}

// ─── Optimizer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFixOptions {
    /// Leave steps labeled 98 and 14 untouched.
    pub preserve_endpoints: bool,
    /// Allowed `|achieved - target|` in Lc.
    pub tolerance: f64,
}

impl Default for AutoFixOptions {
    fn default() -> Self {
        Self {
            preserve_endpoints: true,
            tolerance: 1.0,
        }
    }
}

/// One applied lightness change, in label points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightnessAdjustment {
    pub step: f32,
    pub before: f32,
    pub after: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AutoFixMetrics {
    /// Adjusted steps that reached the primary target.
    pub targets_achieved: usize,
    /// Target count minus `targets_achieved`, floored at zero.
    pub targets_failed: usize,
    /// Mean reduction of `|Lc - target|` over adjusted steps.
    pub average_lc_improvement: f64,
    pub lightness_adjustments: Vec<LightnessAdjustment>,
    /// Chroma removed in stage 3 (0 when untouched).
    pub chroma_adjustment: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoFixResult {
    pub scale: ColorScale,
    /// The step lightness list after fixing, index-aligned with the input.
    pub adjusted_lightness_steps: Vec<f32>,
    /// Human-readable log of what changed, in order.
    pub improvements: Vec<String>,
    pub metrics: AutoFixMetrics,
    pub success: bool,
}

fn is_endpoint(step: f32) -> bool {
    ENDPOINT_STEPS.iter().any(|e| (step - e).abs() < 1e-3)
}

/// Optimize `scale` and its step `lightness` list toward `targets`.
///
/// The caller's scale is not modified; the result carries a new one.
#[must_use]
pub fn auto_fix(
    scale: &ColorScale,
    lightness: &[f32],
    targets: &[ApcaTarget],
    options: &AutoFixOptions,
) -> AutoFixResult {
    let mut sorted: Vec<&ApcaTarget> = targets.iter().collect();
    sorted.sort_by(|a, b| b.priority.cmp(&a.priority));

    let Some(primary) = sorted.first().copied() else {
        log::info!("auto-fix called without targets, nothing to do");
        return AutoFixResult {
            scale: scale.clone(),
            adjusted_lightness_steps: lightness.to_vec(),
            improvements: Vec::new(),
            metrics: AutoFixMetrics::default(),
            success: true,
        };
    };

    if sorted.len() > 1 {
        log::info!(
            "auto-fix searches only the primary target ({}); {} secondary target(s) are advisory",
            primary.label(),
            sorted.len() - 1
        );
    }

    // ── Scale-level stages (2, 3, 5) ────────────────────────────────
    let mut improvements = Vec::new();
    let mut overrides = ScaleOverrides::default();

    if scale.contrast_mode != ContrastMode::FixedApca {
        overrides.contrast_mode = Some(ContrastMode::FixedApca);
        improvements.push(format!(
            "Switched contrast mode from {} to {}",
            scale.contrast_mode.name(),
            ContrastMode::FixedApca.name()
        ));
    }

    let mut chroma_adjustment = 0.0;
    if scale.manual_chroma > CHROMA_LIMIT {
        let reduction = (scale.manual_chroma * CHROMA_REDUCTION_RATIO).min(CHROMA_MAX_REDUCTION);
        let reduced = scale.manual_chroma - reduction;
        overrides.manual_chroma = Some(reduced);
        chroma_adjustment = reduction;
        improvements.push(format!(
            "Reduced chroma from {:.3} to {reduced:.3} ({:.0}% less) to widen the reachable contrast range",
            scale.manual_chroma,
            reduction / scale.manual_chroma * 100.0
        ));
    }

    let enable_compensation = !scale.chroma_compensation;
    if enable_compensation {
        overrides.chroma_compensation = Some(true);
    }

    let fixed = scale.with_overrides(overrides);

    // ── Per-step lightness search (4) ───────────────────────────────
    let background = primary.background_color();
    let target_lc = primary.min_lc;
    let mut adjusted = lightness.to_vec();
    let mut adjustments = Vec::new();
    let mut improvement_sum = 0.0;

    for (slot, &step) in adjusted.iter_mut().zip(lightness) {
        if options.preserve_endpoints && is_endpoint(step) {
            log::debug!("step {step}: endpoint preserved");
            continue;
        }

        // Inputs do not vary by step: every accepted step lands on one lightness.
        let search = find_lightness_for_target(&fixed, target_lc, background, options.tolerance);
        let after = search.lightness * 100.0;
        if (after - step).abs() < MIN_STEP_CHANGE {
            log::debug!("step {step}: change to {after:.1} below {MIN_STEP_CHANGE} points, skipped");
            continue;
        }

        let achieved = apca_lc(fixed.color_at_step(after), background).abs();
        if !search.success || (achieved - target_lc).abs() > options.tolerance {
            log::debug!(
                "step {step}: search missed Lc {target_lc:.1} (best {achieved:.1} after {} iterations)",
                search.iterations
            );
            continue;
        }

        let before_lc = apca_lc(scale.color_at_step(step), background).abs();
        improvement_sum += (before_lc - target_lc).abs() - (achieved - target_lc).abs();
        improvements.push(format!(
            "Step {step}: lightness {step:.1}% -> {after:.1}% (Lc {before_lc:.1} -> {achieved:.1})"
        ));
        adjustments.push(LightnessAdjustment {
            step,
            before: step,
            after,
        });
        *slot = after;
    }

    if enable_compensation {
        improvements
            .push("Enabled chroma compensation to keep adjusted steps in gamut".to_string());
    }

    // ── Metrics ─────────────────────────────────────────────────────
    let targets_achieved = adjustments.len();
    let targets_failed = targets.len().saturating_sub(targets_achieved);
    let average_lc_improvement = if adjustments.is_empty() {
        0.0
    } else {
        improvement_sum / adjustments.len() as f64
    };
    let success = targets_failed == 0
        || targets_achieved as f64 / targets.len() as f64 >= SUCCESS_FRACTION;

    log::info!(
        "auto-fix toward {}: {} step(s) adjusted, success={success}",
        primary.label(),
        adjustments.len()
    );

    AutoFixResult {
        scale: fixed,
        adjusted_lightness_steps: adjusted,
        improvements,
        metrics: AutoFixMetrics {
            targets_achieved,
            targets_failed,
            average_lc_improvement,
            lightness_adjustments: adjustments,
            chroma_adjustment,
        },
        success,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
