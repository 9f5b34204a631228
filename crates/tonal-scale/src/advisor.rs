//! Scale usage advisor — what each step is good for.
//!
//! Each step's label (0–100) picks a usage tier; the step's precomputed
//! contrast against its reference background decides which compliance notes
//! and warnings apply.
//!
//! | Label  | Tier          | Typical use                          |
//! |--------|---------------|--------------------------------------|
//! | >= 90  | `Background`  | page backgrounds, subtle UI fills    |
//! | 70–89  | `Border`      | disabled states, borders, dividers   |
//! | 40–69  | `Interactive` | buttons, links, icons                |
//! | 20–39  | `Text`        | body text, headings                  |
//! | < 20   | `Emphasis`    | maximum-contrast, critical content   |

use serde::Serialize;

use crate::config::ContrastConfig;
use crate::generator::ScaleColor;
use crate::scale::TargetBackground;

/// Minimum label distance for two steps to count as a usable pairing.
pub const PAIRING_SEPARATION: f32 = 60.0;

/// How many pairings each step lists.
pub const PAIRING_LIMIT: usize = 5;

/// APCA Lc for fluent body-text reading.
pub const APCA_FLUENT_TEXT: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UsageTier {
    Background,
    Border,
    Interactive,
    Text,
    Emphasis,
}

impl UsageTier {
    #[must_use]
    pub fn for_step(step: f32) -> Self {
        if step >= 90.0 {
            Self::Background
        } else if step >= 70.0 {
            Self::Border
        } else if step >= 40.0 {
            Self::Interactive
        } else if step >= 20.0 {
            Self::Text
        } else {
            Self::Emphasis
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Background => "Backgrounds and subtle UI fills",
            Self::Border => "Disabled states, borders and dividers",
            Self::Interactive => "Interactive elements and icons",
            Self::Text => "Primary text and headings",
            Self::Emphasis => "Maximum contrast and critical content",
        }
    }
}

/// Usage guidance for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageAdvice {
    pub step: f32,
    pub hex: String,
    pub tier: UsageTier,
    pub background: TargetBackground,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    /// Labels of the steps that pair well with this one, highest label first.
    pub best_pairings: Vec<f32>,
}

/// Advise on every step of a generated scale.
///
/// `scale_background` is the scale-wide reference surface; a step's own
/// override takes precedence.
#[must_use]
pub fn advise(
    colors: &[ScaleColor],
    scale_background: TargetBackground,
    config: &ContrastConfig,
) -> Vec<UsageAdvice> {
    colors
        .iter()
        .map(|sc| advise_step(sc, colors, scale_background, config))
        .collect()
}

fn advise_step(
    sc: &ScaleColor,
    colors: &[ScaleColor],
    scale_background: TargetBackground,
    config: &ContrastConfig,
) -> UsageAdvice {
    let background = sc.reference_background(scale_background);
    let figure = sc.contrast.on(background);
    let tier = UsageTier::for_step(sc.step);
    let bg = background.name();

    let mut recommendations = vec![tier.summary().to_string()];
    let mut warnings = Vec::new();

    match tier {
        UsageTier::Background => {
            if matches!(background, TargetBackground::White | TargetBackground::Gray) {
                warnings.push(format!(
                    "Low contrast on {bg} ({:.2}:1); not for text or essential UI",
                    figure.wcag
                ));
            }
        }
        UsageTier::Border => {
            if figure.wcag >= config.wcag.aa_large {
                recommendations.push(format!(
                    "Meets WCAG AA for large text on {bg} ({:.2}:1)",
                    figure.wcag
                ));
            }
        }
        UsageTier::Interactive => {
            if figure.wcag >= config.wcag.aa_normal {
                recommendations.push(format!("Meets WCAG AA on {bg} ({:.2}:1)", figure.wcag));
            }
            if figure.apca >= config.apca_pass {
                recommendations.push(format!(
                    "APCA Lc {:.0} on {bg}: suitable for body text",
                    figure.apca
                ));
            }
        }
        UsageTier::Text => {
            if figure.wcag >= config.wcag.aaa_normal {
                recommendations.push(format!("Meets WCAG AAA on {bg} ({:.2}:1)", figure.wcag));
            }
            if figure.apca >= APCA_FLUENT_TEXT {
                recommendations.push(format!(
                    "APCA Lc {:.0} on {bg}: fluent reading",
                    figure.apca
                ));
            }
        }
        UsageTier::Emphasis => {
            warnings.push("May be too harsh for large blocks of color".to_string());
            if figure.wcag >= config.wcag.aaa_normal {
                recommendations.push(format!(
                    "Exceeds WCAG AAA on {bg} ({:.2}:1)",
                    figure.wcag
                ));
            }
        }
    }

    UsageAdvice {
        step: sc.step,
        hex: sc.hex.clone(),
        tier,
        background,
        recommendations,
        warnings,
        best_pairings: best_pairings(colors, sc.step, PAIRING_LIMIT),
    }
}

/// Steps at least [`PAIRING_SEPARATION`] labels away from `step`,
/// highest label first, at most `limit`.
#[must_use]
pub fn best_pairings(colors: &[ScaleColor], step: f32, limit: usize) -> Vec<f32> {
    let mut candidates: Vec<f32> = colors
        .iter()
        .map(|sc| sc.step)
        .filter(|&other| (other - step).abs() >= PAIRING_SEPARATION)
        .collect();
    candidates.sort_by(|a, b| b.total_cmp(a));
    candidates.truncate(limit);
    candidates
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
