//! Hue and chroma curves along the lightness axis, plus named presets.
//!
//! A scale has one hue and one chroma, but a flat hue and flat chroma across
//! the whole lightness range looks wrong: shadows want a hue drift, and
//! chroma has to fall off toward white and black. Both shapes are a
//! `{ shift, power }` pair:
//!
//! | Curve  | `shift`                                 | `power`                        |
//! |--------|-----------------------------------------|--------------------------------|
//! | hue    | degrees of drift reached at black       | how late the drift kicks in    |
//! | chroma | offset of the chroma peak from L = 0.5  | sharpness of the falloff       |

use serde::{Deserialize, Serialize};
use tonal_color::color::normalize_hue;

/// A two-parameter curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub shift: f32,
    pub power: f32,
}

impl Curve {
    pub const fn new(shift: f32, power: f32) -> Self {
        Self { shift, power }
    }

    /// No hue drift.
    pub const FLAT_HUE: Self = Self::new(0.0, 1.0);

    /// Symmetric chroma bell peaking at mid lightness.
    pub const MID_CHROMA: Self = Self::new(0.0, 1.0);

    /// Hue at lightness `l` when this curve is used as a hue curve.
    ///
    /// The drift grows from 0 at white to `shift` degrees at black.
    #[must_use]
    pub fn hue_at(self, base_hue: f32, l: f32) -> f32 {
        let darkness = (1.0 - l).clamp(0.0, 1.0);
        normalize_hue(self.shift.mul_add(darkness.powf(self.power.max(0.01)), base_hue))
    }

    /// Chroma multiplier in [0, 1] at lightness `l` when used as a chroma curve.
    ///
    /// A linear tent between L = 0 and L = 1 whose peak sits at
    /// `0.5 + shift` (kept inside [0.05, 0.95]), raised to `power`.
    #[must_use]
    pub fn chroma_envelope(self, l: f32) -> f32 {
        let l = l.clamp(0.0, 1.0);
        let peak = (0.5 + self.shift).clamp(0.05, 0.95);
        let tent = if l <= peak {
            l / peak
        } else {
            (1.0 - l) / (1.0 - peak)
        };
        tent.clamp(0.0, 1.0).powf(self.power.max(0.01))
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// A named pairing of hue and chroma curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePreset {
    pub name: &'static str,
    pub hue: Curve,
    pub chroma: Curve,
}

const CURVE_PRESETS: &[CurvePreset] = &[
    CurvePreset {
        name: "linear",
        hue: Curve::FLAT_HUE,
        chroma: Curve::MID_CHROMA,
    },
    CurvePreset {
        name: "vivid-mid",
        hue: Curve::FLAT_HUE,
        chroma: Curve::new(0.0, 0.5),
    },
    CurvePreset {
        name: "warm-shadows",
        hue: Curve::new(-20.0, 1.5),
        chroma: Curve::new(-0.05, 0.8),
    },
    CurvePreset {
        name: "cool-shadows",
        hue: Curve::new(20.0, 1.5),
        chroma: Curve::new(-0.05, 0.8),
    },
    CurvePreset {
        name: "muted-ends",
        hue: Curve::FLAT_HUE,
        chroma: Curve::new(0.0, 2.0),
    },
    CurvePreset {
        name: "bright-highlights",
        hue: Curve::new(8.0, 2.0),
        chroma: Curve::new(0.15, 0.7),
    },
];

/// Look up a builtin curve preset by name (case-insensitive).
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_curve(name: &str) -> Option<CurvePreset> {
    let lower = name.to_lowercase();
    CURVE_PRESETS.iter().find(|p| p.name == lower).copied()
}

/// List all builtin curve preset names.
pub fn builtin_curve_names() -> impl Iterator<Item = &'static str> {
    CURVE_PRESETS.iter().map(|p| p.name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
