//! The scale definition — the parameters a color scale is generated from.
//!
//! A [`ColorScale`] is a value. The optimizer never edits one in place: it
//! derives a new scale through [`ColorScale::with_overrides`], leaving the
//! caller's instance untouched.

use serde::{Deserialize, Serialize};
use tonal_color::Color;

use crate::curve::{Curve, CurvePreset};

/// Which contrast metric the scale is tuned and reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastMode {
    /// WCAG 2 contrast ratios.
    #[default]
    Standard,
    /// APCA lightness contrast, with lightness fixed per step by the optimizer.
    FixedApca,
}

impl ContrastMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "wcag",
            Self::FixedApca => "apca",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "wcag" | "standard" => Some(Self::Standard),
            "apca" | "fixed-apca" => Some(Self::FixedApca),
            _ => None,
        }
    }

    #[must_use]
    pub const fn uses_apca(self) -> bool {
        matches!(self, Self::FixedApca)
    }
}

/// The reference surface a step is expected to sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetBackground {
    #[default]
    White,
    Gray,
    Black,
}

impl TargetBackground {
    /// The concrete color of this surface.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::White => Color::WHITE,
            Self::Gray => Color::rgb8(0x80, 0x80, 0x80),
            Self::Black => Color::BLACK,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Gray => "gray",
            Self::Black => "black",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "white" => Some(Self::White),
            "gray" | "grey" => Some(Self::Gray),
            "black" => Some(Self::Black),
            _ => None,
        }
    }
}

/// A per-step override of the scale's reference background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBackground {
    pub step: f32,
    pub background: TargetBackground,
}

/// Parameters of one color scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScale {
    /// Base hue in degrees.
    pub hue: f32,
    /// Peak chroma, before the chroma curve is applied.
    pub manual_chroma: f32,
    pub hue_curve: Curve,
    pub chroma_curve: Curve,
    pub contrast_mode: ContrastMode,
    /// Keep every step inside sRGB by lowering chroma instead of clipping channels.
    pub chroma_compensation: bool,
    pub target_background: TargetBackground,
    pub step_backgrounds: Vec<StepBackground>,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            hue: 240.0,
            manual_chroma: 0.15,
            hue_curve: Curve::FLAT_HUE,
            chroma_curve: Curve::MID_CHROMA,
            contrast_mode: ContrastMode::Standard,
            chroma_compensation: false,
            target_background: TargetBackground::White,
            step_backgrounds: Vec::new(),
        }
    }
}

/// Field overrides for [`ColorScale::with_overrides`]. `None` keeps the old value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleOverrides {
    pub hue: Option<f32>,
    pub manual_chroma: Option<f32>,
    pub hue_curve: Option<Curve>,
    pub chroma_curve: Option<Curve>,
    pub contrast_mode: Option<ContrastMode>,
    pub chroma_compensation: Option<bool>,
    pub target_background: Option<TargetBackground>,
}

impl ScaleOverrides {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hue.is_none()
            && self.manual_chroma.is_none()
            && self.hue_curve.is_none()
            && self.chroma_curve.is_none()
            && self.contrast_mode.is_none()
            && self.chroma_compensation.is_none()
            && self.target_background.is_none()
    }
}

impl ColorScale {
    /// A scale with the given hue and chroma and default everything else.
    #[must_use]
    pub fn new(hue: f32, manual_chroma: f32) -> Self {
        Self {
            hue,
            manual_chroma,
            ..Self::default()
        }
    }

    /// Build a new scale from this one plus `overrides`.
    #[must_use]
    pub fn with_overrides(&self, overrides: ScaleOverrides) -> Self {
        Self {
            hue: overrides.hue.unwrap_or(self.hue),
            manual_chroma: overrides.manual_chroma.unwrap_or(self.manual_chroma),
            hue_curve: overrides.hue_curve.unwrap_or(self.hue_curve),
            chroma_curve: overrides.chroma_curve.unwrap_or(self.chroma_curve),
            contrast_mode: overrides.contrast_mode.unwrap_or(self.contrast_mode),
            chroma_compensation: overrides.chroma_compensation.unwrap_or(self.chroma_compensation),
            target_background: overrides.target_background.unwrap_or(self.target_background),
            step_backgrounds: self.step_backgrounds.clone(),
        }
    }

    /// A new scale using the curves of `preset`.
    #[must_use]
    pub fn with_curves(&self, preset: &CurvePreset) -> Self {
        self.with_overrides(ScaleOverrides {
            hue_curve: Some(preset.hue),
            chroma_curve: Some(preset.chroma),
            ..ScaleOverrides::default()
        })
    }

    /// The per-step background override for `step`, if one is set.
    #[must_use]
    pub fn step_background(&self, step: f32) -> Option<TargetBackground> {
        self.step_backgrounds
            .iter()
            .find(|sb| (sb.step - step).abs() < 1e-3)
            .map(|sb| sb.background)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
