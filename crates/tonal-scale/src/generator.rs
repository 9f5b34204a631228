//! Scale generator — from scale parameters and a lightness to a color.
//!
//! [`generate`] is a pure function, so the optimizer can call it thousands
//! of times inside its search loop and always see the same answer for the
//! same inputs. [`ColorScale::colors`] runs it over a step-label table and
//! attaches each step's cached hex and its contrast against the three
//! reference surfaces.

use serde::Serialize;
use tonal_color::Color;

use crate::curve::Curve;
use crate::metric::{apca_lc, wcag_ratio};
use crate::scale::{ColorScale, TargetBackground};

/// Generation switches that are not curve parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Lower chroma to the sRGB boundary instead of clipping channels.
    pub chroma_compensation: bool,
}

/// Generate the color at OKLCH `lightness` for a scale's hue and chroma.
#[must_use]
pub fn generate(
    lightness: f32,
    chroma: f32,
    hue: f32,
    hue_curve: Curve,
    chroma_curve: Curve,
    options: GenerateOptions,
) -> Color {
    let l = lightness.clamp(0.0, 1.0);
    let h = hue_curve.hue_at(hue, l);
    let c = chroma.max(0.0) * chroma_curve.chroma_envelope(l);
    let color = Color::oklch(l, c, h);
    if options.chroma_compensation {
        color.to_gamut()
    } else {
        color
    }
}

/// WCAG ratio and APCA magnitude of a step against one surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastFigure {
    pub wcag: f64,
    /// `|Lc|` with the step as text on the surface.
    pub apca: f64,
}

impl ContrastFigure {
    #[must_use]
    pub fn measure(fg: Color, bg: Color) -> Self {
        Self {
            wcag: wcag_ratio(fg, bg),
            apca: apca_lc(fg, bg).abs(),
        }
    }
}

/// Precomputed contrast of a step against white, mid gray and black.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepContrast {
    pub on_white: ContrastFigure,
    pub on_gray: ContrastFigure,
    pub on_black: ContrastFigure,
}

impl StepContrast {
    #[must_use]
    pub fn measure(color: Color) -> Self {
        Self {
            on_white: ContrastFigure::measure(color, TargetBackground::White.color()),
            on_gray: ContrastFigure::measure(color, TargetBackground::Gray.color()),
            on_black: ContrastFigure::measure(color, TargetBackground::Black.color()),
        }
    }

    #[must_use]
    pub const fn on(&self, background: TargetBackground) -> ContrastFigure {
        match background {
            TargetBackground::White => self.on_white,
            TargetBackground::Gray => self.on_gray,
            TargetBackground::Black => self.on_black,
        }
    }
}

/// One generated step: its label, color, cached hex and contrast payload.
///
/// The label travels with the color, so a list of `ScaleColor`s can never
/// fall out of alignment with its labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleColor {
    /// Step label on the 0–100 lightness scale.
    pub step: f32,
    pub color: Color,
    pub hex: String,
    pub contrast: StepContrast,
    /// Overrides the scale's reference background for this step.
    pub target_background: Option<TargetBackground>,
}

impl ScaleColor {
    #[must_use]
    pub fn new(step: f32, color: Color) -> Self {
        Self {
            step,
            color,
            hex: color.to_hex(),
            contrast: StepContrast::measure(color),
            target_background: None,
        }
    }

    /// The surface this step is judged against: its own override, else the scale's.
    #[must_use]
    pub fn reference_background(&self, scale_default: TargetBackground) -> TargetBackground {
        self.target_background.unwrap_or(scale_default)
    }

    /// Contrast against [`reference_background`](Self::reference_background).
    #[must_use]
    pub const fn reference_contrast(&self, scale_default: TargetBackground) -> ContrastFigure {
        let bg = match self.target_background {
            Some(bg) => bg,
            None => scale_default,
        };
        self.contrast.on(bg)
    }
}

impl ColorScale {
    #[must_use]
    pub const fn options(&self) -> GenerateOptions {
        GenerateOptions {
            chroma_compensation: self.chroma_compensation,
        }
    }

    /// The scale's color at OKLCH lightness `l` (0.0–1.0).
    #[must_use]
    pub fn color_at(&self, l: f32) -> Color {
        generate(
            l,
            self.manual_chroma,
            self.hue,
            self.hue_curve,
            self.chroma_curve,
            self.options(),
        )
    }

    /// The scale's color at a step label (0–100).
    #[must_use]
    pub fn color_at_step(&self, step: f32) -> Color {
        self.color_at(step / 100.0)
    }

    /// Generate every step of the scale, in label order.
    #[must_use]
    pub fn colors(&self, steps: &[f32]) -> Vec<ScaleColor> {
        steps
            .iter()
            .map(|&step| ScaleColor {
                target_background: self.step_background(step),
                ..ScaleColor::new(step, self.color_at_step(step))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
