//! APCA target presets — named bundles of targets, and which one to use.
//!
//! Presets are convenience inputs. Asking for an unknown name or importing
//! malformed JSON gives `None` and a logged warning rather than an error.

use serde::{Deserialize, Serialize};
use tonal_color::Color;

use crate::autofix::{ApcaTarget, Priority};
use crate::error::Error;
use crate::scale::ColorScale;

/// A named list of APCA targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApcaPreset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub targets: Vec<ApcaTarget>,
}

const WHITE: &str = "#FFFFFF";
const BLACK: &str = "#000000";

/// Chroma above this reads as a UI accent scale.
pub const UI_CHROMA: f32 = 0.15;
/// Chroma below this reads as a neutral scale.
pub const NEUTRAL_CHROMA: f32 = 0.05;

/// Names of the builtin presets.
#[must_use]
pub const fn builtin_preset_names() -> &'static [&'static str] {
    &[
        "body-text-white",
        "body-text-black",
        "ui-white",
        "ui-black",
        "strict-white",
    ]
}

fn body_text(bg: &str) -> Vec<ApcaTarget> {
    vec![
        ApcaTarget::new(75.0, bg, Priority::Must).named("Body text"),
        ApcaTarget::new(60.0, bg, Priority::Should).named("Content text"),
    ]
}

fn ui(bg: &str) -> Vec<ApcaTarget> {
    vec![
        ApcaTarget::new(60.0, bg, Priority::Must).named("UI text"),
        ApcaTarget::new(45.0, bg, Priority::Should).named("Large text and icons"),
        ApcaTarget::new(30.0, bg, Priority::Nice).named("Non-text UI components"),
    ]
}

fn strict(bg: &str) -> Vec<ApcaTarget> {
    vec![
        ApcaTarget::new(90.0, bg, Priority::Must).named("Preferred body text"),
        ApcaTarget::new(75.0, bg, Priority::Should).named("Body text"),
        ApcaTarget::new(60.0, bg, Priority::Nice).named("Content text"),
    ]
}

fn builtin(name: &str) -> Option<ApcaPreset> {
    let (description, targets) = match name {
        "body-text-white" => ("Body text on a white page", body_text(WHITE)),
        "body-text-black" => ("Body text on a black page", body_text(BLACK)),
        "ui-white" => ("Interactive UI on white", ui(WHITE)),
        "ui-black" => ("Interactive UI on black", ui(BLACK)),
        "strict-white" => ("Long-form reading on white", strict(WHITE)),
        _ => return None,
    };
    Some(ApcaPreset {
        name: name.to_string(),
        description: description.to_string(),
        targets,
    })
}

/// Look up a builtin preset, as a `Result`.
pub fn try_apca_preset(name: &str) -> Result<ApcaPreset, Error> {
    builtin(&name.to_lowercase()).ok_or_else(|| Error::UnknownPreset(name.to_string()))
}

/// Look up a builtin preset by name (case-insensitive).
///
/// Unknown names log a warning and return `None`.
#[must_use]
pub fn apca_preset(name: &str) -> Option<ApcaPreset> {
    try_apca_preset(name)
        .map_err(|e| log::warn!("{e}"))
        .ok()
}

/// Recommend a builtin preset for a scale on `background`.
///
/// Vivid scales get the UI preset, neutral scales the strict one, and
/// everything else the body-text preset. The background's lightness picks
/// the white or black variant. There is no strict preset for dark pages, so
/// neutral scales on a dark background fall back to body text.
#[must_use]
pub fn recommend_apca_preset(scale: &ColorScale, background: &str) -> &'static str {
    let light = Color::hex_or_white(background).is_light();
    let chroma = scale.manual_chroma;

    if chroma > UI_CHROMA {
        if light { "ui-white" } else { "ui-black" }
    } else if chroma < NEUTRAL_CHROMA && light {
        "strict-white"
    } else if light {
        "body-text-white"
    } else {
        "body-text-black"
    }
}

/// Parse a preset from JSON.
pub fn parse_preset(json: &str) -> Result<ApcaPreset, Error> {
    let preset: ApcaPreset = serde_json::from_str(json)?;
    if preset.targets.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "preset {:?} has no targets",
            preset.name
        )));
    }
    Ok(preset)
}

/// Import a preset from JSON; malformed input logs a warning and yields `None`.
#[must_use]
pub fn import_preset(json: &str) -> Option<ApcaPreset> {
    match parse_preset(json) {
        Ok(preset) => Some(preset),
        Err(e) => {
            log::warn!("ignoring preset import: {e}");
            None
        }
    }
}

/// Serialize a preset as pretty-printed JSON.
pub fn export_preset(preset: &ApcaPreset) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(preset)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
