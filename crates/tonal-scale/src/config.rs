//! Contrast configuration — the constant tables, made explicit.
//!
//! WCAG level thresholds, the APCA pass mark and the default step-label
//! table live in one [`ContrastConfig`] value. Callers build it once at
//! startup (from [`Default`] or a JSON file) and pass it by reference to
//! every function that needs it.
//!
//! ```json
//! {
//!   "wcag": { "aa_normal": 4.5, "aa_large": 3.0, "aaa_normal": 7.0, "aaa_large": 4.5 },
//!   "apca_pass": 60.0,
//!   "step_labels": [100, 90, 80, 70, 60, 50, 40, 30, 20, 15, 12, 10, 7, 5, 3, 0]
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default ordered step labels, lightest first.
pub const DEFAULT_STEP_LABELS: [f32; 16] = [
    100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0, 30.0, 20.0, 15.0, 12.0, 10.0, 7.0, 5.0, 3.0, 0.0,
];

/// WCAG 2 contrast-ratio thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcagThresholds {
    /// AA for normal-size text.
    pub aa_normal: f64,
    /// AA for large text; also the floor of level A.
    pub aa_large: f64,
    /// AAA for normal-size text.
    pub aaa_normal: f64,
    /// AAA for large text.
    pub aaa_large: f64,
}

impl Default for WcagThresholds {
    fn default() -> Self {
        Self {
            aa_normal: 4.5,
            aa_large: 3.0,
            aaa_normal: 7.0,
            aaa_large: 4.5,
        }
    }
}

/// Process-wide contrast configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    pub wcag: WcagThresholds,
    /// Minimum `|Lc|` for a pair to count as APCA-passing.
    pub apca_pass: f64,
    /// Ordered step labels on the 0–100 lightness scale.
    pub step_labels: Vec<f32>,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            wcag: WcagThresholds::default(),
            apca_pass: 60.0,
            step_labels: DEFAULT_STEP_LABELS.to_vec(),
        }
    }
}

impl ContrastConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "loaded contrast config from {} ({} step labels)",
            path.display(),
            config.step_labels.len()
        );
        Ok(config)
    }

    /// Check the invariants the analysis code relies on.
    pub fn validate(&self) -> Result<(), Error> {
        let w = &self.wcag;
        if !(1.0 <= w.aa_large && w.aa_large <= w.aa_normal && w.aa_normal <= w.aaa_normal) {
            return Err(Error::InvalidConfig(format!(
                "WCAG thresholds must satisfy 1 <= aa_large <= aa_normal <= aaa_normal, got {} / {} / {}",
                w.aa_large, w.aa_normal, w.aaa_normal
            )));
        }
        if !(w.aa_large <= w.aaa_large && w.aaa_large <= w.aaa_normal) {
            return Err(Error::InvalidConfig(format!(
                "WCAG thresholds must satisfy aa_large <= aaa_large <= aaa_normal, got {} / {} / {}",
                w.aa_large, w.aaa_large, w.aaa_normal
            )));
        }
        if !(0.0..=110.0).contains(&self.apca_pass) {
            return Err(Error::InvalidConfig(format!(
                "apca_pass must be within 0..=110, got {}",
                self.apca_pass
            )));
        }
        if self.step_labels.is_empty() {
            return Err(Error::InvalidConfig("step_labels is empty".into()));
        }
        if let Some(bad) = self.step_labels.iter().find(|l| !(0.0..=100.0).contains(*l)) {
            return Err(Error::InvalidConfig(format!(
                "step label {bad} is outside 0..=100"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_has_sixteen_labels() {
        let config = ContrastConfig::default();
        assert_eq!(config.step_labels.len(), 16);
        assert_eq!(config.step_labels.first(), Some(&100.0));
        assert_eq!(config.step_labels.last(), Some(&0.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_is_default() {
        let config = ContrastConfig::from_json("{}").unwrap();
        assert_eq!(config, ContrastConfig::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            ContrastConfig::from_json(r#"{ "apca_pass": 75, "wcag": { "aaa_normal": 8.0 } }"#)
                .unwrap();
        assert_eq!(config.apca_pass, 75.0);
        assert_eq!(config.wcag.aaa_normal, 8.0);
        assert_eq!(config.wcag.aa_normal, 4.5);
        assert_eq!(config.step_labels.len(), 16);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            ContrastConfig::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn unordered_thresholds_rejected() {
        let err = ContrastConfig::from_json(r#"{ "wcag": { "aa_normal": 2.0 } }"#);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn large_text_aaa_must_sit_between_aa_large_and_aaa() {
        let below = ContrastConfig::from_json(r#"{ "wcag": { "aaa_large": 2.5 } }"#);
        assert!(matches!(below, Err(Error::InvalidConfig(_))));
        let above = ContrastConfig::from_json(r#"{ "wcag": { "aaa_large": 7.5 } }"#);
        assert!(matches!(above, Err(Error::InvalidConfig(_))));
        let config = ContrastConfig::from_json(r#"{ "wcag": { "aaa_large": 6.0 } }"#).unwrap();
        assert_eq!(config.wcag.aaa_large, 6.0);
    }

    #[test]
    fn out_of_range_label_rejected() {
        let err = ContrastConfig::from_json(r#"{ "step_labels": [100, 120] }"#);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ContrastConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(err, Err(Error::Io { .. })));
    }
}
