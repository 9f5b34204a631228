//! Error type for the fallible edges of the crate.
//!
//! The analysis and optimization core has no error path. Only loading
//! user-editable inputs (configuration files, preset JSON) can fail, and the
//! convenience wrappers around those turn failures into `None` plus a warning.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
