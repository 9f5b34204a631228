//! # tonal-scale — perceptual color scales with contrast verification
//!
//! Generates lightness-stepped color scales in OKLCH and checks them against
//! WCAG 2 contrast ratios and APCA lightness contrast (Lc). When a scale
//! misses its accessibility targets, the auto-fix optimizer searches new
//! lightness values per step until the targets are met.
//!
//! # Architecture
//!
//! ```text
//! ColorScale + step labels
//!     │
//!     ▼
//! generator.rs: one OKLCH color per step (+ contrast on white/gray/black)
//!     │
//!     ├──▶ matrix.rs:  every ordered (foreground, background) pair
//!     │        │
//!     │        ▼
//!     │    filter.rs:  threshold filtering, badge rankings
//!     │        │
//!     │        ▼
//!     │    advisor.rs: usage tiers, warnings, best pairings
//!     │
//!     └──▶ autofix.rs: binary search on lightness per step against the
//!                      highest-priority APCA target (metric.rs in the loop)
//! ```
//!
//! Every function is pure: inputs in, new values out. Configuration
//! ([`ContrastConfig`]) is built once by the caller and passed by reference.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Step labels, counts and lightness mix f32/f64/usize freely.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
#![allow(clippy::module_name_repetitions)]

pub mod advisor;
pub mod autofix;
pub mod config;
pub mod curve;
pub mod error;
pub mod filter;
pub mod generator;
pub mod matrix;
pub mod metric;
pub mod preset;
pub mod scale;

pub use autofix::{ApcaTarget, AutoFixOptions, AutoFixResult, Priority, auto_fix};
pub use config::{ContrastConfig, WcagThresholds};
pub use error::Error;
pub use generator::ScaleColor;
pub use matrix::ContrastPair;
pub use scale::{ColorScale, ContrastMode, TargetBackground};
