//! Configuration for the coverage gate.
//!
//! Options arrive as raw strings from three layers, highest precedence
//! first: command-line flags, environment variables (both resolved by clap),
//! and an optional `.covgate.toml`. [`parse_options`] turns the merged
//! strings into a typed [`GateConfig`], collecting a [`ConfigWarning`] for
//! every value it had to replace with a default.
//!
//! # Module Structure
//!
//! - `thresholds` - Typed configuration and defaults
//! - `options` - Raw option layer and the validating parser
//! - `loader` - `.covgate.toml` discovery and parsing
//! - `ci` - CI runner context (summary sink, event payload, API URL)
//!
//! [`ConfigWarning`]: crate::errors::ConfigWarning

pub mod ci;
pub mod loader;
pub mod options;
pub mod thresholds;

pub use ci::CiEnvironment;
pub use loader::{load_file_options, DEFAULT_CONFIG_FILE};
pub use options::{parse_options, RawOptions};
pub use thresholds::{FailStatus, GateConfig, ThresholdConfig, DEFAULT_COVERAGE_PATH};
