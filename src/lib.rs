// Export modules for library usage
pub mod cli;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod format;
pub mod gate;
pub mod report;

// Re-export commonly used types
pub use crate::config::{
    parse_options, CiEnvironment, FailStatus, GateConfig, RawOptions, ThresholdConfig,
};

pub use crate::coverage::{
    aggregate, load_resultset, select_run_id, Aggregate, CoverageReport, FileCoverage,
    FileTotals, RunResult,
};

pub use crate::errors::{ConfigWarning, ErrorCode, GateError};

pub use crate::gate::{
    evaluate, run_gate, EvaluationResult, FailingUnit, GateOutcome, GateStatus,
};

pub use crate::report::{Annotation, GitHubClient, Level, ReviewClient};
