use std::fmt;
use std::path::PathBuf;

/// Default location of the SimpleCov result set.
pub const DEFAULT_COVERAGE_PATH: &str = "coverage/.resultset.json";

/// What a failed evaluation does to the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailStatus {
    /// Exit non-zero.
    #[default]
    Fail,
    /// Emit a warning and exit zero.
    Warn,
}

impl fmt::Display for FailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// Coverage minimums and behavioural flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdConfig {
    /// Minimum aggregate coverage percentage, in `[0, 100]`.
    pub minimum_suite_coverage: f64,
    /// Minimum per-file coverage percentage, in `[0, 100]`.
    pub minimum_file_coverage: f64,
    pub on_fail: FailStatus,
    pub post_comment: bool,
    /// Edit the previous gate comment instead of adding a new one.
    pub update_comment: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            minimum_suite_coverage: 0.0,
            minimum_file_coverage: 0.0,
            on_fail: FailStatus::Fail,
            post_comment: false,
            update_comment: true,
        }
    }
}

impl ThresholdConfig {
    pub fn with_minimums(suite: f64, file: f64) -> Self {
        Self {
            minimum_suite_coverage: suite,
            minimum_file_coverage: file,
            ..Self::default()
        }
    }
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct GateConfig {
    pub thresholds: ThresholdConfig,
    pub coverage_path: PathBuf,
    pub debug_mode: bool,
    pub github_token: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdConfig::default(),
            coverage_path: PathBuf::from(DEFAULT_COVERAGE_PATH),
            debug_mode: false,
            github_token: None,
        }
    }
}
