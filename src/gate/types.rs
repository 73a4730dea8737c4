//! Data types produced by evaluation.
//!
//! These are plain data; rendering lives in `report`.

use crate::coverage::FileTotals;
use crate::format::round2;

/// A file whose coverage is below the per-file minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct FailingUnit {
    pub name: String,
    /// Unrounded coverage percentage.
    pub coverage_percent: f64,
    pub executable_lines: usize,
    pub covered_lines: usize,
    /// Percentage points missing to reach the minimum, rounded to two
    /// decimals and never negative.
    pub missing: f64,
}

impl FailingUnit {
    pub fn new(file: &FileTotals, minimum_file_coverage: f64) -> Self {
        let coverage_percent = file.percent();
        Self {
            name: file.path.clone(),
            coverage_percent,
            executable_lines: file.executable_lines,
            covered_lines: file.covered_lines,
            missing: round2(minimum_file_coverage - coverage_percent).max(0.0),
        }
    }
}

/// Outcome of comparing one run against the configured thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub total_executable: usize,
    pub total_covered: usize,
    /// Unrounded; exactly `0.0` when nothing is executable.
    pub total_coverage: f64,
    /// Every file with executable lines, in encounter order.
    pub files: Vec<FileTotals>,
    /// Files below the per-file minimum, worst first.
    pub failing: Vec<FailingUnit>,
    /// Whether the total meets the suite minimum (ignores per-file results).
    pub suite_minimum_met: bool,
    /// Both gates passed.
    pub passed: bool,
}

/// Final status of one invocation, mapped to the process exit code by the
/// binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Passed,
    /// Coverage failed but `on_fail_status` is `warn`.
    FailedWarned,
    Failed,
}

impl GateStatus {
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Passed | Self::FailedWarned => 0,
            Self::Failed => 1,
        }
    }
}

/// Everything a completed pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub run_id: String,
    pub evaluation: EvaluationResult,
    pub status: GateStatus,
    pub summary_written: bool,
    pub comment_posted: bool,
}
