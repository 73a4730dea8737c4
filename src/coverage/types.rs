//! Core data types for SimpleCov result sets.
//!
//! All types are plain data built once per invocation from the parsed
//! report. Ordering is preserved from the input document.

/// Line hits for a single source file.
///
/// Each entry is `None` for a line that is not executable, `Some(0)` for an
/// executable line that was never run and `Some(n)` for a line run `n` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCoverage {
    pub path: String,
    pub lines: Vec<Option<u64>>,
}

impl FileCoverage {
    pub fn new(path: impl Into<String>, lines: Vec<Option<u64>>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Number of lines eligible for coverage measurement.
    pub fn executable_line_count(&self) -> usize {
        self.lines.iter().filter(|hits| hits.is_some()).count()
    }

    /// Number of executable lines run at least once.
    pub fn covered_line_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|hits| matches!(hits, Some(n) if *n > 0))
            .count()
    }
}

/// One coverage-collection session, files kept in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub files: Vec<FileCoverage>,
}

/// A parsed result set along with the run chosen for evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    /// Every run identifier found in the report, in document order.
    pub run_ids: Vec<String>,
    /// Identifier of the run selected for evaluation.
    pub selected_run_id: String,
    selected: RunResult,
}

impl CoverageReport {
    pub fn new(run_ids: Vec<String>, selected_run_id: String, selected: RunResult) -> Self {
        Self {
            run_ids,
            selected_run_id,
            selected,
        }
    }

    pub fn selected_run(&self) -> &RunResult {
        &self.selected
    }
}
