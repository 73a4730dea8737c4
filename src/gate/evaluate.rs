//! Pure threshold evaluation.
//!
//! Both gates are independent: the total must reach the suite minimum and
//! no single file may fall below the file minimum. Comparisons use the
//! unrounded percentages.

use super::types::{EvaluationResult, FailingUnit};
use crate::config::ThresholdConfig;
use crate::coverage::Aggregate;

/// Pure: Check one file against the per-file minimum.
///
/// Coverage exactly equal to the minimum passes.
fn is_failing(percent: f64, minimum: f64) -> bool {
    percent < minimum
}

/// Pure: Compare aggregated coverage against the thresholds.
pub fn evaluate(aggregate: &Aggregate, thresholds: &ThresholdConfig) -> EvaluationResult {
    let total_coverage = aggregate.total_percent();

    let mut failing: Vec<FailingUnit> = aggregate
        .files
        .iter()
        .filter(|file| is_failing(file.percent(), thresholds.minimum_file_coverage))
        .map(|file| FailingUnit::new(file, thresholds.minimum_file_coverage))
        .collect();
    // Stable: equal percentages keep encounter order.
    failing.sort_by(|a, b| a.coverage_percent.total_cmp(&b.coverage_percent));

    let suite_minimum_met = total_coverage >= thresholds.minimum_suite_coverage;

    EvaluationResult {
        total_executable: aggregate.total_executable,
        total_covered: aggregate.total_covered,
        total_coverage,
        files: aggregate.files.clone(),
        passed: suite_minimum_met && failing.is_empty(),
        failing,
        suite_minimum_met,
    }
}
