//! Markdown rendering for the job summary and the pull request comment.

use crate::config::{CiEnvironment, ThresholdConfig};
use crate::format::percent;
use crate::gate::EvaluationResult;

/// Hidden marker identifying comments written by the gate, used to find the
/// previous comment when updating.
pub const COMMENT_MARKER: &str = "<!-- covgate-report -->";

/// Summary document: total coverage table plus either the failing files or
/// a success line.
pub fn render_summary(
    result: &EvaluationResult,
    thresholds: &ThresholdConfig,
    ci: &CiEnvironment,
) -> String {
    let mut lines = vec![
        "## Coverage report".to_string(),
        String::new(),
        "| Metric | Expected | Actual |".to_string(),
        "|--------|----------|--------|".to_string(),
        format!(
            "| Total coverage | {} | {} |",
            percent(thresholds.minimum_suite_coverage),
            percent(result.total_coverage)
        ),
        String::new(),
    ];

    if result.failing.is_empty() {
        lines.push(format!(
            "All files meet the minimum file coverage of {}.",
            percent(thresholds.minimum_file_coverage)
        ));
    } else {
        lines.push(format!(
            "### {} file(s) below the minimum coverage",
            result.failing.len()
        ));
        lines.push(String::new());
        lines.push("| File | Expected | Actual | Missing |".to_string());
        lines.push("|------|----------|--------|---------|".to_string());
        lines.extend(result.failing.iter().map(|unit| {
            format!(
                "| {} | {} | {} | {} |",
                escape_cell(&ci.display_path(&unit.name)),
                percent(thresholds.minimum_file_coverage),
                percent(unit.coverage_percent),
                percent(unit.missing),
            )
        }));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Comment body: marker, pass/fail banner, then the summary.
pub fn render_comment(
    result: &EvaluationResult,
    thresholds: &ThresholdConfig,
    ci: &CiEnvironment,
) -> String {
    let banner = if result.passed {
        "### :white_check_mark: Coverage check passed"
    } else {
        "### :x: Coverage check failed"
    };

    format!(
        "{COMMENT_MARKER}\n{banner}\n\n{}",
        render_summary(result, thresholds, ci)
    )
}

fn escape_cell(value: &str) -> String {
    format!("`{}`", value.replace('|', "\\|").replace('`', "'"))
}
