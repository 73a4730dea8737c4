//! CI diagnostics rendered as GitHub workflow commands.
//!
//! ```text
//! ::error file=lib/user.rb,line=1,title=Insufficient coverage::Coverage 40.00% is below ...
//! ```
//!
//! Informational lines are printed verbatim, every other level becomes a
//! `::<level>::` command so the runner can surface and attach it. Command
//! text is percent-escaped (`50%` is written as `50%25`) and decoded by the
//! runner.

use crate::config::{CiEnvironment, ThresholdConfig};
use crate::coverage::CoverageReport;
use crate::errors::{ConfigWarning, GateError};
use crate::format::percent;
use crate::gate::EvaluationResult;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
}

impl Level {
    fn command(self) -> Option<&'static str> {
        match self {
            Self::Debug => Some("debug"),
            Self::Info => None,
            Self::Notice => Some("notice"),
            Self::Warning => Some("warning"),
            Self::Error => Some("error"),
        }
    }
}

/// One diagnostic line, optionally attached to a file location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub level: Level,
    pub message: String,
    pub title: Option<String>,
    pub file: Option<String>,
    pub line: Option<usize>,
}

impl Annotation {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            title: None,
            file: None,
            line: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Level::Debug, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::new(Level::Notice, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(command) = self.level.command() else {
            return write!(f, "{}", self.message);
        };

        let properties: Vec<String> = [
            ("file", self.file.clone()),
            ("line", self.line.map(|l| l.to_string())),
            ("title", self.title.clone()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", escape_property(&v))))
        .collect();

        if properties.is_empty() {
            write!(f, "::{command}::{}", escape_data(&self.message))
        } else {
            write!(
                f,
                "::{command} {}::{}",
                properties.join(","),
                escape_data(&self.message)
            )
        }
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Write each annotation on its own line.
pub fn emit<W: Write>(out: &mut W, annotations: &[Annotation]) -> Result<(), GateError> {
    annotations
        .iter()
        .try_for_each(|annotation| writeln!(out, "{annotation}"))
        .map_err(|e| GateError::io(e, "<stdout>"))
}

/// One warning per rejected configuration value.
pub fn config_warnings(warnings: &[ConfigWarning]) -> Vec<Annotation> {
    warnings
        .iter()
        .map(|warning| Annotation::warning(warning.to_string()).titled("Invalid configuration"))
        .collect()
}

/// The diagnostic sequence for an evaluation: expected vs actual, the
/// overall verdict, one error per failing file, and a rollup count.
pub fn diagnostics(
    result: &EvaluationResult,
    thresholds: &ThresholdConfig,
    ci: &CiEnvironment,
) -> Vec<Annotation> {
    let mut lines = vec![Annotation::info(format!(
        "Total coverage: expected at least {}, actual {} ({} of {} lines covered)",
        percent(thresholds.minimum_suite_coverage),
        percent(result.total_coverage),
        result.total_covered,
        result.total_executable,
    ))];

    lines.push(if result.passed {
        Annotation::notice(format!(
            "Coverage check passed with {} total coverage",
            percent(result.total_coverage)
        ))
    } else {
        Annotation::error(failure_reason(result, thresholds)).titled("Coverage check failed")
    });

    lines.extend(result.failing.iter().map(|unit| {
        Annotation::error(format!(
            "Coverage {} is below the minimum of {} (missing {})",
            percent(unit.coverage_percent),
            percent(thresholds.minimum_file_coverage),
            percent(unit.missing),
        ))
        .titled("Insufficient coverage")
        .at(ci.display_path(&unit.name), 1)
    }));

    if !result.failing.is_empty() {
        lines.push(Annotation::error(format!(
            "{} file(s) below the minimum file coverage of {}",
            result.failing.len(),
            percent(thresholds.minimum_file_coverage),
        )));
    }

    lines
}

fn failure_reason(result: &EvaluationResult, thresholds: &ThresholdConfig) -> String {
    let mut reasons = Vec::new();
    if !result.suite_minimum_met {
        reasons.push(format!(
            "total coverage {} is below the minimum of {}",
            percent(result.total_coverage),
            percent(thresholds.minimum_suite_coverage),
        ));
    }
    if !result.failing.is_empty() {
        reasons.push(format!(
            "{} file(s) below {}",
            result.failing.len(),
            percent(thresholds.minimum_file_coverage),
        ));
    }
    format!("Coverage check failed: {}", reasons.join("; "))
}

/// Extra detail emitted when `debug_mode` is on.
pub fn debug_details(
    report: &CoverageReport,
    result: &EvaluationResult,
    thresholds: &ThresholdConfig,
) -> Vec<Annotation> {
    let mut lines = vec![
        Annotation::debug(format!(
            "Selected run '{}' out of {} run(s): {}",
            report.selected_run_id,
            report.run_ids.len(),
            report.run_ids.join(", "),
        )),
        Annotation::debug(format!(
            "Thresholds: suite {}, file {}, on fail: {}",
            percent(thresholds.minimum_suite_coverage),
            percent(thresholds.minimum_file_coverage),
            thresholds.on_fail,
        )),
    ];

    let skipped = report.selected_run().files.len() - result.files.len();
    if skipped > 0 {
        lines.push(Annotation::debug(format!(
            "Skipped {skipped} file(s) without executable lines"
        )));
    }

    lines.extend(result.files.iter().map(|file| {
        Annotation::debug(format!(
            "{}: {} of {} lines covered ({})",
            file.path,
            file.covered_lines,
            file.executable_lines,
            percent(file.percent()),
        ))
    }));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{aggregate, FileCoverage, RunResult};
    use crate::gate::evaluate;
    use pretty_assertions::assert_eq;

    fn scenario(file_minimum: f64) -> (EvaluationResult, ThresholdConfig) {
        let run = RunResult {
            files: vec![FileCoverage::new("a.rb", vec![Some(1), Some(1), Some(0), None])],
        };
        let thresholds = ThresholdConfig::with_minimums(50.0, file_minimum);
        (evaluate(&aggregate(&run), &thresholds), thresholds)
    }

    fn rendered(annotations: &[Annotation]) -> Vec<String> {
        annotations.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_passing_diagnostics() {
        let (result, thresholds) = scenario(50.0);
        let lines = rendered(&diagnostics(&result, &thresholds, &CiEnvironment::default()));

        assert_eq!(
            lines,
            vec![
                "Total coverage: expected at least 50.00%, actual 66.67% (2 of 3 lines covered)",
                "::notice::Coverage check passed with 66.67%25 total coverage",
            ]
        );
    }

    #[test]
    fn test_failing_file_diagnostics() {
        let (result, thresholds) = scenario(90.0);
        let lines = rendered(&diagnostics(&result, &thresholds, &CiEnvironment::default()));

        assert_eq!(
            lines,
            vec![
                "Total coverage: expected at least 50.00%, actual 66.67% (2 of 3 lines covered)",
                "::error title=Coverage check failed::Coverage check failed: 1 file(s) below 90.00%25",
                "::error file=a.rb,line=1,title=Insufficient coverage::Coverage 66.67%25 is below the minimum of 90.00%25 (missing 23.33%25)",
                "::error::1 file(s) below the minimum file coverage of 90.00%25",
            ]
        );
    }

    #[test]
    fn test_suite_failure_reason() {
        let run = RunResult {
            files: vec![FileCoverage::new("a.rb", vec![Some(0), Some(1)])],
        };
        let thresholds = ThresholdConfig::with_minimums(80.0, 0.0);
        let result = evaluate(&aggregate(&run), &thresholds);
        let lines = diagnostics(&result, &thresholds, &CiEnvironment::default());

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].level, Level::Error);
        assert_eq!(
            lines[1].message,
            "Coverage check failed: total coverage 50.00% is below the minimum of 80.00%"
        );
    }

    #[test]
    fn test_file_annotations_use_workspace_relative_paths() {
        let run = RunResult {
            files: vec![FileCoverage::new("/ws/app/models/user.rb", vec![Some(0)])],
        };
        let thresholds = ThresholdConfig::with_minimums(0.0, 10.0);
        let result = evaluate(&aggregate(&run), &thresholds);
        let ci = CiEnvironment {
            workspace: Some("/ws".into()),
            ..CiEnvironment::default()
        };

        let lines = diagnostics(&result, &thresholds, &ci);
        assert_eq!(lines[2].file.as_deref(), Some("app/models/user.rb"));
    }

    #[test]
    fn test_message_escaping() {
        let annotation = Annotation::warning("50% done\nnext line\r");
        assert_eq!(annotation.to_string(), "::warning::50%25 done%0Anext line%0D");
    }

    #[test]
    fn test_property_escaping() {
        let annotation = Annotation::error("boom").at("C:\\a,b.rb", 3);
        assert_eq!(annotation.to_string(), "::error file=C%3A\\a%2Cb.rb,line=3::boom");
    }

    #[test]
    fn test_emit_writes_one_line_each() {
        let mut out = Vec::new();
        emit(
            &mut out,
            &[Annotation::info("a"), Annotation::error("b")],
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\n::error::b\n");
    }

    #[test]
    fn test_config_warnings_render_as_warnings() {
        let lines = config_warnings(&[ConfigWarning::new("debug_mode", "expected a boolean")]);
        assert_eq!(
            lines[0].to_string(),
            "::warning title=Invalid configuration::debug_mode: expected a boolean"
        );
    }

    #[test]
    fn test_info_is_plain() {
        assert_eq!(Annotation::info("hello").to_string(), "hello");
        assert_eq!(Annotation::debug("x").to_string(), "::debug::x");
    }

    #[test]
    fn test_debug_details_list_files_and_runs() {
        let report = CoverageReport::new(
            vec!["1".into(), "2".into()],
            "2".into(),
            RunResult {
                files: vec![
                    FileCoverage::new("a.rb", vec![Some(1), Some(0)]),
                    FileCoverage::new("blank.rb", vec![None]),
                ],
            },
        );
        let thresholds = ThresholdConfig::default();
        let result = evaluate(&aggregate(report.selected_run()), &thresholds);

        let lines = rendered(&debug_details(&report, &result, &thresholds));
        assert_eq!(
            lines,
            vec![
                "::debug::Selected run '2' out of 2 run(s): 1, 2",
                "::debug::Thresholds: suite 0.00%25, file 0.00%25, on fail: fail",
                "::debug::Skipped 1 file(s) without executable lines",
                "::debug::a.rb: 1 of 2 lines covered (50.00%25)",
            ]
        );
    }
}
