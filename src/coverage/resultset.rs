//! SimpleCov `.resultset.json` parsing.
//!
//! Expected shape:
//!
//! ```text
//! { "<run-id>": { "coverage": { "<path>": { "lines": [1, 0, null, ...] } } } }
//! ```
//!
//! Legacy SimpleCov reports store the line array directly under the path,
//! which is accepted as well.

use super::types::{CoverageReport, FileCoverage, RunResult};
use crate::errors::{GateError, LoadErrorKind};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read and parse the result set at `path`.
pub fn load_resultset(path: &Path) -> Result<CoverageReport, GateError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        GateError::load(
            LoadErrorKind::NotFound,
            format!("cannot read file ({e})"),
            path,
        )
    })?;
    parse_resultset(&contents, path)
}

/// Parse result set contents. `path` is only used for error messages.
pub fn parse_resultset(contents: &str, path: &Path) -> Result<CoverageReport, GateError> {
    if contents.trim().is_empty() {
        return Err(GateError::load(LoadErrorKind::Empty, "file is empty", path));
    }

    let document: Value = serde_json::from_str(contents)
        .map_err(|e| GateError::load(LoadErrorKind::Syntax, format!("invalid JSON ({e})"), path))?;

    let runs = document.as_object().ok_or_else(|| {
        GateError::load(
            LoadErrorKind::Shape,
            "top level must be an object keyed by run id",
            path,
        )
    })?;

    let run_ids: Vec<String> = runs.keys().cloned().collect();
    let selected_run_id = select_run_id(run_ids.iter().map(String::as_str))
        .map(str::to_string)
        .ok_or_else(|| GateError::load(LoadErrorKind::Empty, "report contains no runs", path))?;

    let coverage = runs
        .get(&selected_run_id)
        .and_then(|run| run.get("coverage"))
        .and_then(Value::as_object)
        .ok_or_else(|| {
            GateError::load(
                LoadErrorKind::Shape,
                format!("run '{selected_run_id}' has no 'coverage' object"),
                path,
            )
        })?;

    log::debug!(
        "Selected run '{}' out of {} run(s)",
        selected_run_id,
        run_ids.len()
    );

    Ok(CoverageReport::new(
        run_ids,
        selected_run_id,
        parse_run(coverage),
    ))
}

/// Pick the run to evaluate.
///
/// When every identifier is a non-negative integer the numerically largest
/// wins, otherwise the lexicographically greatest. Returns `None` for an
/// empty set.
pub fn select_run_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let ids: Vec<&str> = ids.into_iter().collect();

    let numeric: Option<Vec<(&str, &str)>> = ids
        .iter()
        .map(|id| numeric_key(id).map(|key| (key, *id)))
        .collect();

    match numeric {
        Some(keys) => keys
            .into_iter()
            .max_by(|(a, a_id), (b, b_id)| {
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.cmp(b))
                    .then_with(|| a_id.cmp(b_id))
            })
            .map(|(_, id)| id),
        None => ids.into_iter().max(),
    }
}

/// Digits with leading zeros removed, or `None` if `id` is not an integer.
///
/// Comparing by (length, digits) orders integers of any size without overflow.
fn numeric_key(id: &str) -> Option<&str> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = id.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0" } else { trimmed })
}

fn parse_run(coverage: &Map<String, Value>) -> RunResult {
    let files = coverage
        .iter()
        .filter_map(|(path, payload)| match line_entries(payload) {
            Some(entries) => Some(FileCoverage::new(
                path.clone(),
                entries.iter().map(parse_line_hits).collect(),
            )),
            None => {
                log::debug!("Skipping {path}: coverage payload has no line array");
                None
            }
        })
        .collect();

    RunResult { files }
}

fn line_entries(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Object(fields) => fields.get("lines").and_then(Value::as_array),
        Value::Array(entries) => Some(entries),
        _ => None,
    }
}

/// `null` and non-numeric markers (SimpleCov writes `"ignored"` for nocov
/// lines) are not executable.
fn parse_line_hits(entry: &Value) -> Option<u64> {
    let Value::Number(number) = entry else {
        return None;
    };
    if let Some(hits) = number.as_u64() {
        return Some(hits);
    }
    match number.as_f64() {
        Some(hits) if hits > 0.0 => Some(hits.ceil() as u64),
        _ => Some(0),
    }
}
