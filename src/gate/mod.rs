//! The coverage gate pipeline.
//!
//! Load → aggregate → evaluate → report, once per invocation. The pipeline
//! is a plain function returning a [`GateOutcome`]; mapping the status to a
//! process exit code is left to the binary.
//!
//! # Module Structure
//!
//! - `types` - Evaluation results and status (pure data)
//! - `evaluate` - Threshold comparison (pure)

pub mod evaluate;
pub mod types;

pub use evaluate::evaluate;
pub use types::{EvaluationResult, FailingUnit, GateOutcome, GateStatus};

use crate::config::{CiEnvironment, FailStatus, GateConfig};
use crate::coverage::{aggregate, load_resultset};
use crate::errors::GateError;
use crate::report::{
    debug_details, diagnostics, emit, publish_comment, pull_request_context, render_comment,
    render_summary, write_step_summary, Annotation, CommentAction, ReviewClient,
};
use std::io::Write;

/// Run the gate once, writing diagnostics to `out`.
///
/// `review` is only consulted when comment posting is enabled.
///
/// # Errors
///
/// Fatal errors only: the report cannot be loaded, or the job summary or
/// diagnostics cannot be written. The summary is written before any
/// diagnostics, so a summary failure leaves `out` untouched. Comment
/// failures are reported as warnings on `out` and never returned.
pub fn run_gate<W: Write>(
    config: &GateConfig,
    ci: &CiEnvironment,
    review: Option<&dyn ReviewClient>,
    out: &mut W,
) -> Result<GateOutcome, GateError> {
    let report = load_resultset(&config.coverage_path)?;
    let evaluation = evaluate(&aggregate(report.selected_run()), &config.thresholds);
    log::debug!(
        "Evaluated {} file(s): total {:.4}%, {} failing",
        evaluation.files.len(),
        evaluation.total_coverage,
        evaluation.failing.len()
    );

    // The summary goes first: if it cannot be written nothing has been
    // reported yet.
    let summary_written =
        write_step_summary(ci, &render_summary(&evaluation, &config.thresholds, ci))?;

    if config.debug_mode {
        emit(out, &debug_details(&report, &evaluation, &config.thresholds))?;
    }
    emit(out, &diagnostics(&evaluation, &config.thresholds, ci))?;

    let comment_posted = match post_comment(config, ci, review, &evaluation) {
        Ok(posted) => posted,
        Err(e) if !e.is_fatal() => {
            log::warn!("{e}");
            emit(out, &[Annotation::warning(e.to_string())])?;
            false
        }
        Err(e) => return Err(e),
    };

    let status = match (evaluation.passed, config.thresholds.on_fail) {
        (true, _) => GateStatus::Passed,
        (false, FailStatus::Warn) => {
            emit(
                out,
                &[Annotation::warning(
                    "Coverage check failed, but on_fail_status is 'warn'; not failing the build",
                )],
            )?;
            GateStatus::FailedWarned
        }
        (false, FailStatus::Fail) => GateStatus::Failed,
    };

    Ok(GateOutcome {
        run_id: report.selected_run_id,
        evaluation,
        status,
        summary_written,
        comment_posted,
    })
}

/// Publish the comment when enabled. `Ok(false)` means posting is off.
fn post_comment(
    config: &GateConfig,
    ci: &CiEnvironment,
    review: Option<&dyn ReviewClient>,
    evaluation: &EvaluationResult,
) -> Result<bool, GateError> {
    if !config.thresholds.post_comment {
        return Ok(false);
    }
    let client =
        review.ok_or_else(|| GateError::remote_context("no review client is configured"))?;
    let pr = pull_request_context(ci.event_path.as_deref())?;
    let body = render_comment(evaluation, &config.thresholds, ci);

    match publish_comment(client, &pr, &body, config.thresholds.update_comment)? {
        CommentAction::Created => log::debug!("Created comment on {}#{}", pr.repository, pr.number),
        CommentAction::Updated(id) => log::debug!("Updated comment {id}"),
    }
    Ok(true)
}
