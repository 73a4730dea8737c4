//! Reporting: CI annotations, the job summary and the pull request comment.
//!
//! - `annotations` - Diagnostic lines in workflow-command syntax (pure)
//! - `markdown` - Summary and comment rendering (pure)
//! - `summary` - Job summary sink (I/O)
//! - `comment` - Review API client and comment publishing (I/O)

pub mod annotations;
pub mod comment;
pub mod markdown;
pub mod summary;

pub use annotations::{config_warnings, debug_details, diagnostics, emit, Annotation, Level};
pub use comment::{
    parse_event, publish_comment, pull_request_context, CommentAction, ExistingComment,
    GitHubClient, PullRequestContext, ReviewClient,
};
pub use markdown::{render_comment, render_summary, COMMENT_MARKER};
pub use summary::write_step_summary;
