//! Pull request comment publishing.
//!
//! Posting is best effort: every failure is a `GateError::RemoteReport`
//! which the pipeline logs as a warning without changing the gate status.

use super::markdown::COMMENT_MARKER;
use crate::errors::GateError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const USER_AGENT: &str = concat!("covgate/", env!("CARGO_PKG_VERSION"));

/// Largest page size the comments endpoint accepts.
const PAGE_SIZE: u32 = 100;

/// Where a comment goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// `owner/name`
    pub repository: String,
    pub number: u64,
}

/// A comment already present on the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExistingComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created,
    Updated(u64),
}

/// Review-system operations needed to publish the gate comment.
pub trait ReviewClient {
    fn list_comments(&self, pr: &PullRequestContext) -> Result<Vec<ExistingComment>, GateError>;

    fn create_comment(&self, pr: &PullRequestContext, body: &str) -> Result<(), GateError>;

    fn update_comment(
        &self,
        pr: &PullRequestContext,
        comment_id: u64,
        body: &str,
    ) -> Result<(), GateError>;
}

/// Read the pull request context from the event payload file.
pub fn pull_request_context(event_path: Option<&Path>) -> Result<PullRequestContext, GateError> {
    let path = event_path
        .ok_or_else(|| GateError::remote_context("GITHUB_EVENT_PATH is not set"))?;
    let contents = fs::read_to_string(path).map_err(|e| {
        GateError::remote_context(format!("cannot read event file {}: {}", path.display(), e))
    })?;
    parse_event(&contents)
}

/// Pure function to extract the pull request context from an event payload.
pub fn parse_event(contents: &str) -> Result<PullRequestContext, GateError> {
    let event: Value = serde_json::from_str(contents)
        .map_err(|e| GateError::remote_context(format!("invalid event payload ({e})")))?;

    let number = pull_request_number(&event).ok_or_else(|| {
        GateError::remote_context("event is not associated with a pull request")
    })?;
    let repository = repository_name(&event)
        .ok_or_else(|| GateError::remote_context("event payload has no repository name"))?;

    Ok(PullRequestContext { repository, number })
}

fn pull_request_number(event: &Value) -> Option<u64> {
    if let Some(pr) = event.get("pull_request") {
        return pr
            .get("number")
            .or_else(|| event.get("number"))
            .and_then(Value::as_u64);
    }
    // Comments on pull requests arrive as issue events.
    event
        .get("issue")
        .filter(|issue| issue.get("pull_request").is_some())
        .and_then(|issue| issue.get("number"))
        .and_then(Value::as_u64)
}

fn repository_name(event: &Value) -> Option<String> {
    let repository = event.get("repository")?;
    if let Some(full_name) = repository.get("full_name").and_then(Value::as_str) {
        return Some(full_name.to_string());
    }
    let owner = repository
        .get("owner")
        .and_then(|owner| owner.get("login"))
        .and_then(Value::as_str)?;
    let name = repository.get("name").and_then(Value::as_str)?;
    Some(format!("{owner}/{name}"))
}

/// Create the gate comment, or edit the latest previous one when
/// `update_existing` is set and such a comment exists.
pub fn publish_comment(
    client: &dyn ReviewClient,
    pr: &PullRequestContext,
    body: &str,
    update_existing: bool,
) -> Result<CommentAction, GateError> {
    if update_existing {
        let previous = client
            .list_comments(pr)?
            .into_iter()
            .filter(|comment| {
                comment
                    .body
                    .as_deref()
                    .is_some_and(|b| b.contains(COMMENT_MARKER))
            })
            .last();

        if let Some(comment) = previous {
            client.update_comment(pr, comment.id, body)?;
            return Ok(CommentAction::Updated(comment.id));
        }
    }

    client.create_comment(pr, body)?;
    Ok(CommentAction::Created)
}

/// Pure: target of the `rel="next"` entry in a `Link` header.
fn next_page_url(link: &str) -> Option<String> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| param.trim() == r#"rel="next""#);
        is_next.then(|| {
            target
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_string()
        })
    })
}

/// GitHub REST implementation of [`ReviewClient`].
pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    fn comments_url(&self, pr: &PullRequestContext) -> String {
        format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_url, pr.repository, pr.number
        )
    }

    fn send(
        &self,
        request: ureq::Request,
        body: Option<Value>,
    ) -> Result<ureq::Response, GateError> {
        let request = request
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT)
            .set("Authorization", &format!("Bearer {}", self.token));

        let response = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| match e {
            ureq::Error::Status(code, response) => GateError::remote_request(format!(
                "{} returned HTTP {}",
                response.get_url(),
                code
            )),
            ureq::Error::Transport(transport) => GateError::remote_request(transport.to_string()),
        })?;

        if !(200..300).contains(&response.status()) {
            return Err(GateError::remote_request(format!(
                "{} returned HTTP {}",
                response.get_url(),
                response.status()
            )));
        }
        Ok(response)
    }
}

impl ReviewClient for GitHubClient {
    /// Every comment on the pull request, oldest first, following
    /// `rel="next"` pages.
    fn list_comments(&self, pr: &PullRequestContext) -> Result<Vec<ExistingComment>, GateError> {
        let mut comments = Vec::new();
        let mut next = Some(format!("{}?per_page={PAGE_SIZE}", self.comments_url(pr)));

        while let Some(url) = next {
            let response = self.send(self.agent.get(&url), None)?;
            next = response.header("link").and_then(next_page_url);
            let page = response
                .into_json::<Vec<ExistingComment>>()
                .map_err(|e| GateError::remote_request(format!("invalid comment list ({e})")))?;
            comments.extend(page);
        }

        log::debug!(
            "Found {} comment(s) on {}#{}",
            comments.len(),
            pr.repository,
            pr.number
        );
        Ok(comments)
    }

    fn create_comment(&self, pr: &PullRequestContext, body: &str) -> Result<(), GateError> {
        let request = self.agent.post(&self.comments_url(pr));
        self.send(request, Some(json!({ "body": body })))?;
        log::info!("Posted coverage comment on {}#{}", pr.repository, pr.number);
        Ok(())
    }

    fn update_comment(
        &self,
        pr: &PullRequestContext,
        comment_id: u64,
        body: &str,
    ) -> Result<(), GateError> {
        let url = format!(
            "{}/repos/{}/issues/comments/{}",
            self.api_url, pr.repository, comment_id
        );
        self.send(self.agent.request("PATCH", &url), Some(json!({ "body": body })))?;
        log::info!(
            "Updated coverage comment {} on {}#{}",
            comment_id,
            pr.repository,
            pr.number
        );
        Ok(())
    }
}
