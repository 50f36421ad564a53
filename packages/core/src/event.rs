// ABOUTME: Activity feed event wrapper with tolerant access to its loosely typed JSON
// ABOUTME: Classifies event payloads into the link target each event points at

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Per-event failure. The offending event is skipped, the run continues.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing or invalid field `{0}`")]
    MissingField(&'static str),

    #[error("invalid timestamp `{value}`: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("comment event has neither an issue nor a pull request")]
    MissingCommentSubject,
}

/// Event types that get a specific deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PullRequest,
    Issues,
    IssueComment,
    Other(String),
}

impl EventKind {
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            "IssueCommentEvent" => EventKind::IssueComment,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::IssueComment => "IssueCommentEvent",
            EventKind::Other(other) => other,
        }
    }
}

/// What an event links to, carrying only the fields needed for the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    PullRequest { number: u64 },
    Issue { number: u64 },
    IssueComment { issue_number: u64, comment_id: u64 },
    PullRequestComment { pull_number: u64, comment_id: u64 },
    Repository,
}

impl EventTarget {
    pub fn url(&self, host: &str, repo_name: &str) -> String {
        let base = format!("https://{}/{}", host, repo_name);
        match self {
            EventTarget::PullRequest { number } => format!("{}/pull/{}", base, number),
            EventTarget::Issue { number } => format!("{}/issues/{}", base, number),
            EventTarget::IssueComment {
                issue_number,
                comment_id,
            } => format!("{}/issues/{}#issuecomment-{}", base, issue_number, comment_id),
            EventTarget::PullRequestComment {
                pull_number,
                comment_id,
            } => format!("{}/pull/{}#issuecomment-{}", base, pull_number, comment_id),
            EventTarget::Repository => base,
        }
    }
}

/// One record from the events API, kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedEvent(Value);

impl FeedEvent {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Event id for diagnostics. The API sends it as a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn event_type(&self) -> Result<&str, RecordError> {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingField("type"))
    }

    pub fn kind(&self) -> Result<EventKind, RecordError> {
        self.event_type().map(EventKind::from_type)
    }

    pub fn repo_name(&self) -> Result<&str, RecordError> {
        self.0
            .get("repo")
            .and_then(|repo| repo.get("name"))
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingField("repo.name"))
    }

    /// Parses `created_at`, keeping the offset it was encoded with.
    pub fn created_at(&self) -> Result<DateTime<FixedOffset>, RecordError> {
        let value = self
            .0
            .get("created_at")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingField("created_at"))?;

        DateTime::parse_from_rfc3339(value).map_err(|source| RecordError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
    }

    pub fn target(&self) -> Result<EventTarget, RecordError> {
        let payload = self.0.get("payload");

        match self.kind()? {
            EventKind::PullRequest => {
                let number = integer_at(payload, &["pull_request", "number"])
                    .ok_or(RecordError::MissingField("payload.pull_request.number"))?;
                Ok(EventTarget::PullRequest { number })
            }
            EventKind::Issues => {
                let number = integer_at(payload, &["issue", "number"])
                    .ok_or(RecordError::MissingField("payload.issue.number"))?;
                Ok(EventTarget::Issue { number })
            }
            EventKind::IssueComment => {
                let comment_id = integer_at(payload, &["comment", "id"])
                    .ok_or(RecordError::MissingField("payload.comment.id"))?;

                // Issue wins when both sub-objects are present
                if is_object_at(payload, "issue") {
                    let issue_number = integer_at(payload, &["issue", "number"])
                        .ok_or(RecordError::MissingField("payload.issue.number"))?;
                    Ok(EventTarget::IssueComment {
                        issue_number,
                        comment_id,
                    })
                } else if is_object_at(payload, "pull_request") {
                    let pull_number = integer_at(payload, &["pull_request", "number"])
                        .ok_or(RecordError::MissingField("payload.pull_request.number"))?;
                    Ok(EventTarget::PullRequestComment {
                        pull_number,
                        comment_id,
                    })
                } else {
                    Err(RecordError::MissingCommentSubject)
                }
            }
            EventKind::Other(_) => Ok(EventTarget::Repository),
        }
    }
}

impl From<Value> for FeedEvent {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

fn is_object_at(payload: Option<&Value>, key: &str) -> bool {
    payload
        .and_then(|p| p.get(key))
        .map(Value::is_object)
        .unwrap_or(false)
}

/// Reads a non-negative integer, also accepting floats without a fractional part.
fn integer_at(payload: Option<&Value>, path: &[&str]) -> Option<u64> {
    let mut current = payload?;
    for key in path {
        current = current.get(key)?;
    }

    if let Some(n) = current.as_u64() {
        return Some(n);
    }
    current
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}
