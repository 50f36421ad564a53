// ABOUTME: Error types for GitHub REST API calls
// ABOUTME: Separates transport failures, non-success statuses and undecodable bodies

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to parse GitHub response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GitHubApiError>;

impl GitHubApiError {
    /// Status code of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GitHubApiError::Status { status, .. } => Some(*status),
            GitHubApiError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}
