use daylog_github::GitHubApiError;
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal failures of a run. Per-event problems never surface here.
#[derive(Debug, Error)]
pub enum DaylogError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Failed to create GitHub client: {0}")]
    Client(#[source] GitHubApiError),

    #[error("Failed to resolve the authenticated user: {0}")]
    IdentityResolution(#[source] GitHubApiError),

    #[error("Failed to fetch events for {login}: {source}")]
    Fetch {
        login: String,
        #[source]
        source: GitHubApiError,
    },

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl DaylogError {
    /// Process exit status: 2 for usage problems, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            DaylogError::Configuration(_) => 2,
            _ => 1,
        }
    }

    pub fn is_missing_arguments(&self) -> bool {
        matches!(
            self,
            DaylogError::Configuration(ConfigError::MissingArguments(_))
        )
    }
}
