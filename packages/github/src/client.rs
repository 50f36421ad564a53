// ABOUTME: Authenticated GitHub REST client for the current user and their event feed
// ABOUTME: One GET per call, status checked before the body is decoded

use async_trait::async_trait;
use daylog_core::{Credential, FeedEvent};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::{GitHubApiError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Source of the two facts the report needs: who the caller is, and what they did.
#[async_trait]
pub trait ActivityFeed {
    /// Login of the account the credential belongs to.
    async fn authenticated_user(&self) -> Result<String>;

    /// First page of the user's public and private events, newest first.
    async fn user_events(&self, login: &str) -> Result<Vec<FeedEvent>>;
}

/// HTTP settings for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("daylog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// `GET /user` response, reduced to what we use
#[derive(Debug, Deserialize)]
struct AuthenticatedUser {
    login: String,
}

/// GitHub API error response
#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(credential: &Credential, options: ClientOptions) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {}", credential.expose()))
            .map_err(|_| {
                GitHubApiError::InvalidConfig("token contains invalid header characters".into())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent).map_err(|_| {
                GitHubApiError::InvalidConfig(format!(
                    "invalid user agent: {}",
                    options.user_agent
                ))
            })?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: options.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let response = check_status(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| GitHubApiError::ParseError(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl ActivityFeed for GitHubClient {
    async fn authenticated_user(&self) -> Result<String> {
        let user: AuthenticatedUser = self.get_json("/user").await?;
        debug!("Authenticated as {}", user.login);
        Ok(user.login)
    }

    async fn user_events(&self, login: &str) -> Result<Vec<FeedEvent>> {
        let events: Vec<FeedEvent> = self.get_json(&format!("/users/{}/events", login)).await?;
        debug!("Fetched {} events for {}", events.len(), login);
        Ok(events)
    }
}

/// Turns any non-2xx response into [`GitHubApiError::Status`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<GitHubErrorResponse>(&body) {
        Ok(error) => error.message,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(GitHubApiError::Status { status, message })
}
