use daylog_config::constants::{
    DAYLOG_API_URL, DAYLOG_HTTP_CONNECT_TIMEOUT_SECS, DAYLOG_HTTP_TIMEOUT_SECS, DAYLOG_WEB_HOST,
    DEFAULT_API_URL, DEFAULT_HTTP_CONNECT_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_WEB_HOST, GITHUB_TOKEN,
};
use daylog_core::{Credential, DateParseError, TargetDate};
use daylog_github::ClientOptions;
use std::env;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required option(s): {}", .0.join(", "))]
    MissingArguments(Vec<&'static str>),
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] DateParseError),
    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("Invalid API URL `{url}`: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("Invalid web host `{0}`: expected a bare host name such as github.com")]
    InvalidWebHost(String),
}

/// Raw values collected from the command line, before validation.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub token: Option<String>,
    pub date: Option<String>,
    pub api_url: Option<String>,
    pub web_host: Option<String>,
}

/// Where to talk to and how long to wait.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub web_host: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Settings {
    /// Flags win over environment variables, which win over defaults.
    pub fn resolve(api_url: Option<String>, web_host: Option<String>) -> Result<Self, ConfigError> {
        let api_url = api_url
            .or_else(|| non_empty_var(DAYLOG_API_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = validate_api_url(&api_url)?;

        let web_host = web_host
            .or_else(|| non_empty_var(DAYLOG_WEB_HOST))
            .unwrap_or_else(|| DEFAULT_WEB_HOST.to_string());
        let web_host = validate_web_host(&web_host)?;

        let request_timeout = timeout_from_env(DAYLOG_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?;
        let connect_timeout = timeout_from_env(
            DAYLOG_HTTP_CONNECT_TIMEOUT_SECS,
            DEFAULT_HTTP_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Settings {
            api_url,
            web_host,
            request_timeout,
            connect_timeout,
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_url: self.api_url.clone(),
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
            ..ClientOptions::default()
        }
    }
}

/// Everything one run needs, fixed before the first request goes out.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credential: Credential,
    pub date: TargetDate,
    pub settings: Settings,
}

impl RunConfig {
    pub fn resolve(options: CliOptions) -> Result<Self, ConfigError> {
        let credential = options
            .token
            .or_else(|| non_empty_var(GITHUB_TOKEN))
            .and_then(|token| Credential::new(token));
        let date = options.date.filter(|d| !d.trim().is_empty());

        let mut missing = Vec::new();
        if credential.is_none() {
            missing.push("--token");
        }
        if date.is_none() {
            missing.push("--date");
        }

        let (credential, date) = match (credential, date) {
            (Some(credential), Some(date)) => (credential, date),
            _ => return Err(ConfigError::MissingArguments(missing)),
        };

        let date: TargetDate = date.parse()?;
        let settings = Settings::resolve(options.api_url, options.web_host)?;

        Ok(RunConfig {
            credential,
            date,
            settings,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn timeout_from_env(name: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    let secs = match non_empty_var(name) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { name, source })?,
        None => default_secs,
    };

    if secs == 0 {
        return Err(ConfigError::ZeroTimeout(name));
    }
    Ok(Duration::from_secs(secs))
}

fn validate_api_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed"));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn validate_web_host(raw: &str) -> Result<String, ConfigError> {
    let host = raw.trim();
    let parsed = Url::parse(&format!("https://{}", host)).ok();
    let bare = parsed
        .as_ref()
        .map(|url| url.host_str().is_some() && url.path() == "/" && url.query().is_none())
        .unwrap_or(false);

    if host.is_empty() || host.contains("://") || host.contains('/') || !bare {
        return Err(ConfigError::InvalidWebHost(raw.to_string()));
    }
    Ok(host.to_string())
}
