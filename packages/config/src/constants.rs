// ABOUTME: Environment variable name constants and their default values
// ABOUTME: Centralized definitions of every environment knob daylog reads

// Credentials
pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";

// GitHub endpoints
pub const DAYLOG_API_URL: &str = "DAYLOG_API_URL";
pub const DAYLOG_WEB_HOST: &str = "DAYLOG_WEB_HOST";

// HTTP client
pub const DAYLOG_HTTP_TIMEOUT_SECS: &str = "DAYLOG_HTTP_TIMEOUT_SECS";
pub const DAYLOG_HTTP_CONNECT_TIMEOUT_SECS: &str = "DAYLOG_HTTP_CONNECT_TIMEOUT_SECS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_WEB_HOST: &str = "github.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "debug";
