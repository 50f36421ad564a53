// ABOUTME: GitHub REST API access for daylog
// ABOUTME: Resolves the authenticated login and fetches that user's activity feed

pub mod client;
pub mod error;

pub use client::{ActivityFeed, ClientOptions, GitHubClient};
pub use error::{GitHubApiError, Result};
pub use reqwest::StatusCode;
