// ABOUTME: The resolve, fetch, filter and render pipeline behind the daylog command
// ABOUTME: Runs each stage once, in order, and stops at the first fatal error

use daylog_core::{filter_by_date, write_report, RenderSummary};
use daylog_github::{ActivityFeed, GitHubClient};
use std::io::Write;
use tracing::info;

use crate::config::{CliOptions, RunConfig};
use crate::error::DaylogError;

/// Resolves configuration, builds the GitHub client and runs the report.
///
/// Configuration is fully validated before any request is made.
pub async fn execute<W: Write>(options: CliOptions, out: &mut W) -> Result<RenderSummary, DaylogError> {
    let config = RunConfig::resolve(options)?;
    let client = GitHubClient::new(&config.credential, config.settings.client_options())
        .map_err(DaylogError::Client)?;

    run(&client, &config, out).await
}

/// Writes the markdown report for `config.date` to `out`.
pub async fn run<F, W>(feed: &F, config: &RunConfig, out: &mut W) -> Result<RenderSummary, DaylogError>
where
    F: ActivityFeed + ?Sized,
    W: Write,
{
    let login = feed
        .authenticated_user()
        .await
        .map_err(DaylogError::IdentityResolution)?;

    let events = feed
        .user_events(&login)
        .await
        .map_err(|source| DaylogError::Fetch {
            login: login.clone(),
            source,
        })?;

    let matching = filter_by_date(&events, &config.date);
    let summary = write_report(out, &config.date, &matching, &config.settings.web_host)?;
    out.flush()?;

    info!(
        "Rendered {} of {} events for {} on {} ({} skipped)",
        summary.rendered,
        events.len(),
        login,
        config.date,
        summary.skipped
    );
    Ok(summary)
}
