// ABOUTME: Markdown rendering of filtered feed events with deep links
// ABOUTME: Streams one bullet per event after an unconditional date header

use std::fmt;
use std::io::{self, Write};
use tracing::warn;

use crate::date::TargetDate;
use crate::event::{FeedEvent, RecordError};

/// One bullet of the report: `- <type> - [<repo>](<url>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub event_type: String,
    pub repo_name: String,
    pub url: String,
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} - [{}]({})", self.event_type, self.repo_name, self.url)
    }
}

/// Counts from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
}

pub fn report_header(date: &TargetDate) -> String {
    format!("## GitHub activity for {}", date)
}

/// Classifies one event and builds its line against the given web host.
pub fn render_event(event: &FeedEvent, host: &str) -> Result<RenderedLine, RecordError> {
    let repo_name = event.repo_name()?;
    let event_type = event.event_type()?;
    let target = event.target()?;

    Ok(RenderedLine {
        event_type: event_type.to_string(),
        repo_name: repo_name.to_string(),
        url: target.url(host, repo_name),
    })
}

/// Writes the header, a blank line, then one bullet per renderable event.
///
/// Events that cannot be rendered are logged and skipped. Only write
/// failures end the pass early.
pub fn write_report<W: Write>(
    writer: &mut W,
    date: &TargetDate,
    events: &[&FeedEvent],
    host: &str,
) -> io::Result<RenderSummary> {
    let mut summary = RenderSummary::default();

    writeln!(writer, "{}", report_header(date))?;
    writeln!(writer)?;

    for event in events {
        match render_event(event, host) {
            Ok(line) => {
                writeln!(writer, "{}", line)?;
                summary.rendered += 1;
            }
            Err(e) => {
                warn!("Skipping event {}: {}", event.id().unwrap_or("<no id>"), e);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}
