// ABOUTME: Core types, date filtering and markdown rendering for daylog
// ABOUTME: Foundational package shared by the GitHub client and the CLI pipeline

pub mod credential;
pub mod date;
pub mod event;
pub mod filter;
pub mod render;

// Re-export main types
pub use credential::Credential;
pub use date::{DateParseError, TargetDate};
pub use event::{EventKind, EventTarget, FeedEvent, RecordError};

// Re-export pipeline stages
pub use filter::filter_by_date;
pub use render::{render_event, report_header, write_report, RenderSummary, RenderedLine};
