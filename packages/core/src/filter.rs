// ABOUTME: Keeps the feed events whose creation timestamp falls on the target day
// ABOUTME: Unparseable timestamps are logged and skipped, never fatal

use tracing::{debug, warn};

use crate::date::TargetDate;
use crate::event::FeedEvent;

/// Returns the events created on `date`, in their original order.
///
/// The calendar day is taken in the offset the timestamp was encoded with;
/// it is not normalized to UTC or to the local timezone.
pub fn filter_by_date<'a>(events: &'a [FeedEvent], date: &TargetDate) -> Vec<&'a FeedEvent> {
    let matching: Vec<&FeedEvent> = events
        .iter()
        .enumerate()
        .filter(|(index, event)| match event.created_at() {
            Ok(created_at) => created_at.date_naive() == date.as_naive(),
            Err(e) => {
                warn!(
                    "Skipping event {}: {}",
                    event.id().map(str::to_string).unwrap_or_else(|| format!("#{}", index)),
                    e
                );
                false
            }
        })
        .map(|(_, event)| event)
        .collect();

    debug!(
        "{} of {} events fall on {}",
        matching.len(),
        events.len(),
        date
    );
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn event(id: &str, created_at: &str) -> FeedEvent {
        FeedEvent::new(json!({
            "id": id,
            "type": "PushEvent",
            "created_at": created_at,
            "repo": { "name": "acme/widgets" },
        }))
    }

    fn ids(events: &[&FeedEvent]) -> Vec<String> {
        events
            .iter()
            .map(|e| e.id().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_keeps_only_matching_day_in_order() {
        let events = vec![
            event("5", "2023-01-03T09:00:00Z"),
            event("4", "2023-01-02T18:00:00Z"),
            event("3", "2023-01-02T08:00:00Z"),
            event("2", "2023-01-01T23:59:59Z"),
            event("1", "2023-01-02T00:00:00Z"),
        ];
        let date: TargetDate = "2023-01-02".parse().unwrap();

        assert_eq!(ids(&filter_by_date(&events, &date)), vec!["4", "3", "1"]);
    }

    #[test]
    fn test_uses_encoded_offset_not_utc() {
        // 2023-01-02T03:00Z, but the 1st in the encoded -05:00 offset
        let events = vec![event("1", "2023-01-01T22:00:00-05:00")];

        let first: TargetDate = "2023-01-01".parse().unwrap();
        let second: TargetDate = "2023-01-02".parse().unwrap();

        assert_eq!(filter_by_date(&events, &first).len(), 1);
        assert!(filter_by_date(&events, &second).is_empty());
    }

    #[test]
    fn test_bad_timestamps_are_skipped() {
        let events = vec![
            event("1", "not a timestamp"),
            FeedEvent::new(json!({ "id": "2", "type": "PushEvent" })),
            event("3", "2023-01-02T12:00:00Z"),
        ];
        let date: TargetDate = "2023-01-02".parse().unwrap();

        assert_eq!(ids(&filter_by_date(&events, &date)), vec!["3"]);
    }

    #[test]
    fn test_no_match() {
        let events = vec![event("1", "2023-01-02T12:00:00Z")];
        let date: TargetDate = "2022-01-02".parse().unwrap();

        assert!(filter_by_date(&events, &date).is_empty());
    }
}
