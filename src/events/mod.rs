//! Cultural events calendar
//!
//! Festivals, ceremonies, and teachings hosted by the monasteries, with the
//! same wildcard filter contract as the monastery search.

use serde::{Deserialize, Serialize};

use crate::catalog::District;
use crate::error::GompaError;
use crate::Result;

/// Category of a cultural event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Festival,
    Ceremony,
    Teaching,
    Pilgrimage,
}

/// A cultural event tied to a monastery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalEvent {
    pub id: String,
    pub name: String,
    /// Human-readable date range, e.g. "February 10-12, 2024"
    pub date: String,
    /// Calendar month, 1-12
    pub month: u32,
    pub monastery: String,
    pub monastery_slug: String,
    pub district: District,
    pub event_type: EventType,
    pub description: String,
    pub significance: String,
    pub duration: String,
    pub participants: String,
    pub best_time_to_attend: String,
}

/// The event calendar loaded from the embedded static dataset
#[derive(Debug, Clone)]
pub struct EventCalendar {
    events: Vec<CulturalEvent>,
}

const EMBEDDED_EVENTS: &str = include_str!("cultural_events.json");

impl EventCalendar {
    /// Load the calendar shipped with the library
    pub fn load_embedded() -> Result<Self> {
        let events: Vec<CulturalEvent> = serde_json::from_str(EMBEDDED_EVENTS)
            .map_err(|e| GompaError::catalog(format!("embedded event data is malformed: {e}")))?;
        Ok(Self { events })
    }

    /// All events in calendar order
    #[must_use]
    pub fn all(&self) -> &[CulturalEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events hosted by the monastery with the given slug
    #[must_use]
    pub fn by_monastery(&self, slug: &str) -> Vec<&CulturalEvent> {
        self.events
            .iter()
            .filter(|e| e.monastery_slug == slug)
            .collect()
    }
}

/// Filter events by month and event type; `None` acts as the wildcard.
/// Source order is preserved.
#[must_use]
pub fn search_events<'a>(
    events: &'a [CulturalEvent],
    month: Option<u32>,
    event_type: Option<EventType>,
) -> Vec<&'a CulturalEvent> {
    events
        .iter()
        .filter(|event| {
            let matches_month = month.map_or(true, |m| event.month == m);
            let matches_type = event_type.map_or(true, |t| event.event_type == t);
            matches_month && matches_type
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> EventCalendar {
        EventCalendar::load_embedded().unwrap()
    }

    #[test]
    fn test_embedded_events_load() {
        let calendar = calendar();
        assert_eq!(calendar.len(), 7);
        assert!(calendar.all().iter().all(|e| (1..=12).contains(&e.month)));
    }

    #[test]
    fn test_no_op_filter_is_identity() {
        let calendar = calendar();
        let result = search_events(calendar.all(), None, None);
        assert_eq!(result.len(), calendar.len());
    }

    #[test]
    fn test_filter_by_month() {
        let calendar = calendar();
        let february = search_events(calendar.all(), Some(2), None);
        assert_eq!(february.len(), 2);
        assert_eq!(february[0].name, "Losar (Tibetan New Year)");
        assert_eq!(february[1].name, "Bhumchu Festival");
    }

    #[test]
    fn test_filter_combines_with_and() {
        let calendar = calendar();
        let february_teachings =
            search_events(calendar.all(), Some(2), Some(EventType::Teaching));
        assert!(february_teachings.is_empty());

        let teachings = search_events(calendar.all(), None, Some(EventType::Teaching));
        assert_eq!(teachings.len(), 2);
        assert!(teachings.iter().all(|e| e.event_type == EventType::Teaching));
    }

    #[test]
    fn test_by_monastery() {
        let calendar = calendar();
        let at_tashiding = calendar.by_monastery("tashiding-monastery");
        assert_eq!(at_tashiding.len(), 1);
        assert_eq!(at_tashiding[0].name, "Bhumchu Festival");
    }
}
