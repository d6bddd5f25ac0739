//! Event types.
//!
//! An [`EventDraft`] is what a client submits. Validating it against a
//! [`Clock`] yields a [`NewEvent`] whose category and archived flag are
//! already decided; a store assigns the id and returns the stored [`Event`].

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::clock::{Clock, is_stale};
use crate::error::{SchedulerError, SchedulerResult};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A stored event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub category: Category,
    #[serde(default)]
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Attach a store-assigned id to a validated event.
    pub fn from_new(id: String, new: NewEvent) -> Self {
        Event {
            id,
            title: new.title,
            date: new.date,
            time: new.time,
            notes: new.notes,
            category: new.category,
            archived: new.archived,
            created_at: new.created_at,
        }
    }

    /// Sort key: date first, then time of day.
    pub fn starts_at(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }

    /// Lower-cased title and notes, the text searched and categorized.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.notes.as_deref().unwrap_or_default()).to_lowercase()
    }
}

/// Request body for creating an event.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error naming it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDraft {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

impl EventDraft {
    pub fn new(title: &str, date: &str, time: &str) -> Self {
        EventDraft {
            title: Some(title.to_string()),
            date: Some(date.to_string()),
            time: Some(time.to_string()),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Validate required fields, then categorize and decide the archived flag.
    pub fn validate(self, clock: &dyn Clock) -> SchedulerResult<NewEvent> {
        let title = required(self.title.as_deref(), "title")?.to_string();
        let date = parse_date(required(self.date.as_deref(), "date")?)?;
        let time = parse_time(required(self.time.as_deref(), "time")?)?;
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let category = Category::infer(&title, notes.as_deref());
        let archived = is_stale(date, clock.today());

        Ok(NewEvent {
            title,
            date,
            time,
            notes,
            category,
            archived,
            created_at: clock.now(),
        })
    }
}

/// A validated event that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: Option<String>,
    pub category: Category,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Response body for a created event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedEvent {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub category: Category,
    pub archived: bool,
}

impl From<&Event> for CreatedEvent {
    fn from(event: &Event) -> Self {
        CreatedEvent {
            id: event.id.clone(),
            category: event.category,
            archived: event.archived,
        }
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> SchedulerResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SchedulerError::Validation(format!("Missing required field: {field}")))
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> SchedulerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        SchedulerError::Validation(format!("Invalid date '{s}'. Expected YYYY-MM-DD"))
    })
}

/// Parse HH:MM, also accepting HH:MM:SS. Seconds are dropped so stored
/// times match their HH:MM wire form.
pub fn parse_time(s: &str) -> SchedulerResult<NaiveTime> {
    let s = s.trim();
    let time = NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| SchedulerError::Validation(format!("Invalid time '{s}'. Expected HH:MM")))?;
    Ok(time.with_second(0).unwrap_or(time))
}

/// Serializes clock times as HH:MM, the format HTML time inputs produce.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(super::TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_time(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    fn validation_message(result: SchedulerResult<NewEvent>) -> String {
        match result {
            Err(SchedulerError::Validation(msg)) => msg,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_assigns_category_and_archived() {
        let new = EventDraft::new("Client call", "2025-06-20", "09:30")
            .validate(&clock())
            .unwrap();

        assert_eq!(new.category, Category::Work);
        assert!(!new.archived);
        assert_eq!(new.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_past_date_is_archived_on_create() {
        let new = EventDraft::new("Dinner", "2025-06-14", "19:00")
            .validate(&clock())
            .unwrap();
        assert!(new.archived);
        assert_eq!(new.category, Category::Personal);
    }

    #[test]
    fn test_today_is_not_archived() {
        let new = EventDraft::new("Gym", "2025-06-15", "07:00")
            .validate(&clock())
            .unwrap();
        assert!(!new.archived);
    }

    #[test]
    fn test_missing_fields_name_the_field() {
        let draft = EventDraft {
            title: None,
            ..EventDraft::new("x", "2025-06-20", "10:00")
        };
        assert!(validation_message(draft.validate(&clock())).contains("title"));

        let draft = EventDraft {
            date: None,
            ..EventDraft::new("x", "2025-06-20", "10:00")
        };
        assert!(validation_message(draft.validate(&clock())).contains("date"));

        let draft = EventDraft {
            time: Some("   ".into()),
            ..EventDraft::new("x", "2025-06-20", "10:00")
        };
        assert!(validation_message(draft.validate(&clock())).contains("time"));
    }

    #[test]
    fn test_malformed_date_and_time_are_rejected() {
        let result = EventDraft::new("x", "20/06/2025", "10:00").validate(&clock());
        assert!(validation_message(result).contains("Invalid date"));

        let result = EventDraft::new("x", "2025-06-20", "25:00").validate(&clock());
        assert!(validation_message(result).contains("Invalid time"));
    }

    #[test]
    fn test_seconds_are_truncated_to_the_minute() {
        let new = EventDraft::new("x", "2025-06-20", "10:00:45")
            .validate(&clock())
            .unwrap();
        assert_eq!(new.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

        // Same ordering before and after a JSON round trip
        let event = Event::from_new("abc".into(), new);
        let back: Event = serde_json::from_value(serde_json::to_value(&event).unwrap()).unwrap();
        assert_eq!(back.time, event.time);
    }

    #[test]
    fn test_blank_notes_are_dropped() {
        let new = EventDraft::new("x", "2025-06-20", "10:00")
            .with_notes("  ")
            .validate(&clock())
            .unwrap();
        assert_eq!(new.notes, None);
    }

    #[test]
    fn test_event_json_shape() {
        let new = EventDraft::new("  Standup ", "2025-06-20", "10:00:00")
            .with_notes("daily")
            .validate(&clock())
            .unwrap();
        let event = Event::from_new("abc".into(), new);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["title"], "Standup");
        assert_eq!(json["date"], "2025-06-20");
        assert_eq!(json["time"], "10:00");
        assert_eq!(json["category"], "Other");
        assert_eq!(json["archived"], false);
        assert!(json.get("createdAt").is_some());

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
