//! Read-side queries over stored events: ordering, filtering, the upcoming
//! and archived views, and summary statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::event::Event;

/// Number of events in the upcoming view when not configured otherwise.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Optional filters for listing events. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub archived: Option<bool>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if self.category.is_some_and(|c| c != event.category) {
            return false;
        }
        if self.archived.is_some_and(|a| a != event.archived) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => event.search_text().contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// Sort by date then time, earliest first. Ties keep creation order.
pub fn sort_ascending(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.starts_at()
            .cmp(&b.starts_at())
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// All events matching `filter`, earliest first.
pub fn list(mut events: Vec<Event>, filter: &EventFilter) -> Vec<Event> {
    events.retain(|e| filter.matches(e));
    sort_ascending(&mut events);
    events
}

/// The next `limit` non-archived events dated today or later.
pub fn upcoming(mut events: Vec<Event>, today: NaiveDate, limit: usize) -> Vec<Event> {
    events.retain(|e| !e.archived && e.date >= today);
    sort_ascending(&mut events);
    events.truncate(limit);
    events
}

/// Archived events, most recent first.
pub fn archived(mut events: Vec<Event>) -> Vec<Event> {
    events.retain(|e| e.archived);
    sort_ascending(&mut events);
    events.reverse();
    events
}

/// Per-category counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryDistribution {
    pub work: usize,
    pub personal: usize,
    pub other: usize,
}

impl CategoryDistribution {
    fn record(&mut self, category: Category) {
        match category {
            Category::Work => self.work += 1,
            Category::Personal => self.personal += 1,
            Category::Other => self.other += 1,
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total_events: usize,
    pub category_distribution: CategoryDistribution,
    pub archived_count: usize,
}

pub fn stats(events: &[Event]) -> EventStats {
    let mut stats = EventStats {
        total_events: events.len(),
        ..EventStats::default()
    };
    for event in events {
        stats.category_distribution.record(event.category);
        if event.archived {
            stats.archived_count += 1;
        }
    }
    stats
}
