//! Event operations exposed to the HTTP layer.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::SchedulerResult;
use crate::event::{Event, EventDraft};
use crate::query::{self, DEFAULT_UPCOMING_LIMIT, EventFilter, EventStats};
use crate::store::EventStore;

/// Applies categorization and archiving rules on top of an [`EventStore`].
#[derive(Clone)]
pub struct Scheduler {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    upcoming_limit: usize,
}

impl Scheduler {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Scheduler {
            store,
            clock: Arc::new(SystemClock),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_upcoming_limit(mut self, limit: usize) -> Self {
        self.upcoming_limit = limit;
        self
    }

    /// Validate, categorize and store a submitted event.
    pub fn create(&self, draft: EventDraft) -> SchedulerResult<Event> {
        let new = draft.validate(self.clock.as_ref())?;
        let event = self.store.insert(new)?;
        tracing::info!(
            id = %event.id,
            category = %event.category,
            archived = event.archived,
            "created event"
        );
        Ok(event)
    }

    pub fn list(&self, filter: &EventFilter) -> SchedulerResult<Vec<Event>> {
        Ok(query::list(self.store.list()?, filter))
    }

    pub fn upcoming(&self) -> SchedulerResult<Vec<Event>> {
        Ok(query::upcoming(
            self.store.list()?,
            self.clock.today(),
            self.upcoming_limit,
        ))
    }

    pub fn archived(&self) -> SchedulerResult<Vec<Event>> {
        Ok(query::archived(self.store.list()?))
    }

    pub fn stats(&self) -> SchedulerResult<EventStats> {
        Ok(query::stats(&self.store.list()?))
    }

    pub fn get(&self, id: &str) -> SchedulerResult<Event> {
        self.store.get(id)
    }

    pub fn archive(&self, id: &str) -> SchedulerResult<Event> {
        let event = self.store.archive(id)?;
        tracing::info!(id, "archived event");
        Ok(event)
    }

    pub fn delete(&self, id: &str) -> SchedulerResult<()> {
        self.store.delete(id)?;
        tracing::info!(id, "deleted event");
        Ok(())
    }
}
