//! Document storage for events.
//!
//! A store owns id generation and per-document atomicity. Ordering and
//! filtering live in [`crate::query`], so drivers only deal in whole documents.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::SchedulerResult;
use crate::event::{Event, NewEvent};

pub trait EventStore: Send + Sync {
    /// Persist a new event and return it with its assigned id.
    fn insert(&self, event: NewEvent) -> SchedulerResult<Event>;

    /// Every stored event, in no particular order.
    fn list(&self) -> SchedulerResult<Vec<Event>>;

    /// Fails with `NotFound` for unknown ids.
    fn get(&self, id: &str) -> SchedulerResult<Event>;

    /// Set `archived = true` and return the updated event.
    /// Fails with `NotFound` for unknown ids.
    fn archive(&self, id: &str) -> SchedulerResult<Event>;

    /// Fails with `NotFound` for unknown ids.
    fn delete(&self, id: &str) -> SchedulerResult<()>;
}

/// Generate a fresh opaque document id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
