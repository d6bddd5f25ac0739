//! Core types for eventsched.
//!
//! - `event`: the event model and submission validation
//! - `category`: keyword categorization
//! - `clock`: the date source behind archive-on-create
//! - `query`: sorting, filtering, upcoming/archived views and stats
//! - `store`: document storage drivers
//! - `scheduler`: the operations the HTTP layer calls

pub mod category;
pub mod clock;
pub mod error;
pub mod event;
pub mod query;
pub mod scheduler;
pub mod settings;
pub mod store;

pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{SchedulerError, SchedulerResult};
pub use event::{CreatedEvent, Event, EventDraft, NewEvent};
pub use query::{EventFilter, EventStats};
pub use scheduler::Scheduler;
pub use settings::{Settings, StorageKind};
pub use store::{EventStore, FileStore, MemoryStore};
