use std::sync::Arc;

use anyhow::Result;
use eventsched_core::{EventStore, FileStore, MemoryStore, Scheduler, Settings, StorageKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    scheduler: Scheduler,
}

impl AppState {
    pub fn new(scheduler: Scheduler) -> Self {
        AppState { scheduler }
    }

    /// Open the configured store and build the scheduler around it.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store: Arc<dyn EventStore> = match settings.storage {
            StorageKind::File => Arc::new(FileStore::open(&settings.data_path())?),
            StorageKind::Memory => {
                tracing::warn!("using in-memory storage; events are lost on exit");
                Arc::new(MemoryStore::new())
            }
        };

        let scheduler = Scheduler::new(store).with_upcoming_limit(settings.upcoming_limit);
        Ok(AppState::new(scheduler))
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
