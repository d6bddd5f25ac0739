use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{SchedulerError, SchedulerResult};
use crate::event::{Event, NewEvent};
use crate::store::{EventStore, new_id};

/// In-process store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<String, Event>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn read(&self) -> SchedulerResult<RwLockReadGuard<'_, HashMap<String, Event>>> {
        self.events
            .read()
            .map_err(|_| SchedulerError::Storage("event map lock poisoned".into()))
    }

    fn write(&self) -> SchedulerResult<RwLockWriteGuard<'_, HashMap<String, Event>>> {
        self.events
            .write()
            .map_err(|_| SchedulerError::Storage("event map lock poisoned".into()))
    }
}

impl EventStore for MemoryStore {
    fn insert(&self, event: NewEvent) -> SchedulerResult<Event> {
        let event = Event::from_new(new_id(), event);
        self.write()?.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    fn list(&self) -> SchedulerResult<Vec<Event>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: &str) -> SchedulerResult<Event> {
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))
    }

    fn archive(&self, id: &str) -> SchedulerResult<Event> {
        let mut events = self.write()?;
        let event = events
            .get_mut(id)
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))?;
        event.archived = true;
        Ok(event.clone())
    }

    fn delete(&self, id: &str) -> SchedulerResult<()> {
        self.write()?
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SchedulerError::NotFound(id.to_string()))
    }
}
