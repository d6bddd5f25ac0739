//! Directory-backed document store: one JSON file per event.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{SchedulerError, SchedulerResult};
use crate::event::{Event, NewEvent};
use crate::store::{EventStore, new_id};

const EVENTS_DIR: &str = "events";
const EXTENSION: &str = "json";

/// Stores each event as `<root>/events/<id>.json`.
///
/// Mutations hold `writer` for their whole read-modify-write, so an archive
/// can never rewrite a document a concurrent delete already removed.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    writer: Arc<Mutex<()>>,
}

impl FileStore {
    /// Open (creating if needed) the store rooted at `root`.
    pub fn open(root: &Path) -> SchedulerResult<Self> {
        let dir = root.join(EVENTS_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| {
            SchedulerError::Storage(format!("Could not create {}: {e}", dir.display()))
        })?;
        tracing::debug!(dir = %dir.display(), "opened file store");
        Ok(FileStore {
            dir,
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `id`. Ids that could escape the directory
    /// are treated as unknown.
    fn path_for(&self, id: &str) -> SchedulerResult<PathBuf> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SchedulerError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.{EXTENSION}")))
    }

    fn lock(&self) -> SchedulerResult<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| SchedulerError::Storage("file store lock poisoned".into()))
    }

    fn read(&self, path: &Path) -> SchedulerResult<Event> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read the document for `id`; a file removed since the existence check
    /// is reported as `NotFound`.
    fn read_existing(&self, id: &str) -> SchedulerResult<Event> {
        let path = self.existing_path(id)?;
        match self.read(&path) {
            Err(SchedulerError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SchedulerError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// Write via a temp file and rename so readers never see a partial document.
    /// Callers must hold the writer lock.
    fn write(&self, event: &Event) -> SchedulerResult<()> {
        let path = self.path_for(&event.id)?;
        let temp = self.dir.join(format!("{}.{}.tmp", event.id, new_id()));

        let content = serde_json::to_string_pretty(event)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn existing_path(&self, id: &str) -> SchedulerResult<PathBuf> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(SchedulerError::NotFound(id.to_string()));
        }
        Ok(path)
    }
}

impl EventStore for FileStore {
    fn insert(&self, event: NewEvent) -> SchedulerResult<Event> {
        let event = Event::from_new(new_id(), event);
        let _guard = self.lock()?;
        self.write(&event)?;
        Ok(event)
    }

    fn list(&self) -> SchedulerResult<Vec<Event>> {
        let entries = std::fs::read_dir(&self.dir)?;

        let events = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == EXTENSION))
            .filter_map(|path| match self.read(&path) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable event document");
                    None
                }
            })
            .collect();

        Ok(events)
    }

    fn get(&self, id: &str) -> SchedulerResult<Event> {
        self.read_existing(id)
    }

    fn archive(&self, id: &str) -> SchedulerResult<Event> {
        let _guard = self.lock()?;
        let mut event = self.read_existing(id)?;
        event.archived = true;
        self.write(&event)?;
        Ok(event)
    }

    fn delete(&self, id: &str) -> SchedulerResult<()> {
        let _guard = self.lock()?;
        let path = self.existing_path(id)?;
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
