//! In-memory host
//!
//! `MemoryStore` holds every session record and is shared across request
//! contexts; `MemoryHost` is one request context over a store.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::bag::SessionBag;
use crate::error::SessionError;
use crate::host::SessionHost;
use crate::id::SessionId;
use crate::Result;

#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub bag: SessionBag,
    pub created_at: DateTime<Utc>,
    /// Last time a request opened the session
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    fn new(bag: SessionBag) -> Self {
        let now = Utc::now();

        Self {
            bag,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
    /// Process-wide save location
    save_path: Arc<RwLock<Option<PathBuf>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag for `id`, creating the record if it does not exist yet
    pub fn open(&self, id: &SessionId) -> SessionBag {
        let mut records = self.records.write();
        let record = records.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %id.redacted(), "Created session record");
            SessionRecord::new(SessionBag::new())
        });
        record.updated_at = Utc::now();
        record.bag.clone()
    }

    pub fn get(&self, id: &SessionId) -> Option<SessionRecord> {
        self.records.read().get(id).cloned()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.records.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Drop a session and its data. Returns whether it existed.
    pub fn destroy(&self, id: &SessionId) -> bool {
        let removed = self.records.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id.redacted(), "Destroyed session");
        }
        removed
    }

    /// Drop every session idle for longer than `max_lifetime`.
    /// Returns how many were collected.
    pub fn gc(&self, max_lifetime: TimeDelta) -> usize {
        self.gc_at(Utc::now(), max_lifetime)
    }

    pub(crate) fn gc_at(&self, now: DateTime<Utc>, max_lifetime: TimeDelta) -> usize {
        let Some(cutoff) = now.checked_sub_signed(max_lifetime) else {
            return 0;
        };

        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| record.updated_at >= cutoff);
        let collected = before - records.len();

        if collected > 0 {
            tracing::info!(collected, "Collected expired sessions");
        }
        collected
    }

    /// Re-key a session, keeping its bag. `bag` recreates the record if
    /// another request destroyed it in the meantime.
    pub(crate) fn rename(&self, from: &SessionId, to: &SessionId, bag: &SessionBag) {
        let mut records = self.records.write();
        let mut record = records
            .remove(from)
            .unwrap_or_else(|| SessionRecord::new(bag.clone()));
        record.updated_at = Utc::now();
        records.insert(to.clone(), record);
    }

    pub fn set_save_path(&self, directory: PathBuf) {
        *self.save_path.write() = Some(directory);
    }

    pub fn save_path(&self) -> Option<PathBuf> {
        self.save_path.read().clone()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            save_path: Arc::clone(&self.save_path),
        }
    }
}

#[derive(Debug, Default)]
struct RequestState {
    assigned_id: Option<SessionId>,
    active: Option<(SessionId, SessionBag)>,
}

#[derive(Debug, Default)]
pub struct MemoryHost {
    store: MemoryStore,
    state: Arc<RwLock<RequestState>>,
    /// Collect expired sessions on every start when set
    gc_max_lifetime: Option<TimeDelta>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(RequestState::default())),
            gc_max_lifetime: None,
        }
    }

    pub fn with_gc_max_lifetime(mut self, max_lifetime: TimeDelta) -> Self {
        self.gc_max_lifetime = Some(max_lifetime);
        self
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Fresh request context over the same store
    pub fn next_request(&self) -> Self {
        Self {
            store: self.store.clone(),
            state: Arc::new(RwLock::new(RequestState::default())),
            gc_max_lifetime: self.gc_max_lifetime,
        }
    }
}

impl Clone for MemoryHost {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            state: Arc::clone(&self.state),
            gc_max_lifetime: self.gc_max_lifetime,
        }
    }
}

impl SessionHost for MemoryHost {
    fn is_active(&self) -> bool {
        self.state.read().active.is_some()
    }

    fn assign_id(&self, id: SessionId) -> Result<()> {
        let mut state = self.state.write();
        if state.active.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        state.assigned_id = Some(id);
        Ok(())
    }

    fn start(&self) -> Result<SessionBag> {
        let mut state = self.state.write();
        if let Some((_, bag)) = &state.active {
            return Ok(bag.clone());
        }

        if let Some(max_lifetime) = self.gc_max_lifetime {
            self.store.gc(max_lifetime);
        }

        let id = state.assigned_id.take().unwrap_or_else(SessionId::generate);
        let bag = self.store.open(&id);
        state.active = Some((id, bag.clone()));

        Ok(bag)
    }

    fn bag(&self) -> Option<SessionBag> {
        self.state.read().active.as_ref().map(|(_, bag)| bag.clone())
    }

    fn session_id(&self) -> Option<SessionId> {
        let state = self.state.read();
        state
            .active
            .as_ref()
            .map(|(id, _)| id.clone())
            .or_else(|| state.assigned_id.clone())
    }

    fn regenerate_id(&self) -> Result<SessionId> {
        let mut state = self.state.write();
        let (id, bag) = state
            .active
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;

        let new_id = SessionId::generate();
        self.store.rename(id, &new_id, bag);
        *id = new_id.clone();

        Ok(new_id)
    }

    fn set_save_path(&self, directory: &Path) -> Result<()> {
        self.store.set_save_path(directory.to_path_buf());
        Ok(())
    }

    fn save_path(&self) -> Option<PathBuf> {
        self.store.save_path()
    }
}
