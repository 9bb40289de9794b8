//! Shared handle to a session's data
//!
//! The host owns the bag for the session's lifetime; a facade holds a clone
//! of the handle for the duration of one request.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use stash_translator::Map;

#[derive(Debug, Default)]
pub struct SessionBag {
    data: Arc<RwLock<Map>>,
}

impl SessionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map) -> Self {
        Self {
            data: Arc::new(RwLock::new(map)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Map> {
        self.data.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Map> {
        self.data.write()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Map {
        self.data.read().clone()
    }

    pub fn clear(&self) {
        self.data.write().clear();
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Whether both handles point at the same underlying bag
    pub fn same_bag(&self, other: &SessionBag) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl Clone for SessionBag {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
