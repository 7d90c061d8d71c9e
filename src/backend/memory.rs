//! In-Memory Reference Backend
//!
//! [`MemoryBackend`] is the bundled [`StorageBackend`] implementation: an
//! insertion-ordered map behind an `RwLock`. It is what the bundled shell
//! runs on and what the test suite uses as its store double.
//!
//! Enumeration order is insertion order of first write; overwriting a key
//! does not move it. That order is an implementation detail; callers of the
//! facade only get the guarantee that enumeration covers every entry.

use crate::backend::StorageBackend;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    data: HashMap<String, String>,
    order: Vec<String>,
}

/// A thread-safe, insertion-ordered in-memory backend.
///
/// # Example
///
/// ```
/// use keystash::backend::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new();
/// backend.set("name", "Ariz");
/// assert_eq!(backend.get("name"), Some("Ariz".to_string()));
/// assert_eq!(backend.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.read().unwrap();
        inner.data.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut inner = self.inner.write().unwrap();
        if inner.data.insert(key.to_string(), value.to_string()).is_none() {
            inner.order.push(key.to_string());
        }
    }

    fn remove(&self, key: &str) {
        let mut inner = self.inner.write().unwrap();
        if inner.data.remove(key).is_some() {
            inner.order.retain(|k| k != key);
        }
    }

    fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.data.clear();
        inner.order.clear();
    }

    fn len(&self) -> usize {
        self.inner.read().unwrap().data.len()
    }

    fn key_at(&self, index: usize) -> Option<String> {
        let inner = self.inner.read().unwrap();
        inner.order.get(index).cloned()
    }
}

/// The degraded backend installed when no real store is available.
///
/// Every write is dropped and every read is empty, so a facade built without
/// a backing store stays inert without branching anywhere else.
#[derive(Debug, Default)]
pub(crate) struct InertBackend;

impl StorageBackend for InertBackend {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }

    fn key_at(&self, _index: usize) -> Option<String> {
        None
    }
}
