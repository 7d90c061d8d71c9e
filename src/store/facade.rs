//! Storage Facade
//!
//! [`Store`] is the public surface of the crate. It orchestrates the type
//! classifier, the value normalizer, the key addressing resolver, and the
//! TTL metadata manager over an injected [`StorageBackend`].
//!
//! ## Write path
//!
//! ```text
//! set_item(key, value, opts)
//!     │
//!     ▼
//! KeyAddress::classify ──invalid──> logged, whole call is a no-op
//!     │
//!     ▼
//! resolve_with(value)  ── one (key, value) pair per concrete write
//!     │
//!     ▼
//! deep? destructure containers into new top-level pairs (recursive)
//!     │
//!     ▼
//! normalize(value) ──fail──> SerializationError (earlier pairs stay written)
//!     │
//!     ▼
//! TtlIndex::set_with_ttl / backend.set
//! ```
//!
//! ## Read semantics
//!
//! Reads are *side-effecting*: any read path that touches a key past its
//! deadline deletes the stored value on the spot (the TTL record stays, so
//! [`Store::get_ttl`] keeps answering `-1`). [`Store::peek`] is the one
//! escape hatch that never mutates.

use crate::address::{destructure, KeyAddress};
use crate::backend::{InertBackend, StorageBackend};
use crate::error::{Result, StoreError};
use crate::store::expiry::{snapshot_data_keys, TtlIndex};
use crate::value::{normalize, Value, ValueKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Options for a write operation.
///
/// Replaces the positional-argument sniffing of older key/value facades with
/// one explicit record: a relative `ttl`, an absolute `expires_at` deadline
/// (which wins when both are set), and the `deep` destructuring flag.
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Relative time-to-live; the deadline becomes `now + ttl`.
    pub ttl: Option<Duration>,

    /// Absolute deadline in epoch milliseconds. Takes precedence over `ttl`.
    pub expires_at: Option<u64>,

    /// Destructure container values into new top-level keys instead of
    /// storing them as JSON blobs.
    pub deep: bool,
}

impl SetOptions {
    /// Options with a relative TTL and nothing else.
    ///
    /// # Example
    /// ```
    /// use keystash::store::SetOptions;
    /// use std::time::Duration;
    /// let opts = SetOptions::with_ttl(Duration::from_secs(60));
    /// ```
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Default::default()
        }
    }

    /// Returns true if these options carry a deadline.
    pub fn has_expiry(&self) -> bool {
        self.ttl.is_some() || self.expires_at.is_some()
    }
}

/// A TTL-aware facade over a synchronous string key/value store.
///
/// # Example
///
/// ```
/// use keystash::store::{SetOptions, Store};
/// use std::time::Duration;
///
/// let store = Store::in_memory();
///
/// store.set("name", "Ariz").unwrap();
/// assert_eq!(store.get("name"), Some("Ariz".to_string()));
///
/// store
///     .set_with("session", "abc123", &SetOptions::with_ttl(Duration::from_secs(60)))
///     .unwrap();
/// assert!(store.get_ttl("session").unwrap() > 0);
/// ```
pub struct Store {
    backend: Arc<dyn StorageBackend>,
    ttl: TtlIndex,
}

impl Store {
    /// Creates a facade over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let ttl = TtlIndex::new(Arc::clone(&backend));
        Self { backend, ttl }
    }

    /// Creates a facade, degrading to an inert instance when no backend is
    /// available.
    ///
    /// The inert facade drops every write and answers every read with
    /// `None`/empty. One diagnostic is logged here; operations stay silent.
    pub fn attach(backend: Option<Arc<dyn StorageBackend>>) -> Self {
        match backend {
            Some(backend) => Self::new(backend),
            None => {
                warn!(error = %StoreError::BackendUnavailable, "store disabled");
                Self::new(Arc::new(InertBackend))
            }
        }
    }

    /// Creates a facade over a fresh [`MemoryBackend`].
    ///
    /// [`MemoryBackend`]: crate::backend::MemoryBackend
    pub fn in_memory() -> Self {
        Self::new(Arc::new(crate::backend::MemoryBackend::new()))
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    /// Stores one value under one key, without options.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.write_one(key, &value.into(), &SetOptions::default())
    }

    /// Stores one value under one key with explicit options.
    ///
    /// With `opts.deep` set, a container value is destructured instead: its
    /// own keys (or decimal indices) become top-level storage keys and `key`
    /// itself receives nothing.
    pub fn set_with(&self, key: &str, value: impl Into<Value>, opts: &SetOptions) -> Result<()> {
        let value = value.into();
        if opts.deep && matches!(value.kind(), ValueKind::Array | ValueKind::Object) {
            return self.write_pairs(destructure(&value), opts);
        }
        self.write_one(key, &value, opts)
    }

    /// Stores values under a list of keys.
    ///
    /// An array value pairs up by index (missing tail positions store the
    /// empty string); any other value is broadcast to every key.
    pub fn set_many(&self, keys: &[&str], values: impl Into<Value>, opts: &SetOptions) -> Result<()> {
        let addr = KeyAddress::List(keys.iter().map(|k| k.to_string()).collect());
        self.write_pairs(addr.resolve_with(&values.into()), opts)
    }

    /// Stores each entry of a key/value mapping (the destructuring form).
    pub fn set_mapped<K, I>(&self, entries: I, opts: &SetOptions) -> Result<()>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let pairs = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.write_pairs(pairs, opts)
    }

    /// Stores through a dynamically shaped key argument.
    ///
    /// The key may be a string, a list of strings, or a map; see
    /// [`KeyAddress`] for the fan-out rules. A key of any other shape logs
    /// a diagnostic and turns the whole call into a no-op: nothing is
    /// written and no error is returned.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialization`] if a resolved value cannot be encoded.
    /// Batch writes are not atomic: pairs before the failing one are already
    /// stored, pairs after it are never attempted.
    pub fn set_item(&self, key: &Value, value: &Value, opts: &SetOptions) -> Result<()> {
        let addr = match KeyAddress::classify(key) {
            Ok(addr) => addr,
            Err(err) => {
                error!(%err, "set dropped");
                return Ok(());
            }
        };
        self.write_pairs(addr.resolve_with(value), opts)
    }

    /// Writes resolved pairs, recursing on `deep` container values.
    fn write_pairs(&self, pairs: Vec<(String, Value)>, opts: &SetOptions) -> Result<()> {
        for (key, value) in pairs {
            if opts.deep && matches!(value.kind(), ValueKind::Array | ValueKind::Object) {
                // The container's own keys/indices become top-level keys;
                // the original key receives nothing.
                self.write_pairs(destructure(&value), opts)?;
            } else {
                self.write_one(&key, &value, opts)?;
            }
        }
        Ok(())
    }

    fn write_one(&self, key: &str, value: &Value, opts: &SetOptions) -> Result<()> {
        let encoded = normalize(value)?;
        if opts.has_expiry() {
            self.ttl.set_with_ttl(key, &encoded, opts);
        } else {
            self.backend.set(key, &encoded);
        }
        Ok(())
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Reads one key. Expired keys read as `None` (and are lazily deleted).
    pub fn get(&self, key: &str) -> Option<String> {
        self.ttl.get_with_ttl(key)
    }

    /// Reads several keys; absent or expired keys yield `None` in place.
    pub fn get_many(&self, keys: &[&str]) -> Vec<Option<String>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Reads through a dynamically shaped key argument, mirroring its shape.
    ///
    /// - string → `Str` value, or `Null` if absent
    /// - list → same-length `Array`; absent keys yield `Null`, not omission
    /// - map → same-keyed `Object`, each value resolved recursively (the
    ///   map's values name keys, or nested list/map shapes)
    ///
    /// A key of any other shape logs a diagnostic and yields `Undefined`.
    pub fn get_item(&self, key: &Value) -> Value {
        match key {
            Value::Str(k) => self.get(k).map(Value::Str).unwrap_or(Value::Null),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.get_item(item)).collect())
            }
            Value::Object(pairs) => Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), self.get_item(v)))
                    .collect(),
            ),
            other => {
                let err = StoreError::InvalidKeyType { found: other.kind() };
                error!(%err, "get dropped");
                Value::Undefined
            }
        }
    }

    /// Snapshot of every live entry, keyed by name.
    ///
    /// Metadata keys and currently-expired keys are excluded; reading the
    /// snapshot lazily collects any expired values it touches.
    pub fn get_items(&self) -> BTreeMap<String, String> {
        let mut items = BTreeMap::new();
        for key in snapshot_data_keys(self.backend.as_ref()) {
            if let Some(value) = self.get(&key) {
                items.insert(key, value);
            }
        }
        items
    }

    /// Every live, non-expired, non-metadata key, in the backend's
    /// enumeration order.
    pub fn get_keys(&self) -> Vec<String> {
        snapshot_data_keys(self.backend.as_ref())
            .into_iter()
            .filter(|key| !self.ttl.is_expired(key))
            .collect()
    }

    /// Returns true if `key` holds a live, non-expired value.
    ///
    /// Like any read, this can trigger lazy deletion of an expired value.
    pub fn has_key(&self, key: &str) -> bool {
        self.backend.get(key).is_some() && !self.ttl.is_expired(key)
    }

    /// Reads the raw stored value without any expiry processing.
    ///
    /// Never deletes anything: a logically expired key still returns its
    /// stored bytes until some other read collects it. Intended for
    /// introspection and tests.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    // ========================================================================
    // REMOVAL
    // ========================================================================

    /// Removes one key, deleting both its value and its TTL record.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
        self.backend.remove(&TtlIndex::ttl_key(key));
    }

    /// Removes through a dynamically shaped key argument.
    ///
    /// List and map forms flatten to a plain key list (any value payload in
    /// a map is ignored). An invalid shape logs and removes nothing.
    pub fn remove_item(&self, key: &Value) {
        let addr = match KeyAddress::classify(key) {
            Ok(addr) => addr,
            Err(err) => {
                error!(%err, "remove dropped");
                return;
            }
        };
        for key in addr.keys() {
            self.remove(&key);
        }
    }

    /// Schedules an unconditional removal of `key` after `delay`.
    ///
    /// Fire-and-forget on a detached thread: there is no cancellation
    /// handle, and once scheduled the deletion cannot be retracted; only
    /// overwriting the key before the timer fires changes what is lost.
    /// Legacy behavior, kept as-is.
    pub fn remove_later(&self, key: &str, delay: Duration) {
        let backend = Arc::clone(&self.backend);
        let key = key.to_string();
        debug!(key, delay_ms = delay.as_millis() as u64, "deferred removal scheduled");

        thread::spawn(move || {
            thread::sleep(delay);
            backend.remove(&key);
            backend.remove(&TtlIndex::ttl_key(&key));
        });
    }

    /// Wipes the backing store: every entry and every TTL record,
    /// indiscriminately.
    pub fn clear(&self) {
        self.backend.clear();
    }

    // ========================================================================
    // TTL
    // ========================================================================

    /// Remaining lifetime of `key` in milliseconds: `None` without a TTL,
    /// `-1` once expired, positive otherwise. See [`TtlIndex::remaining`].
    pub fn get_ttl(&self, key: &str) -> Option<i64> {
        self.ttl.remaining(key)
    }

    /// Sets a fresh TTL on an existing key. Returns `false` if the key has
    /// no stored value.
    pub fn set_ttl(&self, key: &str, ttl: Duration) -> bool {
        self.ttl.set_ttl(key, ttl.as_millis() as u64)
    }

    /// Actively sweeps all expired keys, dropping values and TTL records.
    /// Returns the swept keys in enumeration order.
    pub fn clear_expired(&self) -> Vec<String> {
        self.ttl.clear_expired()
    }
}
