//! TTL Metadata Manager
//!
//! Expiry state lives in the backing store itself, under a reserved key
//! namespace: every key `k` with a TTL gets a companion record at
//! `__ttl_<k>` holding its absolute deadline as a decimal string of epoch
//! milliseconds. No in-memory index exists; every check reads the store.
//!
//! ## Lazy + Active Expiry
//!
//! Keys are expired two ways:
//! 1. **Lazy**: [`TtlIndex::is_expired`] runs on every read path. Observing
//!    an elapsed deadline deletes the value on the spot but *retains* the
//!    TTL record, so [`TtlIndex::remaining`] can still tell "expired" apart
//!    from "never had a TTL".
//! 2. **Active**: [`TtlIndex::clear_expired`] is an explicit caller-invoked
//!    sweep over every live key; it is the only expiry path that also drops
//!    the TTL records.
//!
//! ## Per-key state machine
//!
//! ```text
//!  NoEntry ──set──> LiveNoTTL <──set_ttl/set_with_ttl──> LiveWithTTL
//!                                                             │
//!                                         deadline elapses, read observes it
//!                                                             ▼
//!  NoEntry <──remove / clear_expired── ValueExpiredMetadataRetained
//! ```

use crate::backend::StorageBackend;
use crate::store::facade::SetOptions;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Manages per-key expiry records inside the backing store.
///
/// Cheap to construct; holds nothing but the shared backend handle.
pub struct TtlIndex {
    backend: Arc<dyn StorageBackend>,
}

impl TtlIndex {
    pub(crate) fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Derives the metadata key for `key`.
    ///
    /// The prefix is a literal, unescaped concatenation: a *data* key that
    /// itself starts with `__ttl_` collides with the metadata namespace and
    /// will be hidden from enumeration. Known limitation of the persisted
    /// format.
    pub fn ttl_key(key: &str) -> String {
        format!("{}{}", crate::TTL_KEY_PREFIX, key)
    }

    /// Returns true if `key` is in the reserved metadata namespace.
    pub fn is_metadata_key(key: &str) -> bool {
        key.starts_with(crate::TTL_KEY_PREFIX)
    }

    /// Checks whether `key` has passed its deadline.
    ///
    /// A key with no TTL record never expires. When an elapsed deadline is
    /// observed the stored value is deleted as a side effect and the TTL
    /// record is retained; see the module docs.
    pub fn is_expired(&self, key: &str) -> bool {
        let Some(raw) = self.backend.get(&Self::ttl_key(key)) else {
            return false;
        };
        let Some(expires_at) = parse_deadline(key, &raw) else {
            return false;
        };

        if now_ms() > expires_at {
            self.backend.remove(key);
            debug!(key, expires_at, "lazily collected expired value");
            true
        } else {
            false
        }
    }

    /// Writes `value` under `key`, then records its deadline.
    ///
    /// An absolute `expires_at` wins over a relative `ttl`; with neither set
    /// this is a plain write and no record is created. Note that a plain
    /// write over a key that already has a TTL record leaves the old
    /// deadline in force.
    pub fn set_with_ttl(&self, key: &str, value: &str, options: &SetOptions) {
        self.backend.set(key, value);

        let expires_at = if let Some(at) = options.expires_at {
            Some(at)
        } else {
            options
                .ttl
                .map(|ttl| now_ms().saturating_add(ttl.as_millis() as u64))
        };

        if let Some(expires_at) = expires_at {
            self.backend.set(&Self::ttl_key(key), &expires_at.to_string());
            trace!(key, expires_at, "ttl record written");
        }
    }

    /// Reads `key` with the lazy expiry check applied first.
    pub fn get_with_ttl(&self, key: &str) -> Option<String> {
        if self.is_expired(key) {
            return None;
        }
        self.backend.get(key)
    }

    /// Remaining lifetime of `key` in milliseconds.
    ///
    /// # Returns
    ///
    /// - `None` if the key has no TTL record (it never expires)
    /// - `Some(-1)` if the deadline has passed, whether or not the value
    ///   was already collected
    /// - `Some(ms)` with the positive remaining time otherwise
    pub fn remaining(&self, key: &str) -> Option<i64> {
        let raw = self.backend.get(&Self::ttl_key(key))?;
        let expires_at = parse_deadline(key, &raw)?;

        let remaining = expires_at as i64 - now_ms() as i64;
        if remaining <= 0 {
            Some(-1)
        } else {
            Some(remaining)
        }
    }

    /// Sets a fresh deadline of `now + duration_ms` on an existing key.
    ///
    /// # Returns
    ///
    /// `false` (and writes nothing) if the key has no stored value.
    pub fn set_ttl(&self, key: &str, duration_ms: u64) -> bool {
        if self.backend.get(key).is_none() {
            return false;
        }
        let expires_at = now_ms().saturating_add(duration_ms);
        self.backend.set(&Self::ttl_key(key), &expires_at.to_string());
        true
    }

    /// Sweeps every expired key and drops its TTL record.
    ///
    /// The key list is snapshotted up front: lazy collection removes entries
    /// mid-sweep and a live `len`/`key_at` cursor would skip their
    /// neighbors.
    ///
    /// # Returns
    ///
    /// The swept keys, in the backing store's enumeration order.
    pub fn clear_expired(&self) -> Vec<String> {
        let candidates = snapshot_data_keys(self.backend.as_ref());

        let mut swept = Vec::new();
        for key in candidates {
            if self.is_expired(&key) {
                // is_expired already removed the value
                self.backend.remove(&Self::ttl_key(&key));
                swept.push(key);
            }
        }

        if !swept.is_empty() {
            debug!(swept = swept.len(), "expired keys cleaned up");
        }
        swept
    }
}

/// Snapshots every non-metadata key currently enumerable in the backend.
pub(crate) fn snapshot_data_keys(backend: &dyn StorageBackend) -> Vec<String> {
    (0..backend.len())
        .filter_map(|i| backend.key_at(i))
        .filter(|key| !TtlIndex::is_metadata_key(key))
        .collect()
}

/// Milliseconds since the Unix epoch.
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Parses a TTL record payload. A record that fails to parse is treated as
/// absent (the key behaves as if it never expires).
fn parse_deadline(key: &str, raw: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            debug!(key, raw, "unparseable ttl record, treating as no expiry");
            None
        }
    }
}
