//! # keystash - A TTL-Aware Key/Value Storage Facade
//!
//! keystash is a convenience layer over any synchronous, string-only
//! key/value store. It adds typed value normalization, flexible batch
//! addressing, and optional per-key time-to-live expiration, while the
//! backing store stays a plain injected dependency.
//!
//! ## Features
//!
//! - **Typed Normalization**: booleans, numbers, strings, arrays, and
//!   objects all flatten to deterministic storable strings (JSON for the
//!   containers); null-likes collapse to the empty string
//! - **Batch Addressing**: one call can address a single key, a list of
//!   keys, or a whole key/value map (destructuring form)
//! - **TTL Support**: relative or absolute deadlines per key, with lazy
//!   expiry on read plus an on-demand active sweep
//! - **Injected Backend**: no global store; any [`StorageBackend`] works,
//!   and a facade without one degrades to an inert instance
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           keystash                             │
//! │                                                                │
//! │  ┌────────────┐   ┌────────────┐   ┌─────────────┐             │
//! │  │ KeyAddress │──>│   Value    │──>│   TtlIndex  │             │
//! │  │  resolver  │   │ normalizer │   │  (deadlines)│             │
//! │  └────────────┘   └────────────┘   └──────┬──────┘             │
//! │        ▲                                  │                    │
//! │        │                                  ▼                    │
//! │  ┌─────┴──────────────────────────────────────────┐            │
//! │  │                    Store                       │            │
//! │  │              (public facade)                   │            │
//! │  └────────────────────┬───────────────────────────┘            │
//! │                       │                                        │
//! │                       ▼                                        │
//! │  ┌────────────────────────────────────────────────┐            │
//! │  │           dyn StorageBackend                   │            │
//! │  │  (host store / MemoryBackend / test double)    │            │
//! │  └────────────────────────────────────────────────┘            │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use keystash::{SetOptions, Store, Value};
//! use std::time::Duration;
//!
//! let store = Store::in_memory();
//!
//! // Scalars coerce to strings
//! store.set("name", "Ariz").unwrap();
//! store.set("visits", 123).unwrap();
//! assert_eq!(store.get("visits"), Some("123".to_string()));
//!
//! // Containers store as JSON
//! store.set("tags", Value::array([Value::from("db"), Value::from("ttl")])).unwrap();
//!
//! // Batch addressing
//! store.set_many(
//!     &["k1", "k2"],
//!     Value::array([Value::from("v1"), Value::from("v2")]),
//!     &SetOptions::default(),
//! ).unwrap();
//!
//! // TTL
//! store.set_with("session", "token", &SetOptions::with_ttl(Duration::from_secs(60))).unwrap();
//! assert!(store.get_ttl("session").unwrap() > 0);
//! ```
//!
//! ## Module Overview
//!
//! - [`value`]: the dynamic [`Value`] model, type classification, and
//!   string normalization
//! - [`address`]: key-argument shape resolution and batch fan-out
//! - [`backend`]: the [`StorageBackend`] trait and the in-memory backend
//! - [`store`]: the [`Store`] facade and the TTL metadata manager
//!
//! ## Design Highlights
//!
//! ### Lazy + Active Expiry
//!
//! Keys with a TTL are expired in two ways:
//! 1. **Lazy**: any read that touches a key past its deadline deletes the
//!    value on the spot (the TTL record is retained, so
//!    [`Store::get_ttl`] still reports `-1` instead of `None`)
//! 2. **Active**: [`Store::clear_expired`] sweeps everything on demand and
//!    drops the records too
//!
//! ### Non-Atomic Batches
//!
//! The backing store offers atomic single-key writes and nothing more.
//! A batch write that fails to encode its Nth value leaves the first N-1
//! keys written; callers must tolerate partial application.

pub mod address;
pub mod backend;
pub mod error;
pub mod store;
pub mod value;

// Re-export commonly used types for convenience
pub use address::KeyAddress;
pub use backend::{MemoryBackend, StorageBackend};
pub use error::{Result, StoreError};
pub use store::{SetOptions, Store, TtlIndex};
pub use value::{normalize, Value, ValueKind};

/// Reserved prefix for TTL metadata keys.
///
/// The prefix is concatenated with the target key unescaped, so a data key
/// that itself starts with this literal collides with the metadata
/// namespace.
pub const TTL_KEY_PREFIX: &str = "__ttl_";

/// Version of keystash
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
