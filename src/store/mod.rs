//! Store Module
//!
//! The public facade and its TTL machinery.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Store                             │
//! │                                                          │
//! │  KeyAddress ──> Value normalize ──> TtlIndex ──> backend │
//! │  (shape)        (encoding)          (deadlines)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Batch addressing**: one call can target a key, a key list, or a map
//! - **Lazy expiry**: expired values are collected on access
//! - **Active expiry**: `clear_expired` sweeps everything on demand
//! - **Injected backend**: no globals; test doubles plug straight in
//!
//! ## Example
//!
//! ```
//! use keystash::store::{SetOptions, Store};
//! use std::time::Duration;
//!
//! let store = Store::in_memory();
//!
//! store.set("name", "Ariz").unwrap();
//! store
//!     .set_with("session", "token123", &SetOptions::with_ttl(Duration::from_secs(3600)))
//!     .unwrap();
//!
//! assert_eq!(store.get("name"), Some("Ariz".to_string()));
//! assert!(store.get_ttl("session").unwrap() > 0);
//! ```

pub mod expiry;
pub mod facade;

// Re-export commonly used types
pub use expiry::TtlIndex;
pub use facade::{SetOptions, Store};
