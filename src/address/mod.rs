//! Key Addressing
//!
//! One logical call to the facade can address many concrete keys. This
//! module interprets the shape of a key argument and expands it into the
//! per-key operations the storage layer actually performs.
//!
//! See [`KeyAddress`] for the three accepted shapes and the fan-out rules.

mod resolver;

pub use resolver::{destructure, KeyAddress};
