//! Storage
//!
//! The in-memory key-value store behind the command dispatcher. It is a
//! deliberately small collaborator: arbitrary byte-string keys and values,
//! no durability, no eviction, no TTL.

pub mod store;

pub use store::{Store, StoreStats};
