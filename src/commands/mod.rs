//! Command Dispatch
//!
//! Parses a decoded argument list into one of the supported commands,
//! validates its arity, runs it against the store, and produces the response
//! to encode.
//!
//! Application-level failures (unknown verb, wrong arity, missing key) are
//! ordinary responses with an error status; they never affect the connection
//! carrying them.

pub mod handler;

pub use handler::{CommandHandler, Response};
