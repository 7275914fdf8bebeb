//! # wirekv - A Minimal Key-Value Server over a Binary Protocol
//!
//! wirekv is an in-memory key-value store served over a private,
//! length-prefixed binary protocol. The interesting part is not the store,
//! it is the connection core: an explicit, readiness-driven state machine
//! that turns a non-blocking byte stream into discrete requests and answers
//! them with correct handling of partial reads, partial writes, pipelining,
//! and fixed buffer limits.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           wirekv                               │
//! │                                                                │
//! │  ┌─────────────┐     ┌──────────────┐     ┌─────────────┐      │
//! │  │ TCP Server  │────>│  Connection  │────>│   Command   │      │
//! │  │ (scheduler) │     │state machine │     │  dispatcher │      │
//! │  └─────────────┘     └──────┬───────┘     └──────┬──────┘      │
//! │                             │                    │             │
//! │                      ┌──────┴──────┐      ┌──────┴──────┐      │
//! │                      │ Frame codec │      │    Store    │      │
//! │                      └─────────────┘      └─────────────┘      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The server plays scheduler: it waits for the readiness the state machine
//! asks for and calls back into it. The state machine does all I/O with
//! non-blocking calls and suspends in exactly two places: a read that would
//! block and a write that would block.
//!
//! ## Wire Protocol
//!
//! Little-endian u32 integers throughout:
//!
//! ```text
//! Request:   len(4) | argc(4) | [arglen(4) | argbytes] * argc
//! Response:  len(4) | status(4) | payload
//! ```
//!
//! Commands: `GET key`, `SET key value`, `DEL key` (verbs case-insensitive).
//! Status codes: 0 = Ok, 1 = Error, 2 = NotFound.
//!
//! ## Module Overview
//!
//! - [`protocol`]: wire constants and the frame codec
//! - [`connection`]: bounded buffers and the per-connection state machine
//! - [`commands`]: command parsing and dispatch against the store
//! - [`storage`]: the in-memory store
//! - [`client`]: the client-side codec used by `wirekv-cli`
//! - [`server`]: listener and per-connection scheduler tasks

pub mod client;
pub mod commands;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use client::{Client, ClientError};
pub use commands::{CommandHandler, Response};
pub use connection::{Conn, ConnState};
pub use protocol::{FrameError, Status, MAX_ARGS, MAX_MSG};
pub use storage::Store;

/// The default port wirekv listens on
pub const DEFAULT_PORT: u16 = 7700;

/// The default host wirekv binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of wirekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
