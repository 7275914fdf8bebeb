//! Connection Handling
//!
//! Per-connection buffering and the request/response state machine.
//!
//! The split here mirrors the layering of the protocol: `buffer` owns the
//! byte-level bookkeeping (bounded capacity, compaction), `conn` owns the
//! frame-level state machine that decides when to read, when to write, and
//! when to give up on a peer.
//!
//! The scheduler that decides *when* a connection is readable or writable
//! lives in `server.rs`; everything in this module is synchronous and
//! non-blocking, and is exercised in tests with scripted sockets instead of
//! real ones.

pub mod buffer;
pub mod conn;

pub use buffer::FrameBuffer;
pub use conn::{Conn, ConnState, SocketIo};
