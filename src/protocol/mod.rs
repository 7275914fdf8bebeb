//! Wire Protocol Implementation
//!
//! wirekv speaks a private, length-prefixed binary protocol. Every message,
//! request or response, starts with a 4-byte little-endian length that counts
//! all bytes after itself.
//!
//! ## Wire Format
//!
//! ```text
//! Request:   len(4) | argc(4) | [arglen(4) | argbytes] * argc
//! Response:  len(4) | status(4) | payload
//! ```
//!
//! All integers are little-endian u32. A request's `len` must equal
//! `4 + sum(4 + arglen)` over its arguments; a response's `len` is
//! `4 + payload.len()`.
//!
//! ## Modules
//!
//! - `frame`: incremental request decoder plus request/response encoders
//!
//! ## Example
//!
//! ```
//! use wirekv::protocol::{decode_request, encode_request};
//! use bytes::Bytes;
//!
//! let args = vec![Bytes::from("get"), Bytes::from("name")];
//! let mut buf = Vec::new();
//! encode_request(&args, &mut buf).unwrap();
//!
//! let (decoded, consumed) = decode_request(&buf).unwrap().unwrap();
//! assert_eq!(decoded, args);
//! assert_eq!(consumed, buf.len());
//! ```

pub mod frame;

pub use frame::{
    decode_request, encode_request, encode_response, FrameError, FrameResult, Status,
};

/// Maximum number of bytes after a message's length field.
pub const MAX_MSG: usize = 4096;

/// Maximum number of arguments in a single request.
pub const MAX_ARGS: usize = 1024;

/// Size of the length prefix (and of every integer on the wire).
pub const HEADER_SIZE: usize = 4;
