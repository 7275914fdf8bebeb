//! Frame Codec
//!
//! Encodes and decodes the length-prefixed message format shared by requests
//! and responses.
//!
//! ## How the Decoder Works
//!
//! TCP is a stream protocol: a read may deliver half a frame, or several
//! frames at once. The decoder therefore works incrementally against whatever
//! the connection has buffered so far and returns:
//!
//! - `Ok(Some((args, consumed)))`: one complete request, `consumed` bytes used
//! - `Ok(None)`: incomplete frame, nothing consumed; call again with more data
//! - `Err(FrameError)`: protocol violation, fatal for the connection
//!
//! The caller appends incoming bytes to its buffer, calls [`decode_request`],
//! and on success discards `consumed` bytes from the front. `Ok(None)` is
//! idempotent: re-invoking with the same bytes plus more appended yields the
//! same eventual result.
//!
//! ## Exact Fit
//!
//! A request's declared length must be consumed exactly by its arguments:
//! bytes left over *inside* the frame are [`FrameError::TrailingBytes`].
//! Bytes left over *after* the frame in the caller's buffer are the next
//! pipelined request and are none of the decoder's business.

use crate::protocol::{HEADER_SIZE, MAX_ARGS, MAX_MSG};
use bytes::Bytes;
use thiserror::Error;

/// Errors that make a byte stream undecodable.
///
/// Every variant is connection-fatal: the peer has violated the framing
/// contract and there is no way to resynchronize a length-prefixed stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Declared message length exceeds [`MAX_MSG`]
    #[error("message too large: {len} bytes")]
    Oversized { len: usize },

    /// Declared argument count exceeds [`MAX_ARGS`]
    #[error("too many arguments: {argc}")]
    TooManyArgs { argc: usize },

    /// An argument length runs past the frame boundary
    #[error("argument length out of range: {arglen} at offset {offset}")]
    BadArgLen { arglen: usize, offset: usize },

    /// Bytes left inside the declared frame after the last argument
    #[error("{0} trailing bytes inside frame")]
    TrailingBytes(usize),

    /// A request body shorter than its own argument-count field
    #[error("frame too short for argument count")]
    Underflow,
}

/// Result type for framing operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Response status codes, transmitted as a little-endian u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Status {
    /// The operation succeeded
    Ok = 0,
    /// The request was understood but could not be served (bad verb, arity)
    Error = 1,
    /// The requested key does not exist
    NotFound = 2,
}

impl Status {
    /// Wire representation of this status.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Parses a wire status code.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Status::Ok),
            1 => Some(Status::Error),
            2 => Some(Status::NotFound),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Error => write!(f, "ERR"),
            Status::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// Reads a little-endian u32 at `offset`. Caller guarantees the bounds.
#[inline]
fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

/// Attempts to decode one request frame from the front of `buf`.
///
/// # Returns
///
/// - `Ok(Some((args, consumed)))`: a complete request; the caller must
///   discard `consumed` bytes from the front of its buffer
/// - `Ok(None)`: need more data; nothing was consumed
/// - `Err(e)`: malformed frame; the caller must close the connection
pub fn decode_request(buf: &[u8]) -> FrameResult<Option<(Vec<Bytes>, usize)>> {
    if buf.len() < HEADER_SIZE {
        return Ok(None);
    }

    let len = read_u32(buf, 0) as usize;
    if len > MAX_MSG {
        return Err(FrameError::Oversized { len });
    }
    if buf.len() < HEADER_SIZE + len {
        return Ok(None);
    }

    // The whole frame is buffered; from here every shortfall is the sender's
    // fault, not a need-more-data condition.
    let body = &buf[HEADER_SIZE..HEADER_SIZE + len];
    if body.len() < 4 {
        return Err(FrameError::Underflow);
    }

    let argc = read_u32(body, 0) as usize;
    if argc > MAX_ARGS {
        return Err(FrameError::TooManyArgs { argc });
    }

    let mut args = Vec::with_capacity(argc);
    let mut pos = 4;
    for _ in 0..argc {
        if pos + 4 > body.len() {
            return Err(FrameError::BadArgLen {
                arglen: 0,
                offset: pos,
            });
        }
        let arglen = read_u32(body, pos) as usize;
        if pos + 4 + arglen > body.len() {
            return Err(FrameError::BadArgLen {
                arglen,
                offset: pos,
            });
        }
        args.push(Bytes::copy_from_slice(&body[pos + 4..pos + 4 + arglen]));
        pos += 4 + arglen;
    }

    if pos != body.len() {
        return Err(FrameError::TrailingBytes(body.len() - pos));
    }

    Ok(Some((args, HEADER_SIZE + len)))
}

/// Encodes an argument list as a request frame, appending to `out`.
///
/// Fails with [`FrameError::Oversized`] before writing anything if the
/// encoded body would not fit in [`MAX_MSG`].
pub fn encode_request(args: &[Bytes], out: &mut Vec<u8>) -> FrameResult<()> {
    let body_len: usize = 4 + args.iter().map(|a| 4 + a.len()).sum::<usize>();
    if body_len > MAX_MSG {
        return Err(FrameError::Oversized { len: body_len });
    }

    out.reserve(HEADER_SIZE + body_len);
    out.extend_from_slice(&(body_len as u32).to_le_bytes());
    out.extend_from_slice(&(args.len() as u32).to_le_bytes());
    for arg in args {
        out.extend_from_slice(&(arg.len() as u32).to_le_bytes());
        out.extend_from_slice(arg);
    }
    Ok(())
}

/// Encodes a response frame, appending to `out`.
///
/// The payload must fit in `MAX_MSG - 4`; violating that is a bug in the
/// caller, not a runtime condition: every payload the dispatcher produces
/// arrived inside a request frame and is smaller still.
pub fn encode_response(status: Status, payload: &[u8], out: &mut Vec<u8>) {
    debug_assert!(payload.len() <= MAX_MSG - 4, "response payload too large");

    let len = 4 + payload.len();
    out.reserve(HEADER_SIZE + len);
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend_from_slice(&status.code().to_le_bytes());
    out.extend_from_slice(payload);
}
