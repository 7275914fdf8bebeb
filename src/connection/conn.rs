//! Connection State Machine
//!
//! Turns a raw, non-blocking byte stream into discrete requests and a stream
//! of responses. One [`Conn`] exists per accepted socket; the scheduler (the
//! per-connection task in `server.rs`) waits for the readiness this state
//! machine asks for and then calls [`Conn::drive`].
//!
//! ## States
//!
//! ```text
//!                 read-ready                      frame decoded
//! ┌──────────────────┐   ┌──────────────────────────┐
//! │ AwaitingRequest  │──>│     SendingResponse      │
//! └──────────────────┘   └──────────────────────────┘
//!         ▲                          │
//!         └──────────────────────────┘
//!              response fully flushed
//!
//!   either state ──(EOF / I/O error / malformed frame)──> Closing
//! ```
//!
//! The read path runs only in `AwaitingRequest`, the write path only in
//! `SendingResponse`, and `Closing` is terminal. There are exactly two
//! suspension points: a read that would block and a write that would block.
//! Everything else (decoding, dispatch, encoding) is synchronous.
//!
//! ## Pipelining
//!
//! A single read may deliver several complete frames. Each is decoded,
//! dispatched, and flushed in turn; as long as flushes complete without
//! blocking, every buffered frame is answered within one `drive` call.
//! Consumed frames are compacted off the front of the read buffer, so memory
//! stays bounded at one maximum frame no matter how deep the client pipelines.

use std::io;

use tokio::io::Interest;
use tracing::{debug, trace, warn};

use crate::commands::CommandHandler;
use crate::connection::FrameBuffer;
use crate::protocol::frame::decode_request;

/// Non-blocking socket operations, as a seam between the state machine and
/// the OS. Both calls must return `io::ErrorKind::WouldBlock` instead of
/// suspending.
pub trait SocketIo {
    fn try_read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn try_write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl SocketIo for tokio::net::TcpStream {
    fn try_read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        tokio::net::TcpStream::try_read(self, buf)
    }

    fn try_write(&mut self, buf: &[u8]) -> io::Result<usize> {
        tokio::net::TcpStream::try_write(self, buf)
    }
}

/// Lifecycle states of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    /// Reading and decoding requests
    AwaitingRequest,
    /// Draining a staged response
    SendingResponse,
    /// Terminal; the scheduler drops the socket
    Closing,
}

/// Per-connection buffers and state.
///
/// All transitions happen inside [`drive`](Self::drive); the scheduler's only
/// obligations are to wait for [`interest`](Self::interest) and to drop the
/// connection once `interest` returns `None`.
#[derive(Debug)]
pub struct Conn {
    state: ConnState,
    rbuf: FrameBuffer,
    wbuf: FrameBuffer,
    wsent: usize,
}

impl Conn {
    pub fn new() -> Self {
        Self {
            state: ConnState::AwaitingRequest,
            rbuf: FrameBuffer::new(),
            wbuf: FrameBuffer::new(),
            wsent: 0,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    /// The readiness the scheduler should wait for before the next
    /// [`drive`](Self::drive), or `None` once the connection is closing.
    pub fn interest(&self) -> Option<Interest> {
        match self.state {
            ConnState::AwaitingRequest => Some(Interest::READABLE),
            ConnState::SendingResponse => Some(Interest::WRITABLE),
            ConnState::Closing => None,
        }
    }

    /// Drives I/O for this connection, given its current readiness.
    ///
    /// Callable repeatedly; connection-fatal conditions (EOF, I/O errors,
    /// malformed frames) transition to `Closing` instead of propagating.
    pub fn drive<S: SocketIo>(&mut self, io: &mut S, handler: &CommandHandler) {
        match self.state {
            ConnState::AwaitingRequest => self.fill(io, handler),
            ConnState::SendingResponse => {
                self.flush(io);
                // The flush may have completed; answer any requests that were
                // already buffered without waiting for another callback.
                if self.state == ConnState::AwaitingRequest {
                    self.process_buffered(io, handler);
                }
            }
            ConnState::Closing => {}
        }
    }

    /// Read path: fill the read buffer and answer every complete frame.
    fn fill<S: SocketIo>(&mut self, io: &mut S, handler: &CommandHandler) {
        loop {
            // A full buffer always holds a decodable (or malformed) frame, so
            // processing below frees space before we get back here.
            debug_assert!(self.rbuf.remaining_capacity() > 0);

            match io.try_read(self.rbuf.unfilled_mut()) {
                Ok(0) => {
                    debug!("peer closed the connection");
                    self.state = ConnState::Closing;
                    return;
                }
                Ok(n) => {
                    trace!(bytes = n, buffered = self.rbuf.len(), "read");
                    self.rbuf.advance(n);
                    self.process_buffered(io, handler);
                    if self.state != ConnState::AwaitingRequest {
                        return;
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "read failed");
                    self.state = ConnState::Closing;
                    return;
                }
            }
        }
    }

    /// Decodes and answers buffered frames, one at a time, until the buffer
    /// holds no complete frame or the connection leaves `AwaitingRequest`.
    fn process_buffered<S: SocketIo>(&mut self, io: &mut S, handler: &CommandHandler) {
        while self.state == ConnState::AwaitingRequest {
            match decode_request(self.rbuf.filled()) {
                Ok(None) => return,
                Ok(Some((args, consumed))) => {
                    self.rbuf.consume(consumed);
                    trace!(
                        consumed,
                        remaining = self.rbuf.len(),
                        "decoded request"
                    );

                    let response = handler.execute(&args);

                    // Invariant: AwaitingRequest implies an empty write buffer.
                    debug_assert!(self.wbuf.is_empty() && self.wsent == 0);
                    let mut encoded = Vec::new();
                    response.encode_into(&mut encoded);
                    self.wbuf.append(&encoded);

                    self.state = ConnState::SendingResponse;
                    self.flush(io);
                    // A completed flush re-enters AwaitingRequest and the
                    // loop proceeds to the next pipelined frame; a blocked
                    // flush leaves SendingResponse and ends the loop.
                }
                Err(e) => {
                    warn!(error = %e, "malformed frame");
                    self.state = ConnState::Closing;
                }
            }
        }
    }

    /// Write path: drain the staged response.
    fn flush<S: SocketIo>(&mut self, io: &mut S) {
        while self.wsent < self.wbuf.len() {
            match io.try_write(&self.wbuf.filled()[self.wsent..]) {
                Ok(0) => {
                    warn!("write returned zero bytes");
                    self.state = ConnState::Closing;
                    return;
                }
                Ok(n) => {
                    trace!(bytes = n, "wrote");
                    self.wsent += n;
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "write failed");
                    self.state = ConnState::Closing;
                    return;
                }
            }
        }

        self.wbuf.clear();
        self.wsent = 0;
        self.state = ConnState::AwaitingRequest;
    }
}

impl Default for Conn {
    fn default() -> Self {
        Self::new()
    }
}
