//! Client Codec
//!
//! The client side of the wire protocol: encode an argument list, write the
//! whole frame, then read exactly one response. Unlike the server's
//! readiness-driven state machine, the client uses plain awaited I/O: a
//! request is not useful until it has been sent in full, so there is nothing
//! to interleave.
//!
//! The codec is generic over the stream so the short-read and EOF paths can
//! be exercised against scripted mocks; real callers construct it from a
//! `TcpStream` via [`Client::connect`].

use bytes::Bytes;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::protocol::{encode_request, FrameError, Status, HEADER_SIZE, MAX_MSG};

/// Errors surfaced by the client codec.
///
/// `ConnectionClosed` and `Truncated` are deliberately distinct: the first
/// means the server hung up between responses (commonly after an oversized or
/// malformed request), the second means it died mid-frame.
#[derive(Debug, Error)]
pub enum ClientError {
    /// I/O error from the underlying stream
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The request does not fit in a frame
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Clean EOF before any byte of the expected message
    #[error("connection closed by server")]
    ConnectionClosed,

    /// EOF after a partial read of the expected message
    #[error("truncated response: expected {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    /// Response length field out of range
    #[error("invalid response length: {0}")]
    BadLength(usize),

    /// Unknown status code in a response
    #[error("unknown status code: {0}")]
    BadStatus(u32),
}

/// A blocking-semantics protocol client over any async byte stream.
#[derive(Debug)]
pub struct Client<S> {
    stream: S,
}

impl Client<TcpStream> {
    /// Connects to a wirekv server.
    pub async fn connect(addr: &str) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Encodes `args` as a request frame and writes it in full.
    ///
    /// Fails before writing anything if the encoded frame would exceed
    /// [`MAX_MSG`]; write errors and short writes surface as `Io`.
    pub async fn send_request(&mut self, args: &[Bytes]) -> Result<(), ClientError> {
        let mut frame = Vec::new();
        encode_request(args, &mut frame)?;
        self.stream.write_all(&frame).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Reads exactly one response frame.
    pub async fn receive_response(&mut self) -> Result<(Status, Bytes), ClientError> {
        let mut header = [0u8; HEADER_SIZE];
        self.read_full(&mut header).await?;

        let len = u32::from_le_bytes(header) as usize;
        if !(4..=MAX_MSG).contains(&len) {
            return Err(ClientError::BadLength(len));
        }

        let mut body = vec![0u8; len];
        // The header is already consumed, so EOF here is a torn frame even if
        // it lands on the first body byte.
        self.read_full(&mut body).await.map_err(|e| match e {
            ClientError::ConnectionClosed => ClientError::Truncated {
                expected: len,
                got: 0,
            },
            other => other,
        })?;

        let code = u32::from_le_bytes([body[0], body[1], body[2], body[3]]);
        let status = Status::from_code(code).ok_or(ClientError::BadStatus(code))?;
        let payload = Bytes::copy_from_slice(&body[4..]);
        Ok((status, payload))
    }

    /// Fills `buf` completely, retrying partial reads.
    ///
    /// EOF on the very first byte is `ConnectionClosed`; EOF later is
    /// `Truncated`.
    async fn read_full(&mut self, buf: &mut [u8]) -> Result<(), ClientError> {
        let mut read = 0;
        while read < buf.len() {
            let n = self.stream.read(&mut buf[read..]).await?;
            if n == 0 {
                return Err(if read == 0 {
                    ClientError::ConnectionClosed
                } else {
                    ClientError::Truncated {
                        expected: buf.len(),
                        got: read,
                    }
                });
            }
            read += n;
        }
        Ok(())
    }
}
