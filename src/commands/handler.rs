//! Command Handler
//!
//! Implements the three commands of the protocol:
//!
//! - `GET key`: status `Ok` + value, or `NotFound` + empty payload
//! - `SET key value`: status `Ok`, empty payload
//! - `DEL key`: status `Ok`, empty payload (even when the key was absent)
//!
//! Verbs are matched case-insensitively; anything else, including a known
//! verb with the wrong number of arguments, earns an `Error` status with a
//! short diagnostic payload.

use crate::protocol::{encode_response, Status, MAX_MSG};
use crate::storage::Store;
use bytes::Bytes;
use std::sync::Arc;

/// The outcome of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub payload: Bytes,
}

impl Response {
    pub fn ok(payload: Bytes) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    pub fn ok_empty() -> Self {
        Self::ok(Bytes::new())
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::NotFound,
            payload: Bytes::new(),
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Bytes::copy_from_slice(msg.as_bytes()),
        }
    }

    /// Appends this response's wire encoding to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        encode_response(self.status, &self.payload, out);
    }
}

/// Dispatches decoded requests against the store.
///
/// Cheap to clone; every connection task holds one, all sharing the same
/// store handle. Dispatch is synchronous and never suspends.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    store: Arc<Store>,
}

impl CommandHandler {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Executes one command and returns the response to send.
    pub fn execute(&self, args: &[Bytes]) -> Response {
        let verb = match args.first() {
            Some(v) => v,
            None => return Response::error("Empty cmd"),
        };

        if verb.eq_ignore_ascii_case(b"get") {
            self.cmd_get(args)
        } else if verb.eq_ignore_ascii_case(b"set") {
            self.cmd_set(args)
        } else if verb.eq_ignore_ascii_case(b"del") {
            self.cmd_del(args)
        } else {
            Response::error("Unknown cmd")
        }
    }

    /// GET key
    fn cmd_get(&self, args: &[Bytes]) -> Response {
        if args.len() != 2 {
            return Response::error("wrong number of arguments for 'GET'");
        }

        match self.store.get(&args[1]) {
            Some(value) => {
                // Values arrive inside request frames, so they always fit a
                // response frame with room to spare.
                debug_assert!(value.len() <= MAX_MSG - 4);
                Response::ok(value)
            }
            None => Response::not_found(),
        }
    }

    /// SET key value
    fn cmd_set(&self, args: &[Bytes]) -> Response {
        if args.len() != 3 {
            return Response::error("wrong number of arguments for 'SET'");
        }

        self.store.set(args[1].clone(), args[2].clone());
        Response::ok_empty()
    }

    /// DEL key
    fn cmd_del(&self, args: &[Bytes]) -> Response {
        if args.len() != 2 {
            return Response::error("wrong number of arguments for 'DEL'");
        }

        self.store.delete(&args[1]);
        Response::ok_empty()
    }
}
