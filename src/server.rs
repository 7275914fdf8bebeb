//! TCP Server
//!
//! The readiness scheduler around the connection state machine. Each accepted
//! socket gets its own task that loops: ask the state machine which readiness
//! it needs, wait for it, then hand control back via [`Conn::drive`]. The
//! task never blocks inside the state machine (`drive` only issues
//! non-blocking reads and writes), so a slow peer costs one parked task and
//! one pair of fixed-size buffers, nothing more.
//!
//! ```text
//! ┌─────────────┐ accept ┌──────────────────────────────────────┐
//! │ TcpListener │───────>│ per-connection task                  │
//! └─────────────┘        │                                      │
//!                        │ loop {                               │
//!                        │     ready(conn.interest()).await     │
//!                        │     conn.drive(stream, handler)      │
//!                        │ } until Closing                      │
//!                        └──────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::commands::CommandHandler;
use crate::connection::Conn;
use crate::storage::Store;

/// Accepts connections forever, spawning a task per client.
pub async fn run(listener: TcpListener, store: Arc<Store>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let handler = CommandHandler::new(Arc::clone(&store));
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler).await;
                });
            }
            Err(e) => {
                error!(error = %e, "failed to accept connection");
            }
        }
    }
}

/// Drives one connection from accept to close.
///
/// This is the "external scheduler" the state machine is written against:
/// it decides *when* the connection gets CPU (on readiness) and the state
/// machine decides *what* to do with it.
pub async fn handle_connection(mut stream: TcpStream, addr: SocketAddr, handler: CommandHandler) {
    info!(client = %addr, "client connected");

    let mut conn = Conn::new();
    while let Some(interest) = conn.interest() {
        if let Err(e) = stream.ready(interest).await {
            warn!(client = %addr, error = %e, "readiness wait failed");
            break;
        }
        conn.drive(&mut stream, &handler);
    }

    debug!(client = %addr, state = ?conn.state(), "connection done");
    info!(client = %addr, "client disconnected");
}
