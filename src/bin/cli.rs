//! wirekv-cli - Command-Line Client
//!
//! Sends a single command to a wirekv server and prints the reply:
//!
//! ```text
//! $ wirekv-cli set name wirekv
//! OK
//! $ wirekv-cli get name
//! OK wirekv
//! $ wirekv-cli get missing
//! NOT_FOUND
//! ```

use anyhow::{bail, Context};
use bytes::Bytes;
use wirekv::client::Client;
use wirekv::protocol::Status;

fn print_usage() {
    eprintln!(
        r#"wirekv-cli - client for the wirekv server

USAGE:
    wirekv-cli [--addr <HOST:PORT>] get <key>
    wirekv-cli [--addr <HOST:PORT>] set <key> <value>
    wirekv-cli [--addr <HOST:PORT>] del <key>

The default address is 127.0.0.1:7700."#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut addr = format!("{}:{}", wirekv::DEFAULT_HOST, wirekv::DEFAULT_PORT);
    if args.first().map(String::as_str) == Some("--addr") {
        if args.len() < 2 {
            print_usage();
            bail!("--addr requires a value");
        }
        addr = args[1].clone();
        args.drain(0..2);
    }

    if args.is_empty() {
        print_usage();
        bail!("missing command");
    }

    let request: Vec<Bytes> = args.iter().map(|a| Bytes::from(a.clone())).collect();

    let mut client = Client::connect(&addr)
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;

    client.send_request(&request).await?;
    let (status, payload) = client.receive_response().await?;

    if payload.is_empty() {
        println!("{status}");
    } else {
        match std::str::from_utf8(&payload) {
            Ok(text) => println!("{status} {text}"),
            Err(_) => println!("{status} (binary, {} bytes)", payload.len()),
        }
    }

    // Application errors are reflected in the exit code so scripts can tell
    // a served error from transport failure (which bails above).
    if status == Status::Error {
        std::process::exit(1);
    }
    Ok(())
}
