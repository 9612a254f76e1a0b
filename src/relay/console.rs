//! Operator console.
//!
//! Reads lines from the relay's stdin: `q` or `quit` stops the relay,
//! any other non-empty line is broadcast verbatim to every connected
//! client.
//!
//! Stdin is read on a detached OS thread: a blocking read cannot be
//! cancelled, and a Tokio stdin read would hold up runtime shutdown.

use std::io::BufRead;

use tokio::sync::mpsc;

use crate::domain::{EventBus, Origin, RelayEvent};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Stop the relay.
    Quit,
    /// Send the text to every client.
    Broadcast(String),
    /// Blank line; ignored.
    Nothing,
}

/// Why the console loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleExit {
    /// The operator asked the relay to stop.
    Quit,
    /// Input ended (or failed) without a quit command.
    Eof,
}

/// Parses one console line.
#[must_use]
pub fn parse_line(line: &str) -> ConsoleCommand {
    match line.trim() {
        "" => ConsoleCommand::Nothing,
        "q" | "quit" => ConsoleCommand::Quit,
        text => ConsoleCommand::Broadcast(text.to_string()),
    }
}

/// Spawns a thread forwarding stdin lines until end of input.
///
/// # Errors
///
/// Returns an I/O error if the thread cannot be spawned.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("relay-console".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "console input failed");
                        break;
                    }
                }
            }
        })?;
    Ok(rx)
}

/// Runs the console until `quit` or end of input.
pub async fn run(mut lines: mpsc::UnboundedReceiver<String>, bus: EventBus) -> ConsoleExit {
    while let Some(line) = lines.recv().await {
        match parse_line(&line) {
            ConsoleCommand::Quit => {
                tracing::info!(clients = bus.receiver_count(), "quit requested from console");
                return ConsoleExit::Quit;
            }
            ConsoleCommand::Broadcast(text) => {
                let delivered = bus.publish(RelayEvent::Frame {
                    origin: Origin::Operator,
                    text,
                });
                tracing::info!(delivered, "messaged clients from console");
            }
            ConsoleCommand::Nothing => {}
        }
    }
    ConsoleExit::Eof
}
