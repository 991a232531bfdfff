//! Line input for the interactive commands.
//!
//! Lines are read on a plain thread and forwarded over a channel. A read
//! that never completes then only parks that thread; the runtime can shut
//! down as soon as the command is done.

use std::io::BufRead;

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Forward each line of `reader` until EOF, a read error, or the receiver
/// going away. The receiver yields `None` at EOF.
pub(crate) fn spawn_line_reader<R>(reader: R) -> UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = unbounded_channel();
    let spawned = std::thread::Builder::new()
        .name("stdin-lines".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("Failed to start input reader: {}", e);
    }
    rx
}

/// Lines typed on the terminal.
pub(crate) fn stdin_lines() -> UnboundedReceiver<String> {
    spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
}
