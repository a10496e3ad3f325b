//! Replays newline-delimited messages from a file or stdin.
//!
//! Each line is stamped with the local clock when it is read, exactly like a
//! frame coming off the socket. Recorded producer timestamps are usually old,
//! so replayed latencies mostly land in the HIGH tier.

#[cfg(test)]
mod tests;

use crate::clock::now_micros;
use crate::pipeline::InboundMessage;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaySource {
    Stdin,
    File(PathBuf),
}

impl ReplaySource {
    /// `None` and `-` both mean stdin.
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) if p != Path::new("-") => Self::File(p.to_path_buf()),
            _ => Self::Stdin,
        }
    }

    pub async fn open(&self) -> io::Result<Box<dyn AsyncBufRead + Send + Unpin>> {
        match self {
            Self::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Self::File(path) => {
                let file = File::open(path).await?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Forwards every non-blank line of `reader` into `tx`.
///
/// Returns the number of lines sent. Stops early, without error, when the
/// receiver is dropped.
pub async fn feed_lines<R>(reader: R, tx: mpsc::Sender<InboundMessage>) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut sent = 0;

    while let Some(line) = lines.next_line().await? {
        let received_at_us = now_micros();

        if line.trim().is_empty() {
            continue;
        }

        if tx.send(InboundMessage::new(line, received_at_us)).await.is_err() {
            tracing::debug!(sent, "consumer dropped, stopping replay");
            break;
        }
        sent += 1;
    }

    Ok(sent)
}
