//! The consumer loop.
//!
//! Pulls messages off a channel one at a time and pushes each through the
//! pipeline into a sink. Whatever feeds the channel (a WebSocket reader, a
//! replayed file) is not this module's concern: a closed channel ends the
//! loop, and so does the interrupt future.


use crate::config::DisplayConfig;
use crate::latency::LatencyThresholds;
use crate::pipeline::{InboundMessage, process};
use crate::present::EventSink;
use std::future::Future;
use std::io;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The producer side closed the channel.
    Closed,
    Interrupted,
    /// Stdout went away (e.g. piped into `head`).
    OutputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    pub presented: u64,
    pub filtered: u64,
    pub malformed: u64,
    pub end: StreamEnd,
}

impl StreamSummary {
    fn new() -> Self {
        Self {
            presented: 0,
            filtered: 0,
            malformed: 0,
            end: StreamEnd::Closed,
        }
    }
}

/// Consumes `rx` until it closes or `interrupt` resolves.
///
/// Messages are handled strictly in arrival order and one at a time. A
/// malformed message is reported and skipped; it never ends the loop. The
/// only error returned is a sink write failure other than a broken pipe.
pub async fn run_stream<S, F>(
    rx: &mut mpsc::Receiver<InboundMessage>,
    sink: &mut S,
    thresholds: &LatencyThresholds,
    display: &DisplayConfig,
    interrupt: F,
) -> io::Result<StreamSummary>
where
    S: EventSink + ?Sized,
    F: Future<Output = ()>,
{
    let mut summary = StreamSummary::new();
    tokio::pin!(interrupt);

    loop {
        let message = tokio::select! {
            biased;

            _ = &mut interrupt => {
                tracing::info!("interrupted, stopping");
                summary.end = StreamEnd::Interrupted;
                break;
            }

            message = rx.recv() => match message {
                Some(message) => message,
                None => {
                    summary.end = StreamEnd::Closed;
                    break;
                }
            },
        };

        match handle_message(&message, sink, thresholds, display, &mut summary) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("output closed, stopping");
                summary.end = StreamEnd::OutputClosed;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        presented = summary.presented,
        filtered = summary.filtered,
        malformed = summary.malformed,
        end = ?summary.end,
        "event stream finished"
    );

    Ok(summary)
}

fn handle_message<S: EventSink + ?Sized>(
    message: &InboundMessage,
    sink: &mut S,
    thresholds: &LatencyThresholds,
    display: &DisplayConfig,
    summary: &mut StreamSummary,
) -> io::Result<()> {
    match process(message, thresholds) {
        Ok(event) => {
            if !display.shows(event.tag()) {
                tracing::debug!(kind = %event.kind, "event filtered out");
                summary.filtered += 1;
                return Ok(());
            }

            sink.present(&event)?;
            summary.presented += 1;
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                len = message.text.len(),
                "skipping malformed message"
            );
            sink.malformed(&e)?;
            summary.malformed += 1;
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM. A handler that cannot be
/// installed never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl-c"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}
