//! Per-message processing: parse → normalize → latency → classify.
//!
//! Everything here is synchronous and holds no state between messages.

#[cfg(test)]
mod tests;

use crate::event::{ClassifiedEvent, EventKind, classify};
use crate::latency::{LatencySample, LatencyThresholds, producer_timestamp};
use crate::normalize::normalize_with_report;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to parse message: {0}")]
    MalformedMessage(#[from] serde_json::Error),
}

/// A raw text message and the instant it came off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub text: String,
    pub received_at_us: i64,
}

impl InboundMessage {
    pub fn new(text: impl Into<String>, received_at_us: i64) -> Self {
        Self {
            text: text.into(),
            received_at_us,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedEvent {
    pub kind: EventKind,
    /// Normalized body (the whole event when untagged or unknown).
    pub body: Value,
    pub latency: Option<LatencySample>,
    pub received_at_us: i64,
}

impl ProcessedEvent {
    pub fn tag(&self) -> Option<&str> {
        self.kind.tag()
    }
}

pub fn process(
    message: &InboundMessage,
    thresholds: &LatencyThresholds,
) -> Result<ProcessedEvent, PipelineError> {
    process_message(&message.text, message.received_at_us, thresholds)
}

/// Processes one raw message. `received_at_us` must have been captured before
/// this call so parsing time is not counted as delivery latency.
pub fn process_message(
    raw: &str,
    received_at_us: i64,
    thresholds: &LatencyThresholds,
) -> Result<ProcessedEvent, PipelineError> {
    let parsed: Value = serde_json::from_str(raw)?;

    let (normalized, report) = normalize_with_report(&parsed);
    if report.total() > 0 {
        tracing::trace!(
            identifiers = report.identifiers,
            signatures = report.signatures,
            "normalized byte arrays"
        );
    }

    let latency = thresholds.evaluate(producer_timestamp(&normalized), received_at_us);

    let ClassifiedEvent { kind, body } = classify(normalized);

    Ok(ProcessedEvent {
        kind,
        body,
        latency,
        received_at_us,
    })
}
