//! End-to-end delivery latency.
//!
//! The producer stamps each event with the instant it received the
//! transaction (`metadata.grpc_recv_us`). Comparing that with our own receive
//! instant gives the latency of the whole producer → client path. Clocks on
//! the two hosts are not synchronized, so a negative difference is possible;
//! it is clamped to zero and the raw delta is kept for display.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_MEDIUM_US: i64 = 50_000;
pub const DEFAULT_HIGH_US: i64 = 100_000;

pub const METADATA_FIELD: &str = "metadata";
pub const PRODUCER_TIMESTAMP_FIELD: &str = "grpc_recv_us";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LatencyTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for LatencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LatencyTier::Low => "LOW",
            LatencyTier::Medium => "MEDIUM",
            LatencyTier::High => "HIGH",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LatencySample {
    pub producer_us: i64,
    pub client_us: i64,
    /// `max(0, client_us - producer_us)`
    pub latency_us: i64,
    pub tier: LatencyTier,
    /// Unclamped `client_us - producer_us`; negative means clock skew.
    pub raw_delta_us: i64,
}

impl LatencySample {
    pub fn latency_ms(&self) -> f64 {
        self.latency_us as f64 / 1000.0
    }

    pub fn clock_skewed(&self) -> bool {
        self.raw_delta_us < 0
    }
}

/// Tier boundaries in microseconds. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyThresholds {
    pub medium_us: i64,
    pub high_us: i64,
}

impl Default for LatencyThresholds {
    fn default() -> Self {
        Self {
            medium_us: DEFAULT_MEDIUM_US,
            high_us: DEFAULT_HIGH_US,
        }
    }
}

impl LatencyThresholds {
    pub fn classify(&self, latency_us: i64) -> LatencyTier {
        if latency_us >= self.high_us {
            LatencyTier::High
        } else if latency_us >= self.medium_us {
            LatencyTier::Medium
        } else {
            LatencyTier::Low
        }
    }

    pub fn evaluate(&self, producer_us: Option<i64>, client_us: i64) -> Option<LatencySample> {
        let producer_us = producer_us?;
        let raw_delta_us = client_us.saturating_sub(producer_us);
        let latency_us = raw_delta_us.max(0);

        Some(LatencySample {
            producer_us,
            client_us,
            latency_us,
            tier: self.classify(latency_us),
            raw_delta_us,
        })
    }
}

/// Evaluates latency with the default tier boundaries.
pub fn evaluate(producer_us: Option<i64>, client_us: i64) -> Option<LatencySample> {
    LatencyThresholds::default().evaluate(producer_us, client_us)
}

/// Reads `metadata.grpc_recv_us` from the body of a single-tag event.
///
/// The body is the first top-level value. Anything but a positive integer
/// that fits in `i64` counts as absent; producers send 0 when they have no
/// receive time.
pub fn producer_timestamp(event: &Value) -> Option<i64> {
    let body = event.as_object()?.values().next()?;

    body.get(METADATA_FIELD)?
        .get(PRODUCER_TIMESTAMP_FIELD)?
        .as_i64()
        .filter(|us| *us > 0)
}
