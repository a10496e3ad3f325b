use super::{EventSink, flush};
use crate::latency::LatencyTier;
use crate::pipeline::{PipelineError, ProcessedEvent};
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

#[derive(Serialize)]
struct RawRecord<'a> {
    kind: Option<&'a str>,
    received_at_us: i64,
    latency_us: Option<i64>,
    tier: Option<LatencyTier>,
    event: &'a Value,
}

pub struct RawPresenter<W: Write> {
    out: W,
}

impl<W: Write> RawPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for RawPresenter<W> {
    fn present(&mut self, event: &ProcessedEvent) -> io::Result<()> {
        let record = RawRecord {
            kind: event.tag(),
            received_at_us: event.received_at_us,
            latency_us: event.latency.map(|l| l.latency_us),
            tier: event.latency.map(|l| l.tier),
            event: &event.body,
        };

        serde_json::to_writer(&mut self.out, &record).map_err(io::Error::other)?;
        writeln!(self.out)?;
        flush(&mut self.out)
    }

    // Raw output stays machine-readable; malformed input is only logged.
    fn malformed(&mut self, _error: &PipelineError) -> io::Result<()> {
        Ok(())
    }
}
