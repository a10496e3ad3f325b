use super::{EventSink, flush};
use crate::clock::from_micros;
use crate::latency::{LatencySample, LatencyTier};
use crate::pipeline::{PipelineError, ProcessedEvent};
use chrono::SecondsFormat;
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

const BANNER_WIDTH: usize = 80;

pub struct PrettyPresenter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> PrettyPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(BANNER_WIDTH))
    }

    fn render_latency(&mut self, sample: &LatencySample) -> io::Result<()> {
        if sample.clock_skewed() {
            let notice = format!(
                "⚠️  Raw latency was negative: {} μs (likely clock skew)",
                sample.raw_delta_us
            );
            let line = self.paint(&notice, Style::new().dimmed());
            writeln!(self.out, "{line}")?;
        }

        writeln!(self.out, "⏱️  gRPC Receive Time: {} μs", sample.producer_us)?;
        writeln!(self.out, "⏱️  Client Receive Time: {} μs", sample.client_us)?;

        let total = format!(
            "⚡ Total Latency: {:.2} ms ({} μs)",
            sample.latency_ms(),
            sample.latency_us
        );
        let line = self.paint(&total, tier_style(sample.tier));
        writeln!(self.out, "{line}")
    }
}

fn tier_style(tier: LatencyTier) -> Style {
    match tier {
        LatencyTier::Low => Style::new().green(),
        LatencyTier::Medium => Style::new().yellow(),
        LatencyTier::High => Style::new().red().bold(),
    }
}

impl<W: Write> EventSink for PrettyPresenter<W> {
    fn present(&mut self, event: &ProcessedEvent) -> io::Result<()> {
        self.banner()?;

        let received = from_micros(event.received_at_us)
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Micros, true))
            .unwrap_or_else(|| event.received_at_us.to_string());
        writeln!(self.out, "📊 New Event Received: {received}")?;

        if let Some(sample) = &event.latency {
            self.render_latency(sample)?;
        }

        self.banner()?;

        let label = format!("{} Event Type: {}", event.kind.icon(), event.kind.label());
        let label = self.paint(&label, Style::new().bold());
        writeln!(self.out, "{label}")?;

        let body = serde_json::to_string_pretty(&event.body).map_err(io::Error::other)?;
        writeln!(self.out, "{body}")?;
        writeln!(self.out)?;

        flush(&mut self.out)
    }

    fn malformed(&mut self, error: &PipelineError) -> io::Result<()> {
        let line = self.paint(&format!("❌ {error}"), Style::new().red());
        writeln!(self.out, "{line}")?;
        flush(&mut self.out)
    }
}
