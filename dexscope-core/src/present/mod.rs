//! Presentation of processed events.
//!
//! - **Pretty**: banner, latency lines colored by tier, event label and the
//!   normalized body as indented JSON
//! - **Raw**: one compact JSON object per event, for piping into other tools

mod pretty;
mod raw;

pub use pretty::PrettyPresenter;
pub use raw::RawPresenter;

use crate::logging::OutputMode;
use crate::pipeline::{PipelineError, ProcessedEvent};
use std::io::{self, Write};

pub trait EventSink {
    fn present(&mut self, event: &ProcessedEvent) -> io::Result<()>;

    fn malformed(&mut self, error: &PipelineError) -> io::Result<()>;
}

pub fn stdout_sink(mode: OutputMode, color: bool) -> Box<dyn EventSink + Send> {
    match mode {
        OutputMode::Pretty => Box::new(PrettyPresenter::new(io::stdout(), color)),
        OutputMode::Raw => Box::new(RawPresenter::new(io::stdout())),
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn present(&mut self, event: &ProcessedEvent) -> io::Result<()> {
        (**self).present(event)
    }

    fn malformed(&mut self, error: &PipelineError) -> io::Result<()> {
        (**self).malformed(error)
    }
}

/// Collects everything it is given. Used by tests and embedders.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub events: Vec<ProcessedEvent>,
    pub malformed: Vec<String>,
}

impl EventSink for CollectingSink {
    fn present(&mut self, event: &ProcessedEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }

    fn malformed(&mut self, error: &PipelineError) -> io::Result<()> {
        self.malformed.push(error.to_string());
        Ok(())
    }
}

fn flush<W: Write>(out: &mut W) -> io::Result<()> {
    out.flush()
}
