pub mod producer;
pub mod tracing;

pub use producer::{AfterFrames, ProducerReport, TestProducer};
pub use tracing::{CapturedEvent, captured_events};
