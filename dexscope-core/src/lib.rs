pub mod cli;
pub mod clock;
pub mod config;
pub mod encode;
pub mod event;
pub mod latency;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod present;
pub mod replay;
pub mod run;
pub mod transport;
