pub mod config;
pub mod replay;
pub mod watch;

use crate::config::{DEFAULT_CONFIG_PATH, DexscopeConfig, DisplayConfig};
use crate::logging::{OutputMode, default_output_mode};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

/// Flags shared by every command that presents events.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Path to the dexscope config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// One compact JSON line per event
    #[arg(long, conflicts_with = "pretty")]
    pub raw: bool,

    /// Human-readable output
    #[arg(long)]
    pub pretty: bool,

    /// Disable colors in pretty output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_PATH),
            raw: false,
            pretty: false,
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub mode: OutputMode,
    pub color: bool,
}

impl OutputArgs {
    /// Flags win over the config file, the config file wins over the
    /// terminal-based default. `NO_COLOR` is honored.
    pub fn resolve(&self, display: &DisplayConfig) -> Output {
        let mode = if self.raw {
            OutputMode::Raw
        } else if self.pretty {
            OutputMode::Pretty
        } else {
            display.mode.unwrap_or_else(default_output_mode)
        };

        let color = mode == OutputMode::Pretty
            && display.color
            && !self.no_color
            && std::env::var_os("NO_COLOR").is_none();

        Output { mode, color }
    }

    pub fn load_config(&self) -> Result<DexscopeConfig> {
        Ok(DexscopeConfig::load_or_default(&self.config)?)
    }
}

/// The consumer is a single sequential loop; one thread is all it needs.
fn runtime() -> Result<Runtime> {
    Ok(Builder::new_current_thread().enable_all().build()?)
}
