use crate::config::{ConfigError, DEFAULT_CONFIG_PATH, DexscopeConfig};
use crate::event::EventKind;
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to the config file
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Dump { path, json } => dump(&path, json),
    }
}

/// Unlike `watch`, a missing file is an error here.
pub fn check(path: &Path) -> Result<()> {
    match DexscopeConfig::from_file(path) {
        Ok(cfg) => {
            for line in check_report(&cfg) {
                println!("{line}");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{err}");
            if let Some(hint) = config_error_hint(&err) {
                eprintln!();
                eprintln!("{hint}");
            }
            std::process::exit(1);
        }
    }
}

pub fn check_report(cfg: &DexscopeConfig) -> Vec<String> {
    let mut lines = vec![
        "✔ Config loaded successfully".to_string(),
        format!("✔ endpoint {}", cfg.transport.endpoint),
        format!(
            "✔ latency tiers: LOW < {} μs ≤ MEDIUM < {} μs ≤ HIGH",
            cfg.latency.medium_us, cfg.latency.high_us
        ),
    ];

    if cfg.display.kinds.is_empty() {
        lines.push("✔ showing all event kinds".to_string());
    } else {
        lines.push(format!("✔ showing {} event kinds", cfg.display.kinds.len()));
        for kind in &cfg.display.kinds {
            if !EventKind::from_tag(kind).is_known() {
                lines.push(format!("⚠ '{kind}' is not a known event kind"));
            }
        }
    }

    lines
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ReadFile { .. } => Some(
            "Pass the config path explicitly, e.g.\n\
             \n\
             dexscope config check path/to/dexscope.toml",
        ),

        ConfigError::Parse { .. } => Some(
            "Known sections are [transport], [latency] and [display].\n\
             Unknown keys are rejected.",
        ),

        ConfigError::InvalidEndpoint { .. } => Some(
            "The endpoint must be a WebSocket URL.\n\
             \n\
             Example:\n\
             \n\
             [transport]\n\
             endpoint = \"ws://127.0.0.1:9001\"",
        ),

        ConfigError::InvalidThresholds { .. } => Some(
            "Latency tiers need 0 <= medium_us < high_us.\n\
             \n\
             Example:\n\
             \n\
             [latency]\n\
             medium_us = 50000\n\
             high_us = 100000",
        ),

        ConfigError::ZeroChannelCapacity => None,
    }
}

pub fn dump(path: &Path, json: bool) -> Result<()> {
    let cfg = DexscopeConfig::load_or_default(path)?;

    if json {
        dump_json(&cfg)?;
    } else {
        dump_toml(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_toml<T: Serialize>(value: &T) -> Result<()> {
    let s = toml::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}
