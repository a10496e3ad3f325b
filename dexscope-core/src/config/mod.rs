mod error;

pub use error::ConfigError;

use crate::latency::LatencyThresholds;
use crate::logging::OutputMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9001";
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;
pub const DEFAULT_CONFIG_PATH: &str = "config/dexscope.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DexscopeConfig {
    pub transport: TransportConfig,
    pub latency: LatencyThresholds,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// e.g. "ws://127.0.0.1:9001"
    pub endpoint: String,

    /// Messages buffered between the socket reader and the consumer.
    pub channel_capacity: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Unset means pretty on a terminal, raw otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutputMode>,

    pub color: bool,

    /// Event tags to present. Empty presents everything.
    pub kinds: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: None,
            color: true,
            kinds: Vec::new(),
        }
    }
}

impl DisplayConfig {
    pub fn shows(&self, tag: Option<&str>) -> bool {
        if self.kinds.is_empty() {
            return true;
        }
        tag.is_some_and(|tag| self.kinds.iter().any(|k| k == tag))
    }
}

impl DexscopeConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(path, &contents)
    }

    pub fn from_toml(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads `path`, or the defaults when the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(ConfigError::ReadFile { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint(&self.transport.endpoint)?;

        if self.transport.channel_capacity == 0 {
            return Err(ConfigError::ZeroChannelCapacity);
        }

        let LatencyThresholds { medium_us, high_us } = self.latency;
        if medium_us < 0 || medium_us >= high_us {
            return Err(ConfigError::InvalidThresholds { medium_us, high_us });
        }

        Ok(())
    }
}

pub fn validate_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::invalid_endpoint(endpoint, e.to_string()))?;

    match url.scheme() {
        "ws" | "wss" => {}
        other => {
            return Err(ConfigError::invalid_endpoint(
                endpoint,
                format!("unsupported scheme '{other}', expected ws or wss"),
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(ConfigError::invalid_endpoint(endpoint, "missing host"));
    }

    Ok(url)
}
