use crate::config::ConfigError;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    InvalidEndpoint(#[from] ConfigError),

    #[error("{endpoint} uses wss but dexscope was built without the `tls` feature")]
    TlsUnavailable { endpoint: String },

    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    #[error("websocket stream from {endpoint} failed: {source}")]
    Stream {
        endpoint: String,
        #[source]
        source: Box<tungstenite::Error>,
    },
}

impl TransportError {
    pub fn connect(endpoint: impl Into<String>, source: tungstenite::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    pub fn stream(endpoint: impl Into<String>, source: tungstenite::Error) -> Self {
        Self::Stream {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}
