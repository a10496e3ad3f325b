//! WebSocket transport.
//!
//! A [`TransportSession`] owns one connection. [`TransportSession::into_channel`]
//! moves it into a reader task that stamps every frame with the local receive
//! time and forwards it over a bounded channel. The channel closing is the
//! only end-of-stream signal the consumer sees.

mod error;
mod shutdown;
#[cfg(test)]
mod tests;

pub use error::TransportError;
pub use shutdown::ShutdownHandle;

use crate::clock::now_micros;
use crate::config::validate_endpoint;
use crate::pipeline::InboundMessage;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TransportSession {
    endpoint: String,
    socket: WsStream,
}

impl TransportSession {
    pub async fn connect(endpoint: &str) -> Result<Self, TransportError> {
        let url = validate_endpoint(endpoint)?;
        if url.scheme() == "wss" && !cfg!(feature = "tls") {
            return Err(TransportError::TlsUnavailable {
                endpoint: endpoint.to_string(),
            });
        }

        let (socket, response) = connect_async(endpoint)
            .await
            .map_err(|e| TransportError::connect(endpoint, e))?;

        tracing::info!(
            endpoint,
            status = response.status().as_u16(),
            "connected to event stream"
        );

        Ok(Self {
            endpoint: endpoint.to_string(),
            socket,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Spawns the reader task. The returned receiver yields messages in
    /// delivery order and closes when the connection ends, the shutdown
    /// signal fires, or the task fails (the error is in the join handle).
    pub fn into_channel(
        self,
        capacity: usize,
        shutdown: watch::Receiver<bool>,
    ) -> (
        mpsc::Receiver<InboundMessage>,
        JoinHandle<Result<(), TransportError>>,
    ) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(read_frames(self, tx, shutdown));
        (rx, handle)
    }
}

async fn read_frames(
    session: TransportSession,
    tx: mpsc::Sender<InboundMessage>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), TransportError> {
    let TransportSession {
        endpoint,
        mut socket,
    } = session;

    if *shutdown.borrow_and_update() {
        close(&mut socket, &endpoint).await;
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                // A dropped sender is treated as a shutdown request.
                if changed.is_err() || *shutdown.borrow() {
                    tracing::info!(endpoint, "shutdown requested, closing connection");
                    close(&mut socket, &endpoint).await;
                    return Ok(());
                }
            }

            frame = socket.next() => {
                let received_at_us = now_micros();

                let Some(frame) = frame else {
                    tracing::info!(endpoint, "event stream ended");
                    return Ok(());
                };

                let frame = frame.map_err(|e| TransportError::stream(endpoint.as_str(), e))?;

                let text = match read_frame(frame, &endpoint) {
                    Frame::Data(text) => text,
                    Frame::Skip => continue,
                    Frame::Close => {
                        close(&mut socket, &endpoint).await;
                        return Ok(());
                    }
                };

                if tx.send(InboundMessage::new(text, received_at_us)).await.is_err() {
                    tracing::debug!(endpoint, "consumer dropped, closing connection");
                    close(&mut socket, &endpoint).await;
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Data(String),
    Skip,
    Close,
}

fn read_frame(frame: Message, endpoint: &str) -> Frame {
    match frame {
        Message::Text(text) => Frame::Data(text.as_str().to_owned()),
        Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Frame::Data(text),
            Err(_) => {
                tracing::warn!(endpoint, len = bytes.len(), "dropping non-UTF-8 binary frame");
                Frame::Skip
            }
        },
        Message::Close(reason) => {
            tracing::info!(endpoint, ?reason, "server closed connection");
            Frame::Close
        }
        // tungstenite answers pings itself
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Frame::Skip,
    }
}

async fn close(socket: &mut WsStream, endpoint: &str) {
    if let Err(e) = socket.close(None).await {
        tracing::debug!(endpoint, error = %e, "error while closing websocket");
    }
}
