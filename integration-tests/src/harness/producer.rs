use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// What the producer does once every scripted frame is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterFrames {
    /// Send a close frame and hang up.
    Close,
    /// Keep the connection open until the client goes away.
    WaitForClient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducerReport {
    pub saw_client_close: bool,
}

/// A one-shot WebSocket server that plays a fixed list of frames to the
/// first client that connects.
pub struct TestProducer {
    endpoint: String,
    handle: JoinHandle<ProducerReport>,
}

impl TestProducer {
    pub async fn start(frames: Vec<Message>, after: AfterFrames) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind producer");
        let addr = listener.local_addr().expect("producer has no local addr");

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept failed");
            let mut ws = accept_async(stream).await.expect("websocket handshake failed");

            for frame in frames {
                ws.send(frame).await.expect("failed to send frame");
            }

            match after {
                AfterFrames::Close => {
                    let _ = ws.close(None).await;
                    // drain until the client answers the close
                    while let Some(Ok(_)) = ws.next().await {}
                    ProducerReport {
                        saw_client_close: false,
                    }
                }
                AfterFrames::WaitForClient => {
                    let mut saw_client_close = false;
                    while let Some(msg) = ws.next().await {
                        match msg {
                            Ok(Message::Close(_)) => saw_client_close = true,
                            Ok(_) => {}
                            Err(_) => break,
                        }
                    }
                    ProducerReport { saw_client_close }
                }
            }
        });

        Self {
            endpoint: format!("ws://{addr}"),
            handle,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn finish(self) -> ProducerReport {
        self.handle.await.expect("producer task panicked")
    }
}
