mod common;

use common::{block_frame, trade_frame};
use dexscope_core::config::DisplayConfig;
use dexscope_core::latency::LatencyThresholds;
use dexscope_core::pipeline::process_message;
use dexscope_core::present::CollectingSink;
use dexscope_core::run::run_stream;
use dexscope_core::transport::{ShutdownHandle, TransportSession};
use integration_tests::harness::{AfterFrames, TestProducer, captured_events};
use std::future::pending;
use tokio_tungstenite::tungstenite::Message;
use tracing::Level;

#[test]
fn malformed_message_is_logged_as_warning() {
    let events = captured_events();

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        let producer = TestProducer::start(
            vec![
                Message::Text("not json at all".into()),
                Message::Text(block_frame(3).into()),
            ],
            AfterFrames::Close,
        )
        .await;

        let session = TransportSession::connect(producer.endpoint()).await.unwrap();
        let shutdown = ShutdownHandle::new();
        let (mut rx, _reader) = session.into_channel(4, shutdown.subscribe());
        let mut sink = CollectingSink::default();

        run_stream(
            &mut rx,
            &mut sink,
            &LatencyThresholds::default(),
            &DisplayConfig::default(),
            pending(),
        )
        .await
        .unwrap();

        assert_eq!(sink.events.len(), 1);
        producer.finish().await;
    });

    let events = events.lock().unwrap();
    let warning = events
        .iter()
        .find(|e| e.message() == Some("skipping malformed message"))
        .expect("no warning for malformed message");

    assert_eq!(warning.level, Level::WARN);
    assert!(
        warning
            .field("error")
            .is_some_and(|e| e.starts_with("failed to parse message"))
    );
    assert_eq!(warning.field("len"), Some("15"));

    assert!(
        events
            .iter()
            .any(|e| e.message() == Some("connected to event stream"))
    );
}

#[test]
fn byte_array_rewrites_are_traced_with_their_path() {
    // Arrange
    let events = captured_events();

    // Act
    let event = process_message(&trade_frame(1), 2, &LatencyThresholds::default()).unwrap();

    // Assert
    assert!(event.body["signature"].is_string());

    let events = events.lock().unwrap();
    let rewrites: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("rewrote byte array"))
        .collect();

    assert!(rewrites.iter().all(|e| e.level == Level::TRACE));
    assert!(rewrites.iter().any(|e| {
        e.field("path") == Some("PumpFunTrade.mint") && e.field("kind") == Some("Identifier")
    }));
    assert!(rewrites.iter().any(|e| {
        e.field("path") == Some("PumpFunTrade.signature") && e.field("kind") == Some("Signature")
    }));
}
