use crate::event::EventKind;
use crate::latency::{LatencyThresholds, LatencyTier};
use crate::pipeline::{InboundMessage, PipelineError, process, process_message};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const GRPC_RECV_US: i64 = 1_700_000_000_000_000;

fn trade_message(grpc_recv_us: Option<i64>) -> String {
    let mut metadata = json!({
        "signature": vec![0u8; 64],
        "slot": 301_000_000u64,
    });
    if let Some(ts) = grpc_recv_us {
        metadata["grpc_recv_us"] = json!(ts);
    }

    json!({
        "PumpFunTrade": {
            "metadata": metadata,
            "mint": (0u8..32).collect::<Vec<_>>(),
            "sol_amount": 1_000_000u64,
            "is_buy": true,
        }
    })
    .to_string()
}

#[test]
fn trade_is_normalized_timed_and_classified() {
    // Arrange
    let raw = trade_message(Some(GRPC_RECV_US));
    let received_at_us = GRPC_RECV_US + 12_000;

    // Act
    let event = process_message(&raw, received_at_us, &LatencyThresholds::default()).unwrap();

    // Assert
    assert_eq!(event.kind, EventKind::PumpFunTrade);
    assert_eq!(event.tag(), Some("PumpFunTrade"));
    assert_eq!(event.received_at_us, received_at_us);
    assert_eq!(
        event.body["mint"],
        json!("1thX6LZfHDZZKUs92febYZhYRcXddmzfzF2NvTkPNE")
    );
    assert_eq!(event.body["metadata"]["signature"], json!("1".repeat(64)));
    assert_eq!(event.body["sol_amount"], json!(1_000_000u64));

    let latency = event.latency.unwrap();
    assert_eq!(latency.latency_us, 12_000);
    assert_eq!(latency.tier, LatencyTier::Low);
}

#[test]
fn missing_timestamp_omits_latency() {
    let raw = trade_message(None);

    let event = process_message(&raw, GRPC_RECV_US, &LatencyThresholds::default()).unwrap();

    assert_eq!(event.latency, None);
}

#[test]
fn zero_timestamp_omits_latency() {
    let raw = trade_message(Some(0));

    let event = process_message(&raw, GRPC_RECV_US, &LatencyThresholds::default()).unwrap();

    assert_eq!(event.latency, None);
}

#[test]
fn configured_thresholds_apply() {
    // Arrange
    let raw = trade_message(Some(GRPC_RECV_US));
    let thresholds = LatencyThresholds {
        medium_us: 1_000,
        high_us: 5_000,
    };

    // Act
    let event = process_message(&raw, GRPC_RECV_US + 6_000, &thresholds).unwrap();

    // Assert
    assert_eq!(event.latency.map(|l| l.tier), Some(LatencyTier::High));
}

#[test]
fn malformed_message_is_an_error() {
    // Act
    let result = process_message("{\"PumpFunTrade\": ", GRPC_RECV_US, &LatencyThresholds::default());

    // Assert
    let err = result.unwrap_err();
    assert!(matches!(err, PipelineError::MalformedMessage(_)));
    assert!(err.to_string().starts_with("failed to parse message"));
}

#[test]
fn unknown_event_keeps_whole_normalized_value() {
    let raw = json!({ "NewKind": { "owner": vec![1u8; 32] } }).to_string();

    let event = process_message(&raw, 0, &LatencyThresholds::default()).unwrap();

    assert_eq!(event.kind, EventKind::Unknown("NewKind".into()));
    assert_eq!(
        event.body,
        json!({ "NewKind": { "owner": "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi" } })
    );
}

#[test]
fn non_object_message_is_processed_untagged() {
    let event = process_message("[1,2,3]", 0, &LatencyThresholds::default()).unwrap();

    assert_eq!(event.kind, EventKind::Untagged);
    assert_eq!(event.body, json!([1, 2, 3]));
    assert_eq!(event.latency, None);
}

#[test]
fn process_uses_message_timestamp() {
    let message = InboundMessage::new(trade_message(Some(GRPC_RECV_US)), GRPC_RECV_US + 80_000);

    let event = process(&message, &LatencyThresholds::default()).unwrap();

    assert_eq!(event.received_at_us, GRPC_RECV_US + 80_000);
    assert_eq!(event.latency.map(|l| l.tier), Some(LatencyTier::Medium));
}

#[test]
fn independent_messages_do_not_share_state() {
    let thresholds = LatencyThresholds::default();
    let first = process_message(&trade_message(Some(GRPC_RECV_US)), GRPC_RECV_US + 1, &thresholds).unwrap();
    let _bad = process_message("nope", 0, &thresholds);
    let again = process_message(&trade_message(Some(GRPC_RECV_US)), GRPC_RECV_US + 1, &thresholds).unwrap();

    assert_eq!(first, again);
    assert!(matches!(first.body, Value::Object(_)));
}
