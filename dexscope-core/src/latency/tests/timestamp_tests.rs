use crate::latency::producer_timestamp;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn reads_grpc_recv_us_from_event_body() {
    // Arrange
    let event = json!({
        "PumpFunTrade": {
            "metadata": { "slot": 1, "grpc_recv_us": 1_700_000_000_000_000i64 },
            "sol_amount": 5
        }
    });

    // Act
    let ts = producer_timestamp(&event);

    // Assert
    assert_eq!(ts, Some(1_700_000_000_000_000));
}

#[test]
fn zero_or_negative_timestamp_is_absent() {
    let zero = json!({ "BlockMeta": { "metadata": { "grpc_recv_us": 0 } } });
    let negative = json!({ "BlockMeta": { "metadata": { "grpc_recv_us": -5 } } });

    assert_eq!(producer_timestamp(&zero), None);
    assert_eq!(producer_timestamp(&negative), None);
}

#[test]
fn missing_metadata_is_absent() {
    let event = json!({ "PumpFunTrade": { "sol_amount": 5 } });

    assert_eq!(producer_timestamp(&event), None);
}

#[test]
fn malformed_timestamps_are_absent() {
    let cases = [
        json!({ "E": { "metadata": { "grpc_recv_us": "1700000000" } } }),
        json!({ "E": { "metadata": { "grpc_recv_us": 1.5 } } }),
        json!({ "E": { "metadata": { "grpc_recv_us": null } } }),
        json!({ "E": { "metadata": { "grpc_recv_us": u64::MAX } } }),
        json!({ "E": { "metadata": "nope" } }),
        json!({ "E": 7 }),
    ];

    for event in cases {
        assert_eq!(producer_timestamp(&event), None, "{event}");
    }
}

#[test]
fn non_object_events_are_absent() {
    assert_eq!(producer_timestamp(&json!([1, 2, 3])), None);
    assert_eq!(producer_timestamp(&json!({})), None);
    assert_eq!(producer_timestamp(&json!("PumpFunTrade")), None);
}
