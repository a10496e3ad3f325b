use serde_json::json;

pub fn trade_frame(grpc_recv_us: i64) -> String {
    json!({
        "PumpFunTrade": {
            "mint": vec![7u8; 32],
            "signature": vec![0u8; 64],
            "metadata": { "grpc_recv_us": grpc_recv_us }
        }
    })
    .to_string()
}

pub fn block_frame(slot: u64) -> String {
    json!({ "BlockMeta": { "slot": slot } }).to_string()
}
