//! Base-58 rendering of raw byte sequences.
//!
//! Identifiers and signatures arrive as JSON arrays of integers. [`encode`]
//! turns such an array into the canonical base-58 text (Bitcoin alphabet,
//! one leading `1` per leading zero byte). It never fails: values that cannot
//! be represented as bytes are rendered as a comma-joined decimal listing.

mod error;

pub use error::EncodeError;

/// Base-58 encodes a byte buffer.
pub fn encode_bytes(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Converts every value to a byte and base-58 encodes the result.
pub fn try_encode(values: &[u64]) -> Result<String, EncodeError> {
    let bytes = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u8::try_from(value).map_err(|_| EncodeError::ByteOutOfRange { index, value })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(encode_bytes(&bytes))
}

/// Base-58 encodes `values`, falling back to a decimal listing when any value
/// is not a byte.
pub fn encode(values: &[u64]) -> String {
    match try_encode(values) {
        Ok(encoded) => encoded,
        Err(err) => {
            tracing::debug!(error = %err, len = values.len(), "base58 encoding failed, using decimal fallback");
            decimal_listing(values)
        }
    }
}

fn decimal_listing(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
