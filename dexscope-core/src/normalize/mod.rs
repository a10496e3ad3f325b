//! Structural normalization of producer events.
//!
//! The producer serializes public keys and signatures as plain JSON arrays of
//! bytes. This module walks an event and replaces those arrays with their
//! base-58 text while leaving every other node untouched:
//!
//! - an array of exactly 32 bytes is an identifier, wherever it appears
//! - an array of exactly 64 bytes is a signature only when it sits directly
//!   under a `signature` field; elsewhere it is walked like any other array
//!
//! 64-byte numeric arrays that are not signatures do occur in the feed, while
//! 32-byte arrays are always keys. Do not widen these rules.

mod path;

pub use path::{JsonPath, PathSegment};

use crate::encode::encode;
use serde_json::{Map, Value};

pub const IDENTIFIER_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;
pub const SIGNATURE_FIELD: &str = "signature";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteArrayKind {
    Identifier,
    Signature,
}

/// Counts of arrays rewritten during one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub identifiers: usize,
    pub signatures: usize,
}

impl RewriteReport {
    pub fn total(&self) -> usize {
        self.identifiers + self.signatures
    }

    fn record(&mut self, kind: ByteArrayKind) {
        match kind {
            ByteArrayKind::Identifier => self.identifiers += 1,
            ByteArrayKind::Signature => self.signatures += 1,
        }
    }
}

/// Normalizes a whole event starting from the root path.
pub fn normalize_event(value: &Value) -> Value {
    normalize(value, &JsonPath::root())
}

/// Normalizes a whole event and reports how many arrays were rewritten.
pub fn normalize_with_report(value: &Value) -> (Value, RewriteReport) {
    let mut report = RewriteReport::default();
    let normalized = walk(value, &JsonPath::root(), &mut report);
    (normalized, report)
}

/// Normalizes `value` as if it were found at `path`.
pub fn normalize(value: &Value, path: &JsonPath) -> Value {
    walk(value, path, &mut RewriteReport::default())
}

fn walk(value: &Value, path: &JsonPath, report: &mut RewriteReport) -> Value {
    match value {
        Value::Array(items) => {
            if let Some((kind, bytes)) = classify_array(items, path) {
                tracing::trace!(path = %path, ?kind, "rewrote byte array");
                report.record(kind);
                return Value::String(encode(&bytes));
            }

            let normalized = items
                .iter()
                .enumerate()
                .map(|(idx, item)| walk(item, &path.push_index(idx), report))
                .collect();
            Value::Array(normalized)
        }
        Value::Object(map) => {
            let mut normalized = Map::with_capacity(map.len());
            for (key, child) in map {
                normalized.insert(key.clone(), walk(child, &path.push_field(key), report));
            }
            Value::Object(normalized)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}

/// Decides whether an array found at `path` is an identifier or signature.
pub fn classify_array(items: &[Value], path: &JsonPath) -> Option<(ByteArrayKind, Vec<u64>)> {
    let kind = match items.len() {
        SIGNATURE_LEN if path.ends_with_field(SIGNATURE_FIELD) => ByteArrayKind::Signature,
        IDENTIFIER_LEN => ByteArrayKind::Identifier,
        _ => return None,
    };

    byte_values(items).map(|bytes| (kind, bytes))
}

/// Returns the element values when every element is a JSON integer in `0..=255`.
pub fn byte_values(items: &[Value]) -> Option<Vec<u64>> {
    items
        .iter()
        .map(|item| item.as_u64().filter(|v| *v <= u64::from(u8::MAX)))
        .collect()
}
