//! Event kinds and top-level tag classification.
//!
//! Producer events are externally tagged: a JSON object with exactly one key
//! naming the kind, whose value is the event body.

mod kind;

pub use kind::EventKind;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub kind: EventKind,
    /// Body under the tag for tagged events; the whole event otherwise.
    pub body: Value,
}

impl ClassifiedEvent {
    /// Top-level tag as it appeared on the wire, if the event had one.
    pub fn tag(&self) -> Option<&str> {
        self.kind.tag()
    }
}

pub fn classify(event: Value) -> ClassifiedEvent {
    let single_tag = match &event {
        Value::Object(map) if map.len() == 1 => map.keys().next().cloned(),
        _ => None,
    };

    let Some(tag) = single_tag else {
        return ClassifiedEvent {
            kind: EventKind::Untagged,
            body: event,
        };
    };

    let kind = EventKind::from_tag(&tag);
    if !kind.is_known() {
        return ClassifiedEvent { kind, body: event };
    }

    let body = match event {
        Value::Object(mut map) => map.remove(&tag).unwrap_or(Value::Null),
        other => other,
    };

    ClassifiedEvent { kind, body }
}
