//! Canonical JSON mapping exchanged with the native engine.
//!
//! Serialization is deterministic: discriminator tokens are emitted exactly
//! as the engine expects them, absent optional fields are omitted entirely,
//! and array/transform ordering is preserved. Deserialization is a thin
//! pass-through to serde_json.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::schema::Schema;

/// Serializes a schema tree into the wire document sent to the engine.
pub fn to_wire(schema: &Schema) -> serde_json::Result<String> {
    serde_json::to_string(schema)
}

/// Serializes a schema tree into a JSON value, useful for inspection.
pub fn to_wire_value(schema: &Schema) -> serde_json::Result<Value> {
    serde_json::to_value(schema)
}

/// Deserializes engine output (or a wire document) into a caller type.
pub fn from_wire<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    serde_json::from_str(text)
}
