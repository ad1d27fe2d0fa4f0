//! JSON envelope handling.
//!
//! Calendar endpoints wrap their JSON in a fixed-width script prefix and
//! suffix. The payload is whatever lies between them.

use serde_json::Value;

/// Bytes stripped from the front of every JSON response.
pub const PREFIX_LEN: usize = 13;

/// Bytes stripped from the end of every JSON response.
pub const SUFFIX_LEN: usize = 2;

/// Strips the envelope and decodes the payload.
///
/// Returns `None` for bodies too short to hold a payload, payloads that are
/// not valid JSON, and JSON that is not an object.
pub fn decode_envelope(body: &str) -> Option<Value> {
    let end = body.len().checked_sub(SUFFIX_LEN)?;
    let payload = body.get(PREFIX_LEN..end)?;

    match serde_json::from_str(payload) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn wrap_envelope(payload: &str) -> String {
    format!("armoryData = {payload};\n")
}
