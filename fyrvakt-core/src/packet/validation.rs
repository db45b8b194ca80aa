//! Structural well-formedness checks for inbound packets.

use serde_json::Value;

use super::RawPacket;
use crate::error::PacketError;

/// Returns `true` iff `id` and `source` are strings, `timestamp` is a finite
/// number and `payload` is present. Payload content is never inspected, so an
/// empty string or an explicit `null` still passes.
///
/// Pure: performs no logging, callers decide what to do with a rejection.
pub fn validate(packet: &RawPacket) -> bool {
    string_field("id", packet.id.as_ref()).is_ok()
        && string_field("source", packet.source.as_ref()).is_ok()
        && timestamp_field(packet.timestamp.as_ref()).is_ok()
        && packet.payload.is_some()
}

pub(super) fn string_field<'a>(
    field: &'static str,
    value: Option<&'a Value>,
) -> Result<&'a str, PacketError> {
    match value {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(PacketError::InvalidType {
            field,
            expected: "string",
        }),
        None => Err(PacketError::MissingField(field)),
    }
}

pub(super) fn timestamp_field(value: Option<&Value>) -> Result<i64, PacketError> {
    let invalid = PacketError::InvalidType {
        field: "timestamp",
        expected: "finite number",
    };
    let number = match value {
        Some(Value::Number(n)) => n,
        Some(_) => return Err(invalid),
        None => return Err(PacketError::MissingField("timestamp")),
    };

    if let Some(ms) = number.as_i64() {
        return Ok(ms);
    }
    if number.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        Some(ms) if ms.is_finite() => Ok(ms as i64),
        _ => Err(invalid),
    }
}
