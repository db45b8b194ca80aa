//! Telemetry packet types.
//!
//! A [`RawPacket`] is whatever arrived from the wire or the generator: every
//! field is kept as an untyped JSON value so that malformed input can be
//! represented and rejected. A [`Packet`] only exists once those fields passed
//! [`validate`].

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PacketError;

mod validation;

pub use validation::validate;

/// Inbound packet as received, before any structural checks.
///
/// `payload` distinguishes a missing key (`None`) from an explicit `null`
/// (`Some(Value::Null)`); only the former is invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPacket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub payload: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl RawPacket {
    /// Builds a well-formed raw packet with a text payload.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        timestamp: i64,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            source: Some(Value::String(source.into())),
            timestamp: Some(Value::from(timestamp)),
            payload: Some(Value::String(payload.into())),
        }
    }

    /// Best-effort identifier for log lines about packets that may be invalid.
    pub fn display_id(&self) -> Cow<'_, str> {
        match &self.id {
            Some(Value::String(id)) => Cow::Borrowed(id.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed("<unknown>"),
        }
    }

    /// Best-effort source for log lines about packets that may be invalid.
    pub fn display_source(&self) -> Cow<'_, str> {
        match &self.source {
            Some(Value::String(source)) => Cow::Borrowed(source.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed("<unknown>"),
        }
    }
}

/// Packet content: free-form text or a structured blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Structured(Value),
}

impl Payload {
    /// Text view used for keyword matching and length scoring.
    ///
    /// Structured payloads are matched against their compact JSON rendering;
    /// `null` reads as the empty string.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Payload::Text(text) => Cow::Borrowed(text.as_str()),
            Payload::Structured(Value::Null) => Cow::Borrowed(""),
            Payload::Structured(Value::String(text)) => Cow::Borrowed(text.as_str()),
            Payload::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Length in characters of [`Payload::as_text`].
    pub fn char_len(&self) -> usize {
        self.as_text().chars().count()
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Payload::Text(text),
            other => Payload::Structured(other),
        }
    }
}

/// A structurally valid telemetry packet. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub id: String,
    pub source: String,
    /// Milliseconds, wall-clock or monotonic depending on the emitter.
    pub timestamp: i64,
    pub payload: Payload,
}

impl Packet {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        timestamp: i64,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            timestamp,
            payload: Payload::Text(payload.into()),
        }
    }

    /// Payload text, see [`Payload::as_text`].
    #[inline]
    pub fn payload_text(&self) -> Cow<'_, str> {
        self.payload.as_text()
    }
}

impl TryFrom<RawPacket> for Packet {
    type Error = PacketError;

    fn try_from(raw: RawPacket) -> Result<Self, Self::Error> {
        let id = validation::string_field("id", raw.id.as_ref())?.to_owned();
        let source = validation::string_field("source", raw.source.as_ref())?.to_owned();
        let timestamp = validation::timestamp_field(raw.timestamp.as_ref())?;
        let payload = raw.payload.ok_or(PacketError::MissingField("payload"))?;

        Ok(Self {
            id,
            source,
            timestamp,
            payload: payload.into(),
        })
    }
}
