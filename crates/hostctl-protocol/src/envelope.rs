//! Response envelopes written back to clients.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::request::NetworkConfig;

/// Name of the key that carries the status discriminator.
///
/// The credential service and the network service's successful `GET` reply use
/// `result`; every other reply uses `status`. Clients in the field depend on
/// the exact key, so it is chosen per reply rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKey {
    /// `{"result": ...}`
    Result,
    /// `{"status": ...}`
    Status,
}

impl StatusKey {
    /// JSON key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Result => "result",
            Self::Status => "status",
        }
    }
}

/// Outcome carried by the status discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The request was carried out.
    Success,
    /// The request was rejected or failed.
    Error,
}

impl Status {
    /// JSON value of the discriminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Body following the discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Human-readable outcome, serialised under `message`.
    Message(String),
    /// Current network settings, serialised under `config`.
    Config(NetworkConfig),
    /// Unix time in seconds, serialised under `timestamp`.
    Timestamp(i64),
}

/// A single JSON reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    key: StatusKey,
    status: Status,
    payload: Payload,
}

impl Envelope {
    /// Builds a successful reply.
    #[must_use]
    pub const fn success(key: StatusKey, payload: Payload) -> Self {
        Self {
            key,
            status: Status::Success,
            payload,
        }
    }

    /// Builds a successful reply carrying only a message.
    #[must_use]
    pub fn success_message(key: StatusKey, message: impl Into<String>) -> Self {
        Self::success(key, Payload::Message(message.into()))
    }

    /// Builds an error reply.
    #[must_use]
    pub fn error(key: StatusKey, message: impl Into<String>) -> Self {
        Self {
            key,
            status: Status::Error,
            payload: Payload::Message(message.into()),
        }
    }

    /// Key carrying the discriminator.
    #[must_use]
    pub const fn key(&self) -> StatusKey {
        self.key
    }

    /// Outcome of the request.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Body of the reply.
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Message text, when the payload is a message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match &self.payload {
            Payload::Message(message) => Some(message),
            Payload::Config(_) | Payload::Timestamp(_) => None,
        }
    }

    /// Serialises the reply as compact JSON without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error; with the payload types above this does
    /// not happen in practice.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decodes a reply received from a daemon.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvelopeDecodeError`] when the bytes are not a JSON object
    /// with a recognised discriminator and body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, EnvelopeDecodeError> {
        let Value::Object(mut object) = serde_json::from_slice::<Value>(bytes)? else {
            return Err(EnvelopeDecodeError::NotAnObject);
        };

        let (key, raw_status) = match (object.remove("status"), object.remove("result")) {
            (Some(status), _) => (StatusKey::Status, status),
            (None, Some(result)) => (StatusKey::Result, result),
            (None, None) => return Err(EnvelopeDecodeError::MissingStatus),
        };
        let status = match raw_status.as_str() {
            Some("success") => Status::Success,
            Some("error") => Status::Error,
            _ => return Err(EnvelopeDecodeError::InvalidStatus(raw_status.to_string())),
        };

        let payload = if let Some(config) = object.remove("config") {
            Payload::Config(serde_json::from_value(config)?)
        } else if let Some(timestamp) = object.remove("timestamp") {
            let seconds = timestamp
                .as_i64()
                .ok_or(EnvelopeDecodeError::MissingBody)?;
            Payload::Timestamp(seconds)
        } else if let Some(Value::String(message)) = object.remove("message") {
            Payload::Message(message)
        } else {
            return Err(EnvelopeDecodeError::MissingBody);
        };

        Ok(Self {
            key,
            status,
            payload,
        })
    }
}

impl Serialize for Envelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.key.as_str(), self.status.as_str())?;
        match &self.payload {
            Payload::Message(message) => map.serialize_entry("message", message)?,
            Payload::Config(config) => map.serialize_entry("config", config)?,
            Payload::Timestamp(seconds) => map.serialize_entry("timestamp", seconds)?,
        }
        map.end()
    }
}

/// Errors raised while decoding a reply.
#[derive(Debug, Error)]
pub enum EnvelopeDecodeError {
    /// The reply was not valid JSON or had a malformed body.
    #[error("invalid reply JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The reply was JSON of another type.
    #[error("reply is not a JSON object")]
    NotAnObject,
    /// Neither `status` nor `result` was present.
    #[error("reply carries no status discriminator")]
    MissingStatus,
    /// The discriminator held an unexpected value.
    #[error("unexpected status value {0}")]
    InvalidStatus(String),
    /// No `message`, `config`, or `timestamp` body was present.
    #[error("reply carries no body")]
    MissingBody,
}
