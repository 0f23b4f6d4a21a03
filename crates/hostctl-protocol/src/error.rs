//! Protocol violations detected while decoding and validating requests.

use thiserror::Error;

/// A request that cannot be dispatched.
///
/// The display text of every variant is safe to return to the client: it
/// describes the request, never the host.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The payload was empty or not valid JSON.
    #[error("malformed JSON request: {message}")]
    MalformedJson {
        /// Description of the decoding failure.
        message: String,
        /// Underlying parser error, when one was produced.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The payload was valid JSON but not an object.
    #[error("request must be a JSON object")]
    NotAnObject,

    /// One or more required keys were absent.
    #[error("missing required keys: {}", .keys.join(", "))]
    MissingKeys {
        /// Names of the absent keys, in schema order.
        keys: Vec<&'static str>,
    },

    /// The command discriminator held an unrecognised value.
    #[error("unknown {field} '{value}'")]
    UnknownCommand {
        /// Name of the discriminator key.
        field: &'static str,
        /// Value supplied by the client.
        value: String,
    },

    /// A required key was present but held an empty value.
    #[error("key '{field}' is empty")]
    EmptyField {
        /// Name of the empty key.
        field: &'static str,
    },

    /// A key held a value of the wrong type or shape.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// Name of the offending key.
        field: &'static str,
        /// What was expected.
        reason: String,
    },
}

impl RequestError {
    /// Builds a malformed-request error from a parser failure.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJson {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Builds a malformed-request error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a missing-keys error.
    #[must_use]
    pub fn missing_keys(keys: Vec<&'static str>) -> Self {
        Self::MissingKeys { keys }
    }

    /// Builds an unknown-command error.
    #[must_use]
    pub fn unknown_command(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownCommand {
            field,
            value: value.into(),
        }
    }

    /// Builds an invalid-field error.
    #[must_use]
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
