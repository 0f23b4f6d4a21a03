//! Request decoding and per-service validation.

mod clock;
mod credential;
mod display;
mod network;

use serde_json::{Map, Value};

use crate::error::RequestError;

pub use self::clock::ClockCommand;
pub use self::credential::Credentials;
pub use self::display::DisplayFrame;
pub use self::network::{NetworkCommand, NetworkConfig};

/// A decoded request before service-specific validation.
pub type RequestObject = Map<String, Value>;

/// A typed request validated from a [`RequestObject`].
pub trait ServiceRequest: Sized {
    /// Validates the decoded object into the typed request.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when the discriminator is absent or unknown,
    /// or when required keys are missing or malformed.
    fn from_object(object: &RequestObject) -> Result<Self, RequestError>;
}

/// Decodes one received payload into a JSON object.
///
/// Trailing whitespace is ignored. Anything beyond a single JSON value,
/// including a second object delivered in the same receive, is rejected.
///
/// # Errors
///
/// Returns [`RequestError::MalformedJson`] when the payload is empty or not
/// valid JSON, and [`RequestError::NotAnObject`] when it is valid JSON of
/// another type.
pub fn decode_object(payload: &[u8]) -> Result<RequestObject, RequestError> {
    let trimmed = trim_trailing_whitespace(payload);
    if trimmed.is_empty() {
        return Err(RequestError::malformed("empty request"));
    }

    match serde_json::from_slice(trimmed).map_err(RequestError::from_json_error)? {
        Value::Object(object) => Ok(object),
        _ => Err(RequestError::NotAnObject),
    }
}

/// Trims trailing ASCII whitespace from a byte slice.
fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    bytes.get(..end).unwrap_or_default()
}

/// Fails with every absent key from `keys`, in the given order.
fn require_keys(object: &RequestObject, keys: &[&'static str]) -> Result<(), RequestError> {
    let missing: Vec<&'static str> = keys
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(RequestError::missing_keys(missing))
    }
}

/// Reads a key that must hold a string.
fn string_field(object: &RequestObject, field: &'static str) -> Result<String, RequestError> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(RequestError::invalid_field(field, "expected a string")),
        None => Err(RequestError::missing_keys(vec![field])),
    }
}

/// Reads the command discriminator, which must be a string.
fn discriminator<'a>(
    object: &'a RequestObject,
    field: &'static str,
) -> Result<&'a str, RequestError> {
    match object.get(field) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(RequestError::unknown_command(field, other.to_string())),
        None => Err(RequestError::missing_keys(vec![field])),
    }
}
