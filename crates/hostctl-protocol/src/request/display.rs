use serde_json::Value;

use super::{RequestObject, ServiceRequest, require_keys};
use crate::error::RequestError;

/// Status text drawn by the display service.
///
/// All three keys must be present, although any of them may be empty; empty
/// fields are simply not drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Time reported by the GPS receiver.
    pub gps: String,
    /// Time reported by the SNTP server.
    pub ntp: String,
    /// Time currently applied to the host.
    pub time: String,
}

const FRAME_KEYS: [&str; 3] = ["gps", "ntp", "time"];

impl ServiceRequest for DisplayFrame {
    fn from_object(object: &RequestObject) -> Result<Self, RequestError> {
        require_keys(object, &FRAME_KEYS)?;
        Ok(Self {
            gps: field_text(object.get("gps")),
            ntp: field_text(object.get("ntp")),
            time: field_text(object.get("time")),
        })
    }
}

/// Strings are used verbatim, `null` as empty, anything else as its JSON text.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
