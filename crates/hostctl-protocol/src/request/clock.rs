use serde_json::{Number, Value};

use super::{RequestObject, ServiceRequest, discriminator};
use crate::error::RequestError;

/// Commands accepted by the clock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    /// Read the hardware clock (`{"cmd":"get"}`).
    Get,
    /// Set the hardware and system clocks (`{"cmd":"set","ts":...}`).
    Set {
        /// Unix time in whole seconds.
        timestamp: i64,
    },
}

impl ServiceRequest for ClockCommand {
    fn from_object(object: &RequestObject) -> Result<Self, RequestError> {
        match discriminator(object, "cmd")? {
            "get" => Ok(Self::Get),
            "set" => parse_timestamp(object.get("ts")).map(|timestamp| Self::Set { timestamp }),
            other => Err(RequestError::unknown_command("cmd", other)),
        }
    }
}

fn parse_timestamp(value: Option<&Value>) -> Result<i64, RequestError> {
    match value {
        None | Some(Value::Null) => Err(RequestError::missing_keys(vec!["ts"])),
        Some(Value::Number(number)) => whole_seconds(number),
        Some(_) => Err(RequestError::invalid_field("ts", "expected a number")),
    }
}

/// Integers pass through; finite fractions are truncated toward zero.
fn whole_seconds(number: &Number) -> Result<i64, RequestError> {
    if let Some(seconds) = number.as_i64() {
        return Ok(seconds);
    }
    match number.as_f64() {
        Some(seconds) if seconds.is_finite() && seconds.abs() < 9.0e18 => {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "range checked above; fractional seconds are dropped"
            )]
            let whole = seconds.trunc() as i64;
            Ok(whole)
        }
        _ => Err(RequestError::invalid_field("ts", "timestamp out of range")),
    }
}
