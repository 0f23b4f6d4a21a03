use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{RequestObject, ServiceRequest, discriminator};
use crate::error::RequestError;

/// IPv4 settings of a managed connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Address with prefix length, for example `192.168.1.20/24`.
    pub address: String,
    /// Default gateway.
    pub gateway: String,
    /// DNS server.
    pub dns: String,
}

/// Commands accepted by the network service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkCommand {
    /// Report the current settings (`{"type":"GET"}`).
    Get,
    /// Replace the settings (`{"type":"SET","config":{...}}`).
    Set(NetworkConfig),
}

impl ServiceRequest for NetworkCommand {
    fn from_object(object: &RequestObject) -> Result<Self, RequestError> {
        match discriminator(object, "type")? {
            "GET" => Ok(Self::Get),
            "SET" => parse_config(object.get("config")).map(Self::Set),
            other => Err(RequestError::unknown_command("type", other)),
        }
    }
}

fn parse_config(value: Option<&Value>) -> Result<NetworkConfig, RequestError> {
    let Some(value) = value else {
        return Err(RequestError::missing_keys(vec!["config"]));
    };
    if is_empty(value) {
        return Err(RequestError::EmptyField { field: "config" });
    }
    NetworkConfig::deserialize(value)
        .map_err(|error| RequestError::invalid_field("config", error.to_string()))
}

/// Null, `false`, zero, and empty strings or containers count as absent.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
