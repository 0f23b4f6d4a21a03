use std::fmt;

use super::{RequestObject, ServiceRequest, require_keys, string_field};
use crate::error::RequestError;

/// Login and password submitted to the credential service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub login: String,
    /// Clear-text password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl ServiceRequest for Credentials {
    fn from_object(object: &RequestObject) -> Result<Self, RequestError> {
        require_keys(object, &["login", "password"])?;
        Ok(Self {
            login: string_field(object, "login")?,
            password: string_field(object, "password")?,
        })
    }
}
