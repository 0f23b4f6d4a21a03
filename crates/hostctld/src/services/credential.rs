use hostctl_config::ServiceKind;
use hostctl_protocol::{Credentials, Envelope, StatusKey};

use crate::dispatch::{ControlService, DispatchError, ErrorKind};
use crate::handlers::{CredentialVerifier, HandlerError};
use crate::session::SessionStyle;

const ACCEPTED: &str = "Login and password is correct";
const REJECTED: &str = "Authentication failed";

/// Answers one login attempt per connection.
///
/// Every reply, including errors, uses the `result` discriminator.
pub struct CredentialService {
    verifier: Box<dyn CredentialVerifier>,
}

impl CredentialService {
    /// Builds the service around a verifier.
    pub fn new(verifier: Box<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }
}

impl ControlService for CredentialService {
    type Request = Credentials;

    fn kind(&self) -> ServiceKind {
        ServiceKind::Credential
    }

    fn session_style(&self) -> SessionStyle {
        SessionStyle::SingleShot
    }

    fn error_key(&self) -> StatusKey {
        StatusKey::Result
    }

    fn execute(&self, request: Credentials) -> Result<Envelope, DispatchError> {
        match self.verifier.verify(&request.login, &request.password) {
            Ok(true) => Ok(Envelope::success_message(StatusKey::Result, ACCEPTED)),
            Ok(false) => Ok(Envelope::error(StatusKey::Result, REJECTED)),
            Err(error @ HandlerError::UnknownUser { .. }) => {
                Err(DispatchError::handler(ErrorKind::UnknownUser, error))
            }
            Err(error) => Err(DispatchError::handler(ErrorKind::CredentialLookup, error)),
        }
    }
}
