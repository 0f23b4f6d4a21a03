use hostctl_config::ServiceKind;
use hostctl_protocol::{Envelope, NetworkCommand, Payload, StatusKey};

use crate::dispatch::{ControlService, DispatchError, ErrorKind};
use crate::handlers::NetworkManager;
use crate::session::SessionStyle;

const UPDATED: &str = "Config is updated";

/// Reports and replaces the IPv4 settings of the managed connection.
///
/// A successful `GET` answers under `result`; everything else under `status`.
pub struct NetworkService {
    manager: Box<dyn NetworkManager>,
}

impl NetworkService {
    /// Builds the service around a network manager.
    pub fn new(manager: Box<dyn NetworkManager>) -> Self {
        Self { manager }
    }
}

impl ControlService for NetworkService {
    type Request = NetworkCommand;

    fn kind(&self) -> ServiceKind {
        ServiceKind::Network
    }

    fn session_style(&self) -> SessionStyle {
        SessionStyle::Persistent
    }

    fn error_key(&self) -> StatusKey {
        StatusKey::Status
    }

    fn execute(&self, request: NetworkCommand) -> Result<Envelope, DispatchError> {
        match request {
            NetworkCommand::Get => {
                let config = self
                    .manager
                    .current()
                    .map_err(|error| DispatchError::handler(ErrorKind::NetworkQuery, error))?;
                Ok(Envelope::success(StatusKey::Result, Payload::Config(config)))
            }
            NetworkCommand::Set(config) => {
                self.manager
                    .apply(&config)
                    .map_err(|error| DispatchError::handler(ErrorKind::NetworkUpdate, error))?;
                Ok(Envelope::success_message(StatusKey::Status, UPDATED))
            }
        }
    }
}
