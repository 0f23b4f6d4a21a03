use hostctl_config::ServiceKind;
use hostctl_protocol::{DisplayFrame, Envelope, StatusKey};

use crate::dispatch::{ControlService, DispatchError, ErrorKind};
use crate::handlers::DisplayRenderer;
use crate::session::SessionStyle;

const RENDERED: &str = "Command executed successfully";

/// Draws status frames on the panel.
pub struct DisplayService {
    renderer: Box<dyn DisplayRenderer>,
}

impl DisplayService {
    /// Builds the service around a renderer.
    pub fn new(renderer: Box<dyn DisplayRenderer>) -> Self {
        Self { renderer }
    }
}

impl ControlService for DisplayService {
    type Request = DisplayFrame;

    fn kind(&self) -> ServiceKind {
        ServiceKind::Display
    }

    fn session_style(&self) -> SessionStyle {
        SessionStyle::Persistent
    }

    fn error_key(&self) -> StatusKey {
        StatusKey::Status
    }

    fn execute(&self, request: DisplayFrame) -> Result<Envelope, DispatchError> {
        self.renderer
            .render(&request)
            .map_err(|error| DispatchError::handler(ErrorKind::DisplayRender, error))?;
        Ok(Envelope::success_message(StatusKey::Status, RENDERED))
    }
}
