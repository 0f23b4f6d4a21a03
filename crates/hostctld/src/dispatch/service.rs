use std::fmt;

use hostctl_config::ServiceKind;
use hostctl_protocol::{Envelope, ServiceRequest, StatusKey};

use super::DispatchError;
use crate::session::SessionStyle;

/// A control-plane service: one typed request family and its execution.
///
/// Implementations hold only immutable context captured at startup, so a
/// single value is shared by every session for the lifetime of the daemon.
pub trait ControlService: Send + Sync + 'static {
    /// Typed request validated from each decoded payload.
    type Request: ServiceRequest + fmt::Debug;

    /// Which daemon this service backs.
    fn kind(&self) -> ServiceKind;

    /// Whether a connection carries one request or many.
    fn session_style(&self) -> SessionStyle;

    /// Discriminator key used for error replies.
    fn error_key(&self) -> StatusKey;

    /// Carries out a validated request.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when a collaborator fails; the dispatcher
    /// turns it into an error envelope.
    fn execute(&self, request: Self::Request) -> Result<Envelope, DispatchError>;
}
