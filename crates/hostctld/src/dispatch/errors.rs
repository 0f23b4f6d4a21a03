//! Error types for request dispatch failures.

use hostctl_protocol::RequestError;
use thiserror::Error;

use super::ErrorKind;
use crate::handlers::HandlerError;

/// Errors surfaced while dispatching one request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request was rejected before reaching the service.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A service collaborator failed.
    #[error("{kind} failure: {source}")]
    Handler {
        /// Classification reported to the client.
        kind: ErrorKind,
        /// Full diagnostic, logged only.
        #[source]
        source: HandlerError,
    },

    /// The service panicked while executing the request.
    #[error("service panicked: {message}")]
    Panicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl DispatchError {
    /// Wraps a collaborator failure with its client-facing classification.
    #[must_use]
    pub const fn handler(kind: ErrorKind, source: HandlerError) -> Self {
        Self::Handler { kind, source }
    }

    /// Creates a panic error.
    #[must_use]
    pub fn panicked(message: impl Into<String>) -> Self {
        Self::Panicked {
            message: message.into(),
        }
    }

    /// Classification of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(_) => ErrorKind::Protocol,
            Self::Handler { kind, .. } => *kind,
            Self::Panicked { .. } => ErrorKind::Internal,
        }
    }

    /// Text placed in the error envelope.
    ///
    /// Protocol errors describe the request and are returned verbatim; every
    /// other failure is reduced to its kind's fixed message.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Request(error) => error.to_string(),
            Self::Handler { .. } | Self::Panicked { .. } => {
                self.kind().client_message().to_owned()
            }
        }
    }
}
