//! Decode, validate, execute.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use hostctl_protocol::{Envelope, ServiceRequest, decode_object};
use tracing::{debug, warn};

use super::{ControlService, DISPATCH_TARGET, DispatchError, ErrorKind};

/// Routes received payloads to a [`ControlService`].
#[derive(Debug)]
pub struct Dispatcher<S> {
    service: S,
}

impl<S: ControlService> Dispatcher<S> {
    /// Wraps a service.
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// The wrapped service.
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Produces the reply for one received payload.
    ///
    /// Never fails: every error, including a panic inside the service, is
    /// logged and converted into an error envelope.
    pub fn dispatch(&self, payload: &[u8]) -> Envelope {
        match self.try_dispatch(payload) {
            Ok(envelope) => envelope,
            Err(error) => {
                let kind = error.kind();
                if kind == ErrorKind::Protocol {
                    debug!(
                        target: DISPATCH_TARGET,
                        service = %self.service.kind(),
                        %error,
                        "request rejected"
                    );
                } else {
                    warn!(
                        target: DISPATCH_TARGET,
                        service = %self.service.kind(),
                        kind = %kind,
                        error = %error,
                        source = ?std::error::Error::source(&error),
                        "request failed"
                    );
                }
                Envelope::error(self.service.error_key(), error.client_message())
            }
        }
    }

    fn try_dispatch(&self, payload: &[u8]) -> Result<Envelope, DispatchError> {
        let object = decode_object(payload)?;
        let request = S::Request::from_object(&object)?;
        debug!(
            target: DISPATCH_TARGET,
            service = %self.service.kind(),
            ?request,
            "dispatching request"
        );
        panic::catch_unwind(AssertUnwindSafe(|| self.service.execute(request)))
            .unwrap_or_else(|payload| Err(DispatchError::panicked(panic_message(&*payload))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("non-string panic payload")
    }
}
