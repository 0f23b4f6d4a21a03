//! Request dispatch for the control-plane daemons.
//!
//! A [`Dispatcher`] turns the bytes of one receive into exactly one
//! [`Envelope`]. The payload is decoded into a JSON object, validated into the
//! service's typed request, and only then handed to the [`ControlService`].
//! Protocol violations never reach the service; service failures are
//! classified into an [`ErrorKind`] so the client sees a fixed message while
//! the full diagnostic goes to the log.
//!
//! [`Envelope`]: hostctl_protocol::Envelope

mod dispatcher;
mod errors;
mod kind;
mod service;

pub use self::dispatcher::Dispatcher;
pub use self::errors::DispatchError;
pub use self::kind::ErrorKind;
pub use self::service::ControlService;

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

#[cfg(test)]
mod tests;
