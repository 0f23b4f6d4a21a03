//! TCP acceptor for the control-plane daemons.
//!
//! The listener binds the configured address with a service-specific backlog
//! and serves accepted connections strictly one at a time: each connection is
//! handed to a [`ConnectionHandler`] and run to completion before the next
//! `accept`. Clients beyond the backlog are refused by the kernel.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;

pub use self::errors::ListenerError;
pub use self::handler::ConnectionHandler;
pub use self::listener::{ListenerHandle, SocketListener};
#[cfg(test)]
pub(crate) use self::test_utils::{CountingHandler, EchoOnceHandler};

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
