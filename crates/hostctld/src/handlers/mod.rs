//! Collaborators that carry out privileged host operations.
//!
//! Each service talks to its collaborator through a small trait so tests can
//! substitute a mock. The production implementations shell out to system
//! programs through a [`CommandRunner`], always with an explicit argument
//! vector and never through a shell.

mod clock;
mod command;
mod credential;
mod display;
mod errors;
mod network;

pub use self::clock::{HardwareClock, Hwclock};
pub use self::command::{CommandOutput, CommandRunner, Invocation, SystemCommandRunner};
pub use self::credential::{CredentialVerifier, ShadowVerifier};
pub use self::display::{DisplayRenderer, OledPanel, TextLine, layout};
pub use self::errors::HandlerError;
pub use self::network::{NetworkManager, Nmcli};

pub(crate) const HANDLER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::handlers");

#[cfg(test)]
pub(crate) mod test_support;
