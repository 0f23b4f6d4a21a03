//! Per-connection request loop.
//!
//! Each receive is treated as one complete request: up to
//! [`RECEIVE_BUFFER_BYTES`] are read, dispatched, and answered with a single
//! write. There is no framing, so a request split across TCP segments or two
//! requests coalesced into one read are both reported as malformed JSON.

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use thiserror::Error;
use tracing::{debug, warn};

use crate::dispatch::{ControlService, Dispatcher};
use crate::transport::ConnectionHandler;

/// Upper bound on the bytes taken from a single receive.
pub const RECEIVE_BUFFER_BYTES: usize = 1024;

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// How many requests a connection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStyle {
    /// One receive, one response, then close.
    SingleShot,
    /// Respond to every receive until the peer closes its side.
    Persistent,
}

/// Why a session ended normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The peer closed its side of the connection.
    PeerClosed,
    /// A single-shot session answered its request.
    Answered,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Responses written.
    pub responses: usize,
    /// How the session ended.
    pub reason: CloseReason,
}

/// Socket-level failures that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from the peer failed.
    #[error("failed to receive request: {source}")]
    Receive {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing a response failed.
    #[error("failed to send response: {source}")]
    Send {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// A response could not be encoded.
    #[error("failed to encode response: {source}")]
    Encode {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
}

/// Serves connections for one [`ControlService`].
#[derive(Debug)]
pub struct SessionHandler<S> {
    dispatcher: Dispatcher<S>,
}

impl<S: ControlService> SessionHandler<S> {
    /// Wraps `service` in a dispatcher.
    pub const fn new(service: S) -> Self {
        Self {
            dispatcher: Dispatcher::new(service),
        }
    }

    /// The dispatcher used for every request.
    pub const fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    /// Runs the request loop over `stream` until the session ends.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] when the stream fails. Request and service
    /// failures are answered with error envelopes and never end the session.
    pub fn serve<T: Read + Write>(&self, stream: &mut T) -> Result<SessionOutcome, SessionError> {
        let style = self.dispatcher.service().session_style();
        let mut buffer = [0_u8; RECEIVE_BUFFER_BYTES];
        let mut responses = 0;
        loop {
            let received = receive(stream, &mut buffer)?;
            if received == 0 {
                return Ok(SessionOutcome {
                    responses,
                    reason: CloseReason::PeerClosed,
                });
            }

            let payload = buffer.get(..received).unwrap_or_default();
            let reply = self
                .dispatcher
                .dispatch(payload)
                .to_vec()
                .map_err(|source| SessionError::Encode { source })?;
            stream
                .write_all(&reply)
                .and_then(|()| stream.flush())
                .map_err(|source| SessionError::Send { source })?;
            responses += 1;

            if style == SessionStyle::SingleShot {
                return Ok(SessionOutcome {
                    responses,
                    reason: CloseReason::Answered,
                });
            }
        }
    }
}

impl<S: ControlService> ConnectionHandler for SessionHandler<S> {
    fn handle(&self, mut stream: TcpStream, peer: SocketAddr) {
        match self.serve(&mut stream) {
            Ok(outcome) => debug!(
                target: SESSION_TARGET,
                %peer,
                responses = outcome.responses,
                reason = ?outcome.reason,
                "session closed"
            ),
            Err(error) => warn!(
                target: SESSION_TARGET,
                %peer,
                %error,
                "session aborted"
            ),
        }
        if let Err(error) = stream.shutdown(Shutdown::Both) {
            debug!(target: SESSION_TARGET, %peer, %error, "socket shutdown failed");
        }
    }
}

fn receive<T: Read>(stream: &mut T, buffer: &mut [u8]) -> Result<usize, SessionError> {
    loop {
        match stream.read(buffer) {
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            other => return other.map_err(|source| SessionError::Receive { source }),
        }
    }
}
