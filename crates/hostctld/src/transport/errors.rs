//! Error types for socket listener operations.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the socket listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured host name could not be resolved.
    #[error("failed to resolve TCP address {host}:{port}: {source}")]
    Resolve {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Resolver error.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no TCP addresses resolved for {host}:{port}")]
    ResolveEmpty {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },
    /// The socket could not be created or configured.
    #[error("failed to create TCP socket for {addr}: {source}")]
    Socket {
        /// Address the socket was meant for.
        addr: SocketAddr,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Binding the address failed, typically because it is in use.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Switching the socket to listening mode failed.
    #[error("failed to listen on {addr} with backlog {backlog}: {source}")]
    Listen {
        /// Bound address.
        addr: SocketAddr,
        /// Requested backlog.
        backlog: u32,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The accept loop could not poll for shutdown.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The background listener thread panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
