//! Connection handling abstraction for the acceptor.

use std::net::{SocketAddr, TcpStream};

/// Handles accepted socket connections.
///
/// The acceptor calls `handle` on its own thread and waits for it to return
/// before accepting the next client, so an implementation owns the server for
/// as long as it runs. Implementations should avoid panicking.
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Serves a single connection until it is finished with it.
    fn handle(&self, stream: TcpStream, peer: SocketAddr);
}
