//! Test helpers for the transport module.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::ConnectionHandler;

pub(crate) struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<Self>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            count: Arc::clone(&count),
        });
        (count, handler)
    }
}

impl ConnectionHandler for CountingHandler {
    fn handle(&self, _stream: TcpStream, _peer: SocketAddr) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reads one chunk and writes it back upper-cased, then closes.
pub(crate) struct EchoOnceHandler;

impl ConnectionHandler for EchoOnceHandler {
    fn handle(&self, mut stream: TcpStream, _peer: SocketAddr) {
        let mut buffer = [0_u8; 64];
        let Ok(read) = stream.read(&mut buffer) else {
            return;
        };
        let reply = buffer.get(..read).unwrap_or_default().to_ascii_uppercase();
        let _ = stream.write_all(&reply);
    }
}
