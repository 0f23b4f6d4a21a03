//! Listener implementation for daemon transport sockets.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{debug, info, warn};

use hostctl_config::ListenAddress;

use super::{ConnectionHandler, LISTENER_TARGET, ListenerError};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Listener bound to a TCP address.
#[derive(Debug)]
pub struct SocketListener {
    address: ListenAddress,
    listener: TcpListener,
}

impl SocketListener {
    /// Resolves and binds `address`, listening with the given backlog.
    ///
    /// # Errors
    ///
    /// Returns a [`ListenerError`] when the host does not resolve or the socket
    /// cannot be created, bound, or put into listening mode. Callers treat this
    /// as fatal.
    pub fn bind(address: &ListenAddress, backlog: u32) -> Result<Self, ListenerError> {
        let listener = bind_tcp(address.host(), address.port(), backlog)?;
        Ok(Self {
            address: address.clone(),
            listener,
        })
    }

    /// Address the socket is bound to; useful when binding port 0.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.local_addr().ok()
    }

    /// Serves connections on the calling thread until `shutdown` is raised.
    ///
    /// Connections are handled one at a time. The flag is only observed
    /// between connections, so a session in progress always runs to
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::NonBlocking`] when the socket cannot be polled.
    /// Failures of individual connections are logged and never end the loop.
    pub fn run(
        &self,
        handler: &dyn ConnectionHandler,
        shutdown: &AtomicBool,
    ) -> Result<(), ListenerError> {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        run_accept_loop(self, handler, shutdown);
        Ok(())
    }

    /// Serves connections on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::NonBlocking`] when the socket cannot be polled.
    pub fn start(self, handler: Arc<dyn ConnectionHandler>) -> Result<ListenerHandle, ListenerError> {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = Arc::clone(&shutdown);
        let handle =
            thread::spawn(move || run_accept_loop(&self, handler.as_ref(), &shutdown_flag));
        Ok(ListenerHandle {
            shutdown,
            handle: Some(handle),
        })
    }
}

/// Handle to a background listener thread.
pub struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Asks the listener to stop after the current connection.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Waits for the listener thread to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] when the thread panicked.
    pub fn join(mut self) -> Result<(), ListenerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => Ok(()),
                Err(_) => Err(ListenerError::ThreadPanic),
            }
        } else {
            Ok(())
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn run_accept_loop(listener: &SocketListener, handler: &dyn ConnectionHandler, shutdown: &AtomicBool) {
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.address,
        "socket listener active"
    );
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match accept_connection(&listener.listener) {
            Ok(Some((stream, peer))) => {
                last_error = None;
                debug!(target: LISTENER_TARGET, %peer, "connection accepted");
                handler.handle(stream, peer);
                debug!(target: LISTENER_TARGET, %peer, "connection finished");
            }
            Ok(None) => {
                thread::sleep(ACCEPT_BACKOFF);
            }
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "socket accept error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.address,
        "socket listener stopped"
    );
}

fn accept_connection(
    listener: &TcpListener,
) -> Result<Option<(std::net::TcpStream, SocketAddr)>, io::Error> {
    match listener.accept() {
        Ok((stream, peer)) => {
            stream.set_nonblocking(false)?;
            Ok(Some((stream, peer)))
        }
        Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
        Err(error) => Err(error),
    }
}

fn bind_tcp(host: &str, port: u16, backlog: u32) -> Result<TcpListener, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs
        .find(|addr| matches!(addr, SocketAddr::V4(_) | SocketAddr::V6(_)))
        .ok_or_else(|| ListenerError::ResolveEmpty {
            host: host.to_owned(),
            port,
        })?;

    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
        .map_err(|source| ListenerError::Socket { addr, source })?;
    socket
        .set_reuse_address(true)
        .map_err(|source| ListenerError::Socket { addr, source })?;
    socket
        .bind(&addr.into())
        .map_err(|source| ListenerError::BindTcp { addr, source })?;
    socket
        .listen(i32::try_from(backlog).unwrap_or(i32::MAX))
        .map_err(|source| ListenerError::Listen {
            addr,
            backlog,
            source,
        })?;
    Ok(socket.into())
}
