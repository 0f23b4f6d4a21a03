use std::io;
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
use thiserror::Error;

use crate::transport::ConnectionHandler;

/// Exit status used when a signal ends the process mid-session.
pub const SIGNALLED_EXIT_STATUS: i32 = 1;

/// Shared state between the signal handlers and the accept loop.
///
/// `requested` is polled by the listener between connections. `serving` is
/// raised while a session runs. Sessions have no read timeout, so a signal
/// arriving then ends the process immediately.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlags {
    requested: Arc<AtomicBool>,
    serving: Arc<AtomicBool>,
}

impl ShutdownFlags {
    /// Asks the accept loop to stop.
    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Whether a session is in progress.
    #[must_use]
    pub fn is_serving(&self) -> bool {
        self.serving.load(Ordering::SeqCst)
    }

    /// Flag polled by the accept loop.
    #[must_use]
    pub fn requested_flag(&self) -> &AtomicBool {
        &self.requested
    }

    /// Marks a session as running until the guard is dropped.
    #[must_use]
    pub fn enter_session(&self) -> SessionGuard {
        self.serving.store(true, Ordering::SeqCst);
        SessionGuard {
            serving: Arc::clone(&self.serving),
        }
    }
}

/// Clears the serving flag on drop, including during unwinding.
#[derive(Debug)]
pub struct SessionGuard {
    serving: Arc<AtomicBool>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.serving.store(false, Ordering::SeqCst);
    }
}

/// Wraps a connection handler so the flags know when a session runs.
pub(crate) struct TrackedHandler<H> {
    inner: H,
    flags: ShutdownFlags,
}

impl<H> TrackedHandler<H> {
    pub(crate) const fn new(inner: H, flags: ShutdownFlags) -> Self {
        Self { inner, flags }
    }
}

impl<H: ConnectionHandler> ConnectionHandler for TrackedHandler<H> {
    fn handle(&self, stream: TcpStream, peer: SocketAddr) {
        let _session = self.flags.enter_session();
        self.inner.handle(stream, peer);
    }
}

/// Arranges for shutdown to be requested when the daemon should stop.
pub trait ShutdownSignal: Send + Sync {
    /// Starts watching and records requests in `flags`.
    ///
    /// # Errors
    ///
    /// Returns a [`ShutdownError`] when the watch cannot be installed.
    fn install(&self, flags: &ShutdownFlags) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install handler for signal {signal}: {source}")]
    Install {
        /// Signal number.
        signal: i32,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// Handles SIGTERM, SIGINT, SIGQUIT, and SIGHUP.
///
/// While idle the first signal stops the accept loop and the daemon exits
/// cleanly. During a session, or on a second signal, the process exits at
/// once with [`SIGNALLED_EXIT_STATUS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl ShutdownSignal for SystemShutdownSignal {
    fn install(&self, flags: &ShutdownFlags) -> Result<(), ShutdownError> {
        for signal in [SIGTERM, SIGINT, SIGQUIT, SIGHUP] {
            let install = |result: Result<_, io::Error>| {
                result
                    .map(drop)
                    .map_err(|source| ShutdownError::Install { signal, source })
            };
            // Handlers run in registration order, so the exits see the flags
            // as they were before this signal.
            install(signal_hook::flag::register_conditional_shutdown(
                signal,
                SIGNALLED_EXIT_STATUS,
                Arc::clone(&flags.serving),
            ))?;
            install(signal_hook::flag::register_conditional_shutdown(
                signal,
                SIGNALLED_EXIT_STATUS,
                Arc::clone(&flags.requested),
            ))?;
            install(signal_hook::flag::register(
                signal,
                Arc::clone(&flags.requested),
            ))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn guard_marks_the_session_while_alive() {
        let flags = ShutdownFlags::default();
        assert!(!flags.is_serving());
        {
            let _guard = flags.enter_session();
            assert!(flags.is_serving());
        }
        assert!(!flags.is_serving());
    }

    #[test]
    fn guard_clears_the_flag_when_a_session_panics() {
        let flags = ShutdownFlags::default();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = flags.enter_session();
            panic!("session failed");
        }));
        assert!(result.is_err());
        assert!(!flags.is_serving());
    }

    #[test]
    fn clones_share_state() {
        let flags = ShutdownFlags::default();
        let observer = flags.clone();
        flags.request();
        assert!(observer.is_requested());
        assert!(observer.requested_flag().load(Ordering::SeqCst));
    }
}
