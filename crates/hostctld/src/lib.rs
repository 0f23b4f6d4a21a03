//! Host-control daemons for embedded appliances.
//!
//! Each daemon exposes one privileged operation to a remote client over a
//! plain TCP socket: checking a login against the local account database,
//! reading or replacing the network configuration, drawing a status frame on
//! the OLED panel, and reading or setting the hardware clock.
//!
//! Every daemon runs the same pipeline. The [`SocketListener`] accepts one
//! connection at a time and hands it to a [`SessionHandler`], which reads one
//! request per receive and passes it to a [`Dispatcher`]. The dispatcher
//! validates the payload into the service's typed request before the
//! [`ControlService`] sees it, and every outcome, including a panic, becomes
//! exactly one JSON envelope on the wire.
//!
//! Host operations sit behind small traits in [`handlers`] so the services can
//! be exercised with test doubles; the production implementations run system
//! programs through a [`CommandRunner`](handlers::CommandRunner).

mod bootstrap;
mod dispatch;
pub mod handlers;
mod health;
mod process;
mod services;
mod session;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{ControlService, DispatchError, Dispatcher, ErrorKind};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{
    LaunchError, LaunchPlan, SIGNALLED_EXIT_STATUS, SessionGuard, ShutdownError, ShutdownFlags,
    ShutdownSignal, SystemShutdownSignal, run_service, run_service_with,
};
pub use services::{ClockService, CredentialService, DisplayService, NetworkService};
pub use session::{
    CloseReason, RECEIVE_BUFFER_BYTES, SessionError, SessionHandler, SessionOutcome, SessionStyle,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{ConnectionHandler, ListenerError, ListenerHandle, SocketListener};

#[cfg(test)]
mod tests;
