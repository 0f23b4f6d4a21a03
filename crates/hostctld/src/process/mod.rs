//! Process entry points: bootstrap, wiring, and signal-driven shutdown.

mod errors;
mod launch;
mod shutdown;

pub use self::errors::LaunchError;
pub use self::launch::{LaunchPlan, run_service, run_service_with};
pub use self::shutdown::{
    SIGNALLED_EXIT_STATUS, SessionGuard, ShutdownError, ShutdownFlags, ShutdownSignal,
    SystemShutdownSignal,
};

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
