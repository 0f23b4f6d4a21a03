//! Wires a service to its listener and runs it until shutdown.

use std::sync::Arc;

use hostctl_config::{Config, ServiceKind};
use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::dispatch::ControlService;
use crate::handlers::{CommandRunner, Hwclock, Nmcli, OledPanel, ShadowVerifier, SystemCommandRunner};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::services::{ClockService, CredentialService, DisplayService, NetworkService};
use crate::session::SessionHandler;
use crate::transport::{ListenerError, SocketListener};

use super::shutdown::{ShutdownFlags, ShutdownSignal, SystemShutdownSignal, TrackedHandler};
use super::{LaunchError, PROCESS_TARGET};

/// Collaborators required to launch a daemon.
pub struct LaunchPlan<L, S> {
    /// Source of the configuration.
    pub loader: L,
    /// Receiver of lifecycle events.
    pub reporter: Arc<dyn HealthReporter>,
    /// Shutdown trigger.
    pub shutdown: S,
    /// Runner handed to the production collaborators.
    pub runner: Arc<dyn CommandRunner>,
}

/// Runs the daemon for `kind` with the production collaborators.
///
/// Blocks until a termination signal arrives and the session in progress, if
/// any, has finished.
///
/// # Errors
///
/// Returns a [`LaunchError`] when bootstrap fails, signal handlers cannot be
/// installed, or the socket cannot be bound.
pub fn run_service(kind: ServiceKind) -> Result<(), LaunchError> {
    run_service_with(
        kind,
        LaunchPlan {
            loader: SystemConfigLoader,
            reporter: Arc::new(StructuredHealthReporter::new()),
            shutdown: SystemShutdownSignal,
            runner: Arc::new(SystemCommandRunner),
        },
    )
}

/// Runs the daemon for `kind` with injected collaborators.
///
/// # Errors
///
/// As for [`run_service`].
pub fn run_service_with<L, S>(kind: ServiceKind, plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        shutdown,
        runner,
    } = plan;

    let daemon = bootstrap_with(&loader, Arc::clone(&reporter))?;
    let config = daemon.config();
    info!(target: PROCESS_TARGET, service = %kind, "starting daemon");

    let flags = ShutdownFlags::default();
    shutdown.install(&flags)?;

    let address = config.listen_address(kind);
    let listener = SocketListener::bind(&address, config.backlog(kind))?;
    reporter.listener_bound(kind, &address, listener.local_addr());

    let served = match kind {
        ServiceKind::Credential => serve(&listener, credential_service(runner), &flags),
        ServiceKind::Network => serve(&listener, network_service(config, runner), &flags),
        ServiceKind::Display => serve(&listener, display_service(config, runner), &flags),
        ServiceKind::Clock => serve(&listener, clock_service(config, runner), &flags),
    };
    reporter.listener_stopped(kind);
    served?;
    info!(target: PROCESS_TARGET, service = %kind, "shutdown sequence completed");
    Ok(())
}

fn serve<S: ControlService>(
    listener: &SocketListener,
    service: S,
    flags: &ShutdownFlags,
) -> Result<(), ListenerError> {
    let handler = TrackedHandler::new(SessionHandler::new(service), flags.clone());
    listener.run(&handler, flags.requested_flag())
}

fn credential_service(runner: Arc<dyn CommandRunner>) -> CredentialService {
    CredentialService::new(Box::new(ShadowVerifier::new(runner)))
}

fn network_service(config: &Config, runner: Arc<dyn CommandRunner>) -> NetworkService {
    NetworkService::new(Box::new(Nmcli::new(runner, config.connection_name())))
}

fn display_service(config: &Config, runner: Arc<dyn CommandRunner>) -> DisplayService {
    DisplayService::new(Box::new(OledPanel::new(
        runner,
        config.display_program(),
        config.display_bus(),
        config.display_address(),
        config.display_interface(),
    )))
}

fn clock_service(config: &Config, runner: Arc<dyn CommandRunner>) -> ClockService {
    ClockService::new(Box::new(Hwclock::new(runner, config.rtc_device())))
}
