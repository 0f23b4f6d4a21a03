//! Structured health reporting for daemon lifecycle events.

use std::net::SocketAddr;
use std::sync::Arc;

use hostctl_config::{Config, ListenAddress, ServiceKind};

use crate::bootstrap::BootstrapError;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once the service socket is listening.
    fn listener_bound(&self, kind: ServiceKind, address: &ListenAddress, local: Option<SocketAddr>);

    /// Invoked after the accept loop has returned.
    fn listener_stopped(&self, kind: ServiceKind);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn listener_bound(&self, kind: ServiceKind, address: &ListenAddress, local: Option<SocketAddr>) {
        (**self).listener_bound(kind, address, local);
    }

    fn listener_stopped(&self, kind: ServiceKind) {
        (**self).listener_stopped(kind);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            log_filter = %config.log_filter(),
            log_format = ?config.log_format(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn listener_bound(&self, kind: ServiceKind, address: &ListenAddress, local: Option<SocketAddr>) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_bound",
            service = %kind,
            endpoint = %address,
            local = ?local,
            "service listening"
        );
    }

    fn listener_stopped(&self, kind: ServiceKind) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_stopped",
            service = %kind,
            "service stopped"
        );
    }
}
