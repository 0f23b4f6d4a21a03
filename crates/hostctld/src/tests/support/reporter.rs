//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::net::SocketAddr;
use std::sync::Mutex;

use hostctl_config::{Config, ListenAddress, ServiceKind};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    ListenerBound(ServiceKind),
    ListenerStopped(ServiceKind),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn listener_bound(&self, kind: ServiceKind, _address: &ListenAddress, _local: Option<SocketAddr>) {
        self.record(HealthEvent::ListenerBound(kind));
    }

    fn listener_stopped(&self, kind: ServiceKind) {
        self.record(HealthEvent::ListenerStopped(kind));
    }
}
