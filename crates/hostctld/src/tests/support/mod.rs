//! Shared harness for the daemon behaviour suites.

mod collaborators;
mod config_loader;
mod reporter;
mod stream;

pub(crate) use collaborators::{FakeClock, FakeNetwork, FakeRenderer, FakeVerifier};
pub(crate) use config_loader::{FailingConfigLoader, loopback_config};
pub(crate) use reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use stream::ScriptedStream;
