//! Tracing setup shared by the four daemons.
//!
//! Output goes to standard error so the service manager's journal captures
//! it. The subscriber is process-global and installed at most once; the first
//! configuration to arrive decides the format.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, time::UtcTime};

use hostctl_config::{Config, LogFormat};

static INSTALLED_FORMAT: OnceCell<LogFormat> = OnceCell::new();

/// Proof that the global subscriber is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Format of the installed subscriber, which may differ from the one
    /// requested when another configuration got there first.
    #[must_use]
    pub const fn format(self) -> LogFormat {
        self.format
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter '{filter}': {message}")]
    Filter {
        /// Expression as configured.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Another subscriber was installed outside this module.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global subscriber described by `config` on first use.
///
/// # Errors
///
/// Returns a [`TelemetryError`] when the filter is invalid or a foreign
/// subscriber already owns the global slot.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FORMAT
        .get_or_try_init(|| {
            let format = config.log_format();
            let subscriber = build_subscriber(parse_filter(config.log_filter())?, format);
            tracing::subscriber::set_global_default(subscriber)
                .map_err(TelemetryError::Subscriber)?;
            Ok(format)
        })
        .map(|format| TelemetryHandle { format: *format })
}

fn parse_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter).map_err(|error| TelemetryError::Filter {
        filter: filter.to_owned(),
        message: error.to_string(),
    })
}

fn build_subscriber(filter: EnvFilter, format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(UtcTime::rfc_3339());
    match format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("info")]
    #[case("hostctld::session=debug,warn")]
    fn accepts_directive_filters(#[case] filter: &str) {
        assert!(parse_filter(filter).is_ok());
    }

    #[test]
    fn reports_the_rejected_filter() {
        let error = parse_filter("hostctld=loud").expect_err("level is invalid");
        assert!(matches!(
            &error,
            TelemetryError::Filter { filter, .. } if filter == "hostctld=loud"
        ));
    }

    #[test]
    fn repeated_initialisation_keeps_the_first_format() {
        let first = initialise(&Config::default()).expect("first install");
        let compact = Config {
            log_format: Some(LogFormat::Compact),
            ..Config::default()
        };
        let second = initialise(&compact).expect("second install");
        assert_eq!(first.format(), second.format());
    }
}
