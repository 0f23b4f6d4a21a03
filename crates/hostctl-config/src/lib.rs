//! Shared configuration for the host-control daemons.
//!
//! Every daemon reads one [`Config`] at process start. Values are layered by
//! `ortho_config`: built-in defaults, an optional configuration file,
//! `HOSTCTL_*` environment variables, and finally command-line flags. The
//! resolved value is immutable for the lifetime of the process and is handed
//! to the listener and services by reference.
//!
//! All fields are optional on the wire so a single configuration file can be
//! shared between daemons; accessors resolve the per-service defaults.

mod defaults;
mod i2c;
mod logging;
mod service;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_CONNECTION_NAME, DEFAULT_DISPLAY_ADDRESS, DEFAULT_DISPLAY_BUS,
    DEFAULT_DISPLAY_INTERFACE, DEFAULT_DISPLAY_PROGRAM, DEFAULT_HOST, DEFAULT_LOG_FILTER,
    DEFAULT_RTC_DEVICE, default_log_filter, default_log_format,
};
pub use i2c::{I2cAddress, I2cAddressParseError};
pub use logging::{LogFormat, LogFormatParseError};
pub use service::{ListenAddress, ServiceKind, ServiceKindParseError};

/// Runtime configuration shared by the credential, network, display, and
/// clock daemons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTCTL")]
pub struct Config {
    /// Address the daemon binds to.
    #[serde(default)]
    pub host: Option<String>,
    /// TCP port; falls back to the service default when absent.
    #[serde(default)]
    pub port: Option<u16>,
    /// Listen backlog; falls back to the service default when absent.
    #[serde(default)]
    pub backlog: Option<u32>,
    /// NetworkManager connection profile managed by the network daemon.
    #[serde(default)]
    pub connection_name: Option<String>,
    /// Hardware clock device used by the clock daemon.
    #[serde(default)]
    pub rtc_device: Option<Utf8PathBuf>,
    /// I2C bus number of the display panel.
    #[serde(default)]
    pub display_bus: Option<u8>,
    /// I2C address of the display panel, in hexadecimal.
    #[serde(default)]
    pub display_address: Option<I2cAddress>,
    /// Network interface whose IPv4 address is shown on the display.
    #[serde(default)]
    pub display_interface: Option<String>,
    /// Program that draws prepared text lines onto the panel.
    #[serde(default)]
    pub display_program: Option<Utf8PathBuf>,
    /// Tracing filter expression.
    #[serde(default)]
    pub log_filter: Option<String>,
    /// Log output format.
    #[serde(default)]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Address and port the given service listens on.
    #[must_use]
    pub fn listen_address(&self, service: ServiceKind) -> ListenAddress {
        ListenAddress::new(
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or_else(|| service.default_port()),
        )
    }

    /// Listen backlog for the given service.
    #[must_use]
    pub fn backlog(&self, service: ServiceKind) -> u32 {
        self.backlog.unwrap_or_else(|| service.default_backlog())
    }

    /// NetworkManager connection profile name.
    #[must_use]
    pub fn connection_name(&self) -> &str {
        self.connection_name
            .as_deref()
            .unwrap_or(DEFAULT_CONNECTION_NAME)
    }

    /// Path of the RTC device node.
    #[must_use]
    pub fn rtc_device(&self) -> &Utf8Path {
        self.rtc_device
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_RTC_DEVICE))
    }

    /// I2C bus hosting the display.
    #[must_use]
    pub fn display_bus(&self) -> u8 {
        self.display_bus.unwrap_or(DEFAULT_DISPLAY_BUS)
    }

    /// I2C address of the display.
    #[must_use]
    pub fn display_address(&self) -> I2cAddress {
        self.display_address.unwrap_or(DEFAULT_DISPLAY_ADDRESS)
    }

    /// Interface whose address is rendered on the display.
    #[must_use]
    pub fn display_interface(&self) -> &str {
        self.display_interface
            .as_deref()
            .unwrap_or(DEFAULT_DISPLAY_INTERFACE)
    }

    /// Render program invoked by the display daemon.
    #[must_use]
    pub fn display_program(&self) -> &Utf8Path {
        self.display_program
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_DISPLAY_PROGRAM))
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ServiceKind::Credential, 7070, 1)]
    #[case(ServiceKind::Network, 7575, 5)]
    #[case(ServiceKind::Display, 5050, 2)]
    #[case(ServiceKind::Clock, 6060, 2)]
    fn defaults_follow_the_service(
        #[case] service: ServiceKind,
        #[case] port: u16,
        #[case] backlog: u32,
    ) {
        let config = Config::default();
        assert_eq!(
            config.listen_address(service),
            ListenAddress::new("0.0.0.0", port)
        );
        assert_eq!(config.backlog(service), backlog);
    }

    #[test]
    fn explicit_values_override_service_defaults() {
        let config = Config {
            host: Some(String::from("127.0.0.1")),
            port: Some(9100),
            backlog: Some(16),
            ..Config::default()
        };
        assert_eq!(
            config.listen_address(ServiceKind::Clock),
            ListenAddress::new("127.0.0.1", 9100)
        );
        assert_eq!(config.backlog(ServiceKind::Credential), 16);
    }

    #[test]
    fn handler_context_defaults() {
        let config = Config::default();
        assert_eq!(config.connection_name(), "Wired connection 1");
        assert_eq!(config.rtc_device(), Utf8Path::new("/dev/rtc1"));
        assert_eq!(config.display_bus(), 1);
        assert_eq!(config.display_address().value(), 0x3C);
        assert_eq!(config.display_interface(), "eth0");
        assert_eq!(config.display_program(), Utf8Path::new("hostctl-oled"));
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.log_format(), LogFormat::Json);
    }
}
