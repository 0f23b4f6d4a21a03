//! Identity of each daemon in the family and its listening defaults.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The four host-control daemons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ServiceKind {
    /// Checks a login and password against the local account database.
    Credential,
    /// Reads and rewrites the IPv4 settings of a NetworkManager profile.
    Network,
    /// Draws status text on the OLED panel.
    Display,
    /// Reads and sets the hardware clock.
    Clock,
}

/// Errors encountered while parsing a [`ServiceKind`] from text.
pub type ServiceKindParseError = strum::ParseError;

impl ServiceKind {
    /// Every daemon, in port order of the original deployment.
    pub const ALL: [Self; 4] = [Self::Display, Self::Clock, Self::Credential, Self::Network];

    /// Port the daemon listens on unless configured otherwise.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Credential => 7070,
            Self::Network => 7575,
            Self::Display => 5050,
            Self::Clock => 6060,
        }
    }

    /// Listen backlog the daemon requests unless configured otherwise.
    #[must_use]
    pub const fn default_backlog(self) -> u32 {
        match self {
            Self::Credential => 1,
            Self::Network => 5,
            Self::Display | Self::Clock => 2,
        }
    }

    /// Name of the binary that runs this daemon.
    #[must_use]
    pub const fn binary_name(self) -> &'static str {
        match self {
            Self::Credential => "hostctl-login",
            Self::Network => "hostctl-network",
            Self::Display => "hostctl-display",
            Self::Clock => "hostctl-clock",
        }
    }
}

/// Host and port pair a daemon binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddress {
    host: String,
    port: u16,
}

impl ListenAddress {
    /// Builds a listen address.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or IP literal.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "tcp://{}:{}", self.host, self.port)
    }
}
