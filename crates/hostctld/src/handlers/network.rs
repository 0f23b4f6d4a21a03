//! IPv4 settings through NetworkManager's `nmcli`.

use std::sync::Arc;

use hostctl_protocol::NetworkConfig;

use super::{CommandRunner, HandlerError, Invocation};

/// Reads and replaces the settings of one managed connection.
pub trait NetworkManager: Send + Sync {
    /// Current address, gateway, and DNS server.
    ///
    /// # Errors
    ///
    /// Fails when the settings cannot be queried.
    fn current(&self) -> Result<NetworkConfig, HandlerError>;

    /// Applies new settings and reactivates the connection.
    ///
    /// # Errors
    ///
    /// Fails when either step fails. The first step is not rolled back when
    /// the second fails.
    fn apply(&self, config: &NetworkConfig) -> Result<(), HandlerError>;
}

/// [`NetworkManager`] backed by `nmcli`.
pub struct Nmcli {
    runner: Arc<dyn CommandRunner>,
    connection: String,
}

impl Nmcli {
    /// Manages the connection profile called `connection`.
    pub fn new(runner: Arc<dyn CommandRunner>, connection: impl Into<String>) -> Self {
        Self {
            runner,
            connection: connection.into(),
        }
    }
}

impl NetworkManager for Nmcli {
    fn current(&self) -> Result<NetworkConfig, HandlerError> {
        let invocation = Invocation::new("nmcli").args([
            "--terse",
            "--fields",
            "IP4.ADDRESS,IP4.GATEWAY,IP4.DNS",
            "connection",
            "show",
            self.connection.as_str(),
        ]);
        let stdout = self.runner.run_checked(&invocation)?;
        Ok(parse_terse(&stdout))
    }

    fn apply(&self, config: &NetworkConfig) -> Result<(), HandlerError> {
        let modify = Invocation::new("sudo").args([
            "-n",
            "nmcli",
            "connection",
            "modify",
            self.connection.as_str(),
            "ipv4.method",
            "manual",
            "ipv4.addresses",
            config.address.as_str(),
            "ipv4.gateway",
            config.gateway.as_str(),
            "ipv4.dns",
            config.dns.as_str(),
        ]);
        self.runner.run_checked(&modify)?;

        let activate = Invocation::new("sudo").args([
            "-n",
            "nmcli",
            "connection",
            "up",
            self.connection.as_str(),
        ]);
        self.runner.run_checked(&activate)?;
        Ok(())
    }
}

/// Picks the first address and DNS server out of `--terse` output; absent
/// keys become empty strings.
fn parse_terse(stdout: &str) -> NetworkConfig {
    let mut config = NetworkConfig::default();
    for (key, value) in stdout.lines().filter_map(|line| line.split_once(':')) {
        let slot = match key.trim() {
            "IP4.ADDRESS[1]" => &mut config.address,
            "IP4.GATEWAY" => &mut config.gateway,
            "IP4.DNS[1]" => &mut config.dns,
            _ => continue,
        };
        value.trim().clone_into(slot);
    }
    config
}
