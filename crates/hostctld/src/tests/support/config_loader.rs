//! Configuration sources for success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use hostctl_config::Config;
use ortho_config::{OrthoConfig, OrthoError};

use crate::bootstrap::ConfigLoader;

/// Loopback configuration on an ephemeral port.
pub(crate) fn loopback_config() -> Config {
    Config {
        host: Some(String::from("127.0.0.1")),
        port: Some(0),
        ..Config::default()
    }
}

/// Loader that fails by passing an invalid port on the command line.
pub(crate) struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("hostctld"),
            OsString::from("--port"),
            OsString::from("not-a-port"),
        ];
        Config::load_from_iter(args)
    }
}
