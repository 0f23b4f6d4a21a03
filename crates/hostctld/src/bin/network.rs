//! Entrypoint for the network configuration daemon.

use std::io::{self, Write};
use std::process::ExitCode;

use hostctl_config::ServiceKind;

fn main() -> ExitCode {
    match hostctld::run_service(ServiceKind::Network) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "hostctl-network: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
