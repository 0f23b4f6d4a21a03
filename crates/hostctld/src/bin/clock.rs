//! Entrypoint for the hardware clock daemon.

use std::io::{self, Write};
use std::process::ExitCode;

use hostctl_config::ServiceKind;

fn main() -> ExitCode {
    match hostctld::run_service(ServiceKind::Clock) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "hostctl-clock: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
