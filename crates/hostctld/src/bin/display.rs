//! Entrypoint for the OLED display daemon.

use std::io::{self, Write};
use std::process::ExitCode;

use hostctl_config::ServiceKind;

fn main() -> ExitCode {
    match hostctld::run_service(ServiceKind::Display) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "hostctl-display: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
