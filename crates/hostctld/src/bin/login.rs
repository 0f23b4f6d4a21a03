//! Entrypoint for the credential check daemon.

use std::io::{self, Write};
use std::process::ExitCode;

use hostctl_config::ServiceKind;

fn main() -> ExitCode {
    match hostctld::run_service(ServiceKind::Credential) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "hostctl-login: {error}").ok();
            ExitCode::FAILURE
        }
    }
}
