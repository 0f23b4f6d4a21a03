//! Failures raised by host collaborators.

use std::io;

use thiserror::Error;

/// Errors raised while carrying out a host operation.
///
/// These carry full diagnostics for the log. Clients only ever see the
/// [`ErrorKind`](crate::ErrorKind) the owning service assigns.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The program could not be started.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// Input could not be written to, or output read from, the program.
    #[error("failed to communicate with '{program}': {source}")]
    Pipe {
        /// Program name.
        program: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The program exited unsuccessfully.
    #[error("'{program}' exited with status {}: {stderr}", display_code(.code))]
    Exit {
        /// Program name.
        program: String,
        /// Exit code, absent when killed by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The program succeeded but its output could not be interpreted.
    #[error("unexpected output from '{program}': {message}")]
    Output {
        /// Program name.
        program: String,
        /// What was wrong with the output.
        message: String,
    },
    /// No account exists for the login.
    #[error("no account named '{login}'")]
    UnknownUser {
        /// Submitted login.
        login: String,
    },
    /// The stored password hash uses a scheme that cannot be verified.
    #[error("unsupported password hash scheme '{scheme}'")]
    UnsupportedHash {
        /// Scheme identifier from the hash prefix.
        scheme: String,
    },
    /// Interface addresses could not be enumerated.
    #[error("failed to read addresses of interface '{name}': {source}")]
    Interface {
        /// Interface name.
        name: String,
        /// Underlying OS error.
        #[source]
        source: nix::Error,
    },
    /// A timestamp outside the representable calendar range.
    #[error("timestamp {timestamp} is out of range")]
    TimestampRange {
        /// Requested Unix time.
        timestamp: i64,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| String::from("signal"), |value| value.to_string())
}

impl HandlerError {
    /// Creates an unexpected-output error.
    pub fn output(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Output {
            program: program.into(),
            message: message.into(),
        }
    }
}
