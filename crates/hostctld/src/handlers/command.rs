//! Running external programs.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{HANDLER_TARGET, HandlerError};

/// A program invocation: name, arguments, and optional standard input.
#[derive(Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl Invocation {
    /// Starts an invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Appends arguments.
    #[must_use]
    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Supplies bytes to write to the program's standard input.
    #[must_use]
    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument vector, excluding the program name.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Standard input, when any.
    pub fn input(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }
}

// Standard input may carry a password, so only its length is shown.
impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("stdin_bytes", &self.stdin.as_ref().map(Vec::len))
            .finish()
    }
}

/// Captured result of a finished program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, absent when killed by a signal.
    pub code: Option<i32>,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl CommandOutput {
    /// Output of a successful run.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a run that exited with `code`.
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the program exited with status zero.
    pub const fn succeeded(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Returns standard output, or an [`HandlerError::Exit`] when the program
    /// failed.
    ///
    /// # Errors
    ///
    /// Fails when the exit status is non-zero or absent.
    pub fn into_stdout(self, program: &str) -> Result<String, HandlerError> {
        if self.succeeded() {
            Ok(self.stdout)
        } else {
            Err(HandlerError::Exit {
                program: program.to_owned(),
                code: self.code,
                stderr: self.stderr.trim().to_owned(),
            })
        }
    }
}

/// Runs external programs to completion.
pub trait CommandRunner: Send + Sync {
    /// Runs the invocation and captures its output.
    ///
    /// A non-zero exit is not an error at this level; callers decide.
    ///
    /// # Errors
    ///
    /// Fails when the program cannot be started or its pipes fail.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, HandlerError>;

    /// Runs the invocation and requires it to succeed.
    ///
    /// # Errors
    ///
    /// Fails as [`CommandRunner::run`] does, or with [`HandlerError::Exit`].
    fn run_checked(&self, invocation: &Invocation) -> Result<String, HandlerError> {
        self.run(invocation)?.into_stdout(invocation.program())
    }
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, HandlerError> {
        debug!(target: HANDLER_TARGET, ?invocation, "running command");
        let program = invocation.program();
        let mut child = Command::new(program)
            .args(invocation.arguments())
            .stdin(if invocation.input().is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| HandlerError::Spawn {
                program: program.to_owned(),
                source,
            })?;

        if let (Some(input), Some(mut stdin)) = (invocation.input(), child.stdin.take()) {
            stdin
                .write_all(input)
                .map_err(|source| HandlerError::Pipe {
                    program: program.to_owned(),
                    source,
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|source| HandlerError::Pipe {
                program: program.to_owned(),
                source,
            })?;
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
