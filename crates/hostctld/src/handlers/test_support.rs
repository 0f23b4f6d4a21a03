//! Mock collaborators shared by handler, service, and behaviour tests.

use hostctl_protocol::{DisplayFrame, NetworkConfig};
use mockall::mock;

use super::{
    CommandOutput, CommandRunner, CredentialVerifier, DisplayRenderer, HandlerError,
    HardwareClock, Invocation, NetworkManager,
};

mock! {
    pub Runner {}
    impl CommandRunner for Runner {
        fn run(&self, invocation: &Invocation) -> Result<CommandOutput, HandlerError>;
    }
}

mock! {
    pub Verifier {}
    impl CredentialVerifier for Verifier {
        fn verify(&self, login: &str, password: &str) -> Result<bool, HandlerError>;
    }
}

mock! {
    pub Network {}
    impl NetworkManager for Network {
        fn current(&self) -> Result<NetworkConfig, HandlerError>;
        fn apply(&self, config: &NetworkConfig) -> Result<(), HandlerError>;
    }
}

mock! {
    pub Clock {}
    impl HardwareClock for Clock {
        fn read(&self) -> Result<i64, HandlerError>;
        fn write(&self, timestamp: i64) -> Result<(), HandlerError>;
    }
}

mock! {
    pub Renderer {}
    impl DisplayRenderer for Renderer {
        fn render(&self, frame: &DisplayFrame) -> Result<(), HandlerError>;
    }
}

/// Joins a program and its arguments for readable assertions.
pub(crate) fn command_line(invocation: &Invocation) -> String {
    std::iter::once(invocation.program())
        .chain(invocation.arguments().iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}
