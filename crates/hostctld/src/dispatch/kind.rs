use std::fmt;

/// Client-safe classification of a failed request.
///
/// Each kind maps to a fixed message. Program names, exit codes, and captured
/// output never leave the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was malformed or incomplete.
    Protocol,
    /// The submitted login names no local account.
    UnknownUser,
    /// The account database could not be consulted.
    CredentialLookup,
    /// The current network settings could not be read.
    NetworkQuery,
    /// The new network settings could not be applied.
    NetworkUpdate,
    /// The hardware clock could not be read.
    ClockRead,
    /// The hardware or system clock could not be set.
    ClockWrite,
    /// The display could not be drawn.
    DisplayRender,
    /// The daemon failed unexpectedly while serving the request.
    Internal,
}

impl ErrorKind {
    /// Stable identifier used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::UnknownUser => "unknown_user",
            Self::CredentialLookup => "credential_lookup",
            Self::NetworkQuery => "network_query",
            Self::NetworkUpdate => "network_update",
            Self::ClockRead => "clock_read",
            Self::ClockWrite => "clock_write",
            Self::DisplayRender => "display_render",
            Self::Internal => "internal",
        }
    }

    /// Message returned to the client.
    #[must_use]
    pub const fn client_message(self) -> &'static str {
        match self {
            Self::Protocol => "Invalid request",
            Self::UnknownUser => "User does not exist.",
            Self::CredentialLookup => "Unable to verify credentials",
            Self::NetworkQuery => "Unable to read network configuration",
            Self::NetworkUpdate => "Unable to update network configuration",
            Self::ClockRead => "Unable to read hardware clock",
            Self::ClockWrite => "Unable to set time",
            Self::DisplayRender => "Display error",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
