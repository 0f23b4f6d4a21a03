//! Password verification against the local shadow database.

use std::sync::Arc;

use tracing::debug;

use super::{CommandRunner, HANDLER_TARGET, HandlerError, Invocation};

/// Checks a login and password pair.
pub trait CredentialVerifier: Send + Sync {
    /// Returns whether `password` is correct for `login`.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::UnknownUser`] when no account exists, or
    /// another [`HandlerError`] when the account database cannot be read.
    fn verify(&self, login: &str, password: &str) -> Result<bool, HandlerError>;
}

/// `getent` exits with this status when the key is not found.
const GETENT_NOT_FOUND: i32 = 2;

/// Hashes the candidate with the system `crypt(3)` through Perl.
///
/// Reads the stored hash and then the password, one per line, from stdin so
/// neither appears in the process list.
const CRYPT_SCRIPT: &str =
    "chomp(my $h = <STDIN>); chomp(my $p = <STDIN>); print crypt($p, $h) // ''";

/// Verifies passwords by recomputing the stored crypt hash.
///
/// The shadow entry is read with `sudo -n getent shadow` and the candidate
/// password is hashed by the system's `crypt(3)` with the stored hash as
/// setting, so every scheme libcrypt knows is accepted: yescrypt, SHA-crypt
/// with or without explicit rounds, bcrypt, MD5, and DES.
pub struct ShadowVerifier {
    runner: Arc<dyn CommandRunner>,
}

impl ShadowVerifier {
    /// Builds a verifier that runs programs through `runner`.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn shadow_hash(&self, login: &str) -> Result<String, HandlerError> {
        let invocation = Invocation::new("sudo").args(["-n", "getent", "shadow", login]);
        let output = self.runner.run(&invocation)?;
        if output.code == Some(GETENT_NOT_FOUND) {
            return Err(HandlerError::UnknownUser {
                login: login.to_owned(),
            });
        }
        let entry = output.into_stdout("getent")?;
        entry
            .lines()
            .find_map(|line| {
                let mut fields = line.split(':');
                (fields.next() == Some(login)).then(|| fields.next().unwrap_or_default())
            })
            .map(str::to_owned)
            .ok_or_else(|| HandlerError::UnknownUser {
                login: login.to_owned(),
            })
    }

    fn recompute(&self, stored: &str, password: &str) -> Result<String, HandlerError> {
        let input = format!("{stored}\n{password}\n");
        let invocation = Invocation::new("perl")
            .args(["-e", CRYPT_SCRIPT])
            .stdin(input);
        let computed = self.runner.run_checked(&invocation)?;
        // libcrypt answers an unknown setting with a `*0`/`*1` token or nothing.
        if computed.is_empty() || computed.starts_with('*') {
            return Err(HandlerError::UnsupportedHash {
                scheme: scheme_of(stored).to_owned(),
            });
        }
        Ok(computed)
    }
}

impl CredentialVerifier for ShadowVerifier {
    fn verify(&self, login: &str, password: &str) -> Result<bool, HandlerError> {
        if login.is_empty() || login.contains(':') {
            return Err(HandlerError::UnknownUser {
                login: login.to_owned(),
            });
        }
        let stored = self.shadow_hash(login)?;
        if is_locked(&stored) {
            debug!(target: HANDLER_TARGET, %login, "account has no usable password");
            return Ok(false);
        }
        // The helper reads one password per line.
        if password.contains('\n') {
            return Ok(false);
        }
        Ok(self.recompute(&stored, password)? == stored)
    }
}

/// Empty, `!`-prefixed, and `*` fields cannot be matched by any password.
fn is_locked(stored: &str) -> bool {
    stored.is_empty() || stored.starts_with('!') || stored.starts_with('*')
}

/// Scheme identifier of a stored hash: the `$id$` prefix, or `des` for the
/// traditional 13-character form.
fn scheme_of(stored: &str) -> &str {
    stored
        .strip_prefix('$')
        .and_then(|rest| rest.split('$').next())
        .unwrap_or("des")
}
