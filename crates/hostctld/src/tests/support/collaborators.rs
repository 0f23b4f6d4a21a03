//! Stateful fakes for the host collaborators.
//!
//! Unlike the mocks in `handlers::test_support`, these keep state across
//! requests, which the multi-request scenarios rely on.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hostctl_protocol::{DisplayFrame, NetworkConfig};

use crate::handlers::{
    CredentialVerifier, DisplayRenderer, HandlerError, HardwareClock, NetworkManager,
};

/// Clock that returns whatever was last written.
#[derive(Clone, Default)]
pub(crate) struct FakeClock {
    now: Arc<AtomicI64>,
    writes: Arc<AtomicUsize>,
}

impl FakeClock {
    pub(crate) fn reading(seconds: i64) -> Self {
        let clock = Self::default();
        clock.now.store(seconds, Ordering::SeqCst);
        clock
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl HardwareClock for FakeClock {
    fn read(&self) -> Result<i64, HandlerError> {
        Ok(self.now.load(Ordering::SeqCst))
    }

    fn write(&self, timestamp: i64) -> Result<(), HandlerError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.now.store(timestamp, Ordering::SeqCst);
        Ok(())
    }
}

/// Network manager holding one configuration in memory.
#[derive(Clone, Default)]
pub(crate) struct FakeNetwork {
    config: Arc<Mutex<NetworkConfig>>,
    applies: Arc<AtomicUsize>,
}

impl FakeNetwork {
    pub(crate) fn with_address(address: &str) -> Self {
        let network = Self::default();
        *network.config.lock().expect("network lock") = NetworkConfig {
            address: address.to_owned(),
            gateway: String::from("192.168.1.1"),
            dns: String::from("192.168.1.1"),
        };
        network
    }

    pub(crate) fn applies(&self) -> usize {
        self.applies.load(Ordering::SeqCst)
    }
}

impl NetworkManager for FakeNetwork {
    fn current(&self) -> Result<NetworkConfig, HandlerError> {
        Ok(self.config.lock().expect("network lock").clone())
    }

    fn apply(&self, config: &NetworkConfig) -> Result<(), HandlerError> {
        self.applies.fetch_add(1, Ordering::SeqCst);
        config.clone_into(&mut self.config.lock().expect("network lock"));
        Ok(())
    }
}

/// Renderer that counts frames.
#[derive(Clone, Default)]
pub(crate) struct FakeRenderer {
    renders: Arc<AtomicUsize>,
}

impl FakeRenderer {
    pub(crate) fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl DisplayRenderer for FakeRenderer {
    fn render(&self, _frame: &DisplayFrame) -> Result<(), HandlerError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Verifier with a single known account.
#[derive(Clone)]
pub(crate) struct FakeVerifier {
    login: String,
    password: String,
}

impl FakeVerifier {
    pub(crate) fn account(login: &str, password: &str) -> Self {
        Self {
            login: login.to_owned(),
            password: password.to_owned(),
        }
    }
}

impl CredentialVerifier for FakeVerifier {
    fn verify(&self, login: &str, password: &str) -> Result<bool, HandlerError> {
        if login == self.login {
            Ok(password == self.password)
        } else {
            Err(HandlerError::UnknownUser {
                login: login.to_owned(),
            })
        }
    }
}
