//! Behavioural tests for daemons served over loopback TCP.

use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use hostctl_config::ListenAddress;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::services::{ClockService, CredentialService};
use crate::session::SessionHandler;
use crate::transport::{ConnectionHandler, ListenerHandle, SocketListener};

use super::support::{FakeClock, FakeVerifier};

const READ_TIMEOUT: Duration = Duration::from_secs(5);

struct SocketWorld {
    address: ListenAddress,
    listener: Option<ListenerHandle>,
    local: Option<SocketAddr>,
    bind_error: Option<String>,
    reserved: Option<TcpListener>,
    reply: Option<String>,
}

impl SocketWorld {
    fn new() -> Self {
        Self {
            address: ListenAddress::new("127.0.0.1", 0),
            listener: None,
            local: None,
            bind_error: None,
            reserved: None,
            reply: None,
        }
    }

    fn start(&mut self, handler: Arc<dyn ConnectionHandler>, backlog: u32) {
        match SocketListener::bind(&self.address, backlog) {
            Ok(listener) => {
                self.local = listener.local_addr();
                match listener.start(handler) {
                    Ok(handle) => self.listener = Some(handle),
                    Err(error) => self.bind_error = Some(error.to_string()),
                }
            }
            Err(error) => self.bind_error = Some(error.to_string()),
        }
    }

    fn reserve_port(&mut self) {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind reserved port");
        let port = listener.local_addr().expect("local addr").port();
        self.address = ListenAddress::new("127.0.0.1", port);
        self.reserved = Some(listener);
    }

    fn connect(&self) -> TcpStream {
        let addr = self.local.expect("listener address should be set");
        let stream = TcpStream::connect(addr).expect("connect client");
        stream
            .set_read_timeout(Some(READ_TIMEOUT))
            .expect("set read timeout");
        stream
    }
}

impl Drop for SocketWorld {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.take() {
            handle.shutdown();
            handle.join().ok();
        }
        self.reserved = None;
    }
}

#[fixture]
fn world() -> RefCell<SocketWorld> {
    RefCell::new(SocketWorld::new())
}

#[given("a clock daemon reading {seconds} is listening")]
fn given_clock_daemon(world: &RefCell<SocketWorld>, seconds: i64) {
    let service = ClockService::new(Box::new(FakeClock::reading(seconds)));
    world
        .borrow_mut()
        .start(Arc::new(SessionHandler::new(service)), 2);
    assert!(
        world.borrow().bind_error.is_none(),
        "listener start failed: {:?}",
        world.borrow().bind_error
    );
}

#[given("a credential daemon for {login} with password {password} is listening")]
fn given_credential_daemon(world: &RefCell<SocketWorld>, login: String, password: String) {
    let service = CredentialService::new(Box::new(FakeVerifier::account(&login, &password)));
    world
        .borrow_mut()
        .start(Arc::new(SessionHandler::new(service)), 1);
    assert!(
        world.borrow().bind_error.is_none(),
        "listener start failed: {:?}",
        world.borrow().bind_error
    );
}

#[given("a TCP port is already bound")]
fn given_port_in_use(world: &RefCell<SocketWorld>) {
    world.borrow_mut().reserve_port();
}

#[when("a client sends {payload} and closes its side")]
fn when_client_sends_and_closes(world: &RefCell<SocketWorld>, payload: String) {
    let mut stream = world.borrow().connect();
    stream.write_all(payload.as_bytes()).expect("write request");
    stream.shutdown(Shutdown::Write).expect("half close");
    let mut reply = String::new();
    stream.read_to_string(&mut reply).expect("read reply");
    world.borrow_mut().reply = Some(reply);
}

#[when("a client sends {payload} and waits")]
fn when_client_sends_and_waits(world: &RefCell<SocketWorld>, payload: String) {
    let mut stream = world.borrow().connect();
    stream.write_all(payload.as_bytes()).expect("write request");
    // The daemon closes the connection itself after answering.
    let mut reply = String::new();
    stream.read_to_string(&mut reply).expect("read reply");
    world.borrow_mut().reply = Some(reply);
}

#[when("a clock daemon starts on that port")]
fn when_clock_daemon_starts(world: &RefCell<SocketWorld>) {
    let service = ClockService::new(Box::new(FakeClock::reading(0)));
    world
        .borrow_mut()
        .start(Arc::new(SessionHandler::new(service)), 2);
}

#[then("the client receives {json}")]
fn then_client_receives(world: &RefCell<SocketWorld>, json: String) {
    assert_eq!(world.borrow().reply.as_deref(), Some(json.as_str()));
}

#[then("starting the listener fails")]
fn then_listener_fails(world: &RefCell<SocketWorld>) {
    assert!(
        world.borrow().bind_error.is_some(),
        "expected listener start to fail"
    );
}

#[scenario(
    path = "tests/features/daemon_socket.feature",
    name = "A clock daemon answers over TCP"
)]
fn clock_over_tcp(world: RefCell<SocketWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_socket.feature",
    name = "The credential daemon hangs up after answering"
)]
fn credential_over_tcp(world: RefCell<SocketWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_socket.feature",
    name = "Binding a port that is in use fails"
)]
fn port_in_use(world: RefCell<SocketWorld>) {
    drop(world);
}
