//! Dispatcher error mapping.

use hostctl_config::ServiceKind;
use hostctl_protocol::{ClockCommand, Envelope, Payload, Status, StatusKey};
use rstest::rstest;

use super::*;
use crate::handlers::HandlerError;
use crate::session::SessionStyle;

/// `get` panics, `set` to zero fails, any other `set` echoes the timestamp.
struct FragileClock;

impl ControlService for FragileClock {
    type Request = ClockCommand;

    fn kind(&self) -> ServiceKind {
        ServiceKind::Clock
    }

    fn session_style(&self) -> SessionStyle {
        SessionStyle::Persistent
    }

    fn error_key(&self) -> StatusKey {
        StatusKey::Status
    }

    fn execute(&self, request: ClockCommand) -> Result<Envelope, DispatchError> {
        match request {
            ClockCommand::Get => panic!("rtc driver crashed"),
            ClockCommand::Set { timestamp: 0 } => Err(DispatchError::handler(
                ErrorKind::ClockWrite,
                HandlerError::Exit {
                    program: String::from("hwclock"),
                    code: Some(1),
                    stderr: String::from("ioctl(RTC_SET_TIME) to /dev/rtc1 failed"),
                },
            )),
            ClockCommand::Set { timestamp } => Ok(Envelope::success(
                StatusKey::Status,
                Payload::Timestamp(timestamp),
            )),
        }
    }
}

fn dispatch(payload: &[u8]) -> Envelope {
    Dispatcher::new(FragileClock).dispatch(payload)
}

#[test]
fn valid_request_reaches_service() {
    let envelope = dispatch(br#"{"cmd":"set","ts":42}"#);
    assert_eq!(envelope.status(), Status::Success);
    assert_eq!(envelope.payload(), &Payload::Timestamp(42));
}

#[test]
fn panic_becomes_internal_error() {
    let envelope = dispatch(br#"{"cmd":"get"}"#);
    assert_eq!(envelope.status(), Status::Error);
    assert_eq!(envelope.message(), Some("Internal error"));
}

#[test]
fn handler_failure_hides_diagnostics() {
    let envelope = dispatch(br#"{"cmd":"set","ts":0}"#);
    assert_eq!(envelope.message(), Some("Unable to set time"));
}

#[rstest]
#[case(b"".as_slice(), "malformed JSON request: empty request")]
#[case(b"[]".as_slice(), "request must be a JSON object")]
#[case(br#"{"ts":5}"#.as_slice(), "missing required keys: cmd")]
#[case(br#"{"cmd":"stop"}"#.as_slice(), "unknown cmd 'stop'")]
fn protocol_errors_describe_the_request(#[case] payload: &[u8], #[case] message: &str) {
    let envelope = dispatch(payload);
    assert_eq!(envelope.key(), StatusKey::Status);
    assert_eq!(envelope.status(), Status::Error);
    assert_eq!(envelope.message(), Some(message));
}

#[test]
fn error_kinds_classify_dispatch_errors() {
    let protocol = DispatchError::from(hostctl_protocol::RequestError::NotAnObject);
    assert_eq!(protocol.kind(), ErrorKind::Protocol);
    assert_eq!(DispatchError::panicked("boom").kind(), ErrorKind::Internal);
    assert_eq!(DispatchError::panicked("boom").client_message(), "Internal error");
}
