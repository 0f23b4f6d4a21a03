use hostctl_config::ServiceKind;
use hostctl_protocol::{ClockCommand, Envelope, Payload, StatusKey};

use crate::dispatch::{ControlService, DispatchError, ErrorKind};
use crate::handlers::HardwareClock;
use crate::session::SessionStyle;

const UPDATED: &str = "time is updated";

/// Reads and sets the hardware clock.
pub struct ClockService {
    clock: Box<dyn HardwareClock>,
}

impl ClockService {
    /// Builds the service around a clock.
    pub fn new(clock: Box<dyn HardwareClock>) -> Self {
        Self { clock }
    }
}

impl ControlService for ClockService {
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
            ClockCommand::Get => {
                let seconds = self
                    .clock
                    .read()
                    .map_err(|error| DispatchError::handler(ErrorKind::ClockRead, error))?;
                Ok(Envelope::success(StatusKey::Status, Payload::Timestamp(seconds)))
            }
            ClockCommand::Set { timestamp } => {
                self.clock
                    .write(timestamp)
                    .map_err(|error| DispatchError::handler(ErrorKind::ClockWrite, error))?;
                Ok(Envelope::success_message(StatusKey::Status, UPDATED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::handlers::HandlerError;
    use crate::handlers::test_support::MockClock;

    fn reply(clock: MockClock, payload: &[u8]) -> String {
        let dispatcher = Dispatcher::new(ClockService::new(Box::new(clock)));
        String::from_utf8(dispatcher.dispatch(payload).to_vec().expect("encode")).expect("utf8")
    }

    #[test]
    fn get_returns_timestamp() {
        let mut clock = MockClock::new();
        clock.expect_read().once().returning(|| Ok(1_700_000_000));
        assert_eq!(
            reply(clock, br#"{"cmd":"get"}"#),
            r#"{"status":"success","timestamp":1700000000}"#
        );
    }

    #[test]
    fn set_writes_truncated_timestamp() {
        let mut clock = MockClock::new();
        clock
            .expect_write()
            .with(eq(1_700_000_000_i64))
            .once()
            .returning(|_| Ok(()));
        assert_eq!(
            reply(clock, br#"{"cmd":"set","ts":1700000000.9}"#),
            r#"{"status":"success","message":"time is updated"}"#
        );
    }

    #[test]
    fn read_failure_is_an_error_envelope() {
        let mut clock = MockClock::new();
        clock
            .expect_read()
            .once()
            .returning(|| Err(HandlerError::output("hwclock", "no such device")));
        assert_eq!(
            reply(clock, br#"{"cmd":"get"}"#),
            r#"{"status":"error","message":"Unable to read hardware clock"}"#
        );
    }

    #[test]
    fn set_without_timestamp_never_writes() {
        let mut clock = MockClock::new();
        clock.expect_write().never();
        assert_eq!(
            reply(clock, br#"{"cmd":"set"}"#),
            r#"{"status":"error","message":"missing required keys: ts"}"#
        );
    }
}
