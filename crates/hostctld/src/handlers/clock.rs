//! Hardware clock access through `hwclock`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};

use super::{CommandRunner, HandlerError, Invocation};

/// Reads and sets the real-time clock.
pub trait HardwareClock: Send + Sync {
    /// Current clock value as Unix seconds.
    ///
    /// # Errors
    ///
    /// Fails when the device cannot be read or its output parsed.
    fn read(&self) -> Result<i64, HandlerError>;

    /// Sets the hardware clock, then the system clock.
    ///
    /// # Errors
    ///
    /// Fails when either clock cannot be set. A hardware clock that was
    /// already updated is left as is.
    fn write(&self, timestamp: i64) -> Result<(), HandlerError>;
}

const HWCLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%z";
const SET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// [`HardwareClock`] backed by `hwclock` and `date`.
pub struct Hwclock {
    runner: Arc<dyn CommandRunner>,
    device: Utf8PathBuf,
}

impl Hwclock {
    /// Drives the RTC at `device`, for example `/dev/rtc1`.
    pub fn new(runner: Arc<dyn CommandRunner>, device: impl Into<Utf8PathBuf>) -> Self {
        Self {
            runner,
            device: device.into(),
        }
    }
}

impl HardwareClock for Hwclock {
    fn read(&self) -> Result<i64, HandlerError> {
        let invocation =
            Invocation::new("hwclock").args(["--get", "-f", self.device.as_str()]);
        let stdout = self.runner.run_checked(&invocation)?;
        parse_hwclock(stdout.trim())
    }

    fn write(&self, timestamp: i64) -> Result<(), HandlerError> {
        let when = DateTime::<Utc>::from_timestamp(timestamp, 0)
            .ok_or(HandlerError::TimestampRange { timestamp })?
            .format(SET_FORMAT)
            .to_string();

        let rtc = Invocation::new("hwclock").args([
            "--set",
            "--utc",
            "--date",
            when.as_str(),
            "-f",
            self.device.as_str(),
        ]);
        self.runner.run_checked(&rtc)?;

        let system = Invocation::new("date").args(["--utc", "--set", when.as_str()]);
        self.runner.run_checked(&system)?;
        Ok(())
    }
}

fn parse_hwclock(text: &str) -> Result<i64, HandlerError> {
    DateTime::parse_from_str(text, HWCLOCK_FORMAT)
        .map(|parsed| parsed.timestamp())
        .map_err(|error| HandlerError::output("hwclock", format!("'{text}': {error}")))
}
