use crate::i2c::I2cAddress;
use crate::logging::LogFormat;

/// Bind address used when none is configured.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// NetworkManager profile edited by the network daemon.
pub const DEFAULT_CONNECTION_NAME: &str = "Wired connection 1";

/// RTC device node read and written by the clock daemon.
pub const DEFAULT_RTC_DEVICE: &str = "/dev/rtc1";

/// I2C bus carrying the OLED panel.
pub const DEFAULT_DISPLAY_BUS: u8 = 1;

/// Factory I2C address of SSD1306 panels.
pub const DEFAULT_DISPLAY_ADDRESS: I2cAddress = I2cAddress::new(0x3C);

/// Interface whose IPv4 address is shown on the panel.
pub const DEFAULT_DISPLAY_INTERFACE: &str = "eth0";

/// Helper program that draws text lines onto the panel.
pub const DEFAULT_DISPLAY_PROGRAM: &str = "hostctl-oled";

/// Default log filter expression used by the daemons.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the daemons.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the daemons.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}
