//! Status text on the I²C OLED panel.
//!
//! Drawing is delegated to an external driver program that is not part of
//! this workspace; it must be installed on the appliance and named by the
//! `display_program` setting (`HOSTCTL_DISPLAY_PROGRAM`, default
//! `hostctl-oled` on `PATH`). Without it every frame fails with a spawn error.

use std::io;
use std::net::Ipv4Addr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use hostctl_config::I2cAddress;
use hostctl_protocol::DisplayFrame;
use nix::ifaddrs::getifaddrs;
use tracing::warn;

use super::{CommandRunner, HANDLER_TARGET, HandlerError, Invocation};

/// Draws a status frame.
pub trait DisplayRenderer: Send + Sync {
    /// Replaces the panel contents with `frame`.
    ///
    /// # Errors
    ///
    /// Fails when the panel cannot be driven.
    fn render(&self, frame: &DisplayFrame) -> Result<(), HandlerError>;
}

/// One line of text at a vertical offset, in pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Offset from the top of the panel.
    pub y: u16,
    /// Text to draw at the left edge.
    pub text: String,
}

/// Lays a frame out top to bottom, skipping blank fields.
///
/// The interface address takes 14 pixels, the GPS and SNTP rows 12 each, and
/// the `Actual Time:` caption 10 before the time value itself.
#[must_use]
pub fn layout(ipv4: Option<Ipv4Addr>, frame: &DisplayFrame) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut y = 0_u16;
    let mut push = |text: String, advance: u16| {
        lines.push(TextLine { y, text });
        y += advance;
    };
    if let Some(address) = ipv4 {
        push(format!("IPv4: {address}"), 14);
    }
    if !frame.gps.is_empty() {
        push(format!("From GPS: {}", frame.gps), 12);
    }
    if !frame.ntp.is_empty() {
        push(format!("From SNTP: {}", frame.ntp), 12);
    }
    if !frame.time.is_empty() {
        push(String::from("Actual Time:"), 10);
        push(frame.time.clone(), 0);
    }
    lines
}

/// [`DisplayRenderer`] that pipes the laid-out lines to a panel driver.
///
/// The driver is invoked as `<program> --bus <n> --address <0xNN>` and reads
/// one `<y>\t<text>` line per row from standard input.
pub struct OledPanel {
    runner: Arc<dyn CommandRunner>,
    program: Utf8PathBuf,
    bus: u8,
    address: I2cAddress,
    interface: String,
}

impl OledPanel {
    /// Builds a panel driven by `program` on the given bus and address,
    /// showing the IPv4 address of `interface`.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        program: impl Into<Utf8PathBuf>,
        bus: u8,
        address: I2cAddress,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            bus,
            address,
            interface: interface.into(),
        }
    }
}

impl DisplayRenderer for OledPanel {
    fn render(&self, frame: &DisplayFrame) -> Result<(), HandlerError> {
        let ipv4 = interface_ipv4(&self.interface)?;
        let script: String = layout(ipv4, frame)
            .iter()
            .map(|line| format!("{}\t{}\n", line.y, line.text.replace(['\n', '\t'], " ")))
            .collect();
        let invocation = Invocation::new(self.program.as_str())
            .args([
                String::from("--bus"),
                self.bus.to_string(),
                String::from("--address"),
                self.address.to_string(),
            ])
            .stdin(script);
        self.runner
            .run_checked(&invocation)
            .inspect_err(|error| {
                if is_missing_program(error) {
                    warn!(
                        target: HANDLER_TARGET,
                        program = %self.program,
                        "display driver not installed; set HOSTCTL_DISPLAY_PROGRAM"
                    );
                }
            })?;
        Ok(())
    }
}

fn is_missing_program(error: &HandlerError) -> bool {
    matches!(error, HandlerError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
}

/// First IPv4 address bound to `name`, if any.
fn interface_ipv4(name: &str) -> Result<Option<Ipv4Addr>, HandlerError> {
    let addresses = getifaddrs().map_err(|source| HandlerError::Interface {
        name: name.to_owned(),
        source,
    })?;
    Ok(addresses
        .filter(|entry| entry.interface_name == name)
        .find_map(|entry| {
            entry
                .address
                .as_ref()
                .and_then(|address| address.as_sockaddr_in().map(|sin| Ipv4Addr::from(sin.ip())))
        }))
}
