//! Seven-bit I2C device addresses written in hexadecimal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// I2C device address, accepted as `0x3C` or `3C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// Wraps a raw address value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw address value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for I2cAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:#04x}", self.0)
    }
}

impl FromStr for I2cAddress {
    type Err = I2cAddressParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(I2cAddressParseError::Empty);
        }
        u8::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| I2cAddressParseError::Invalid(input.to_owned()))
    }
}

impl TryFrom<String> for I2cAddress {
    type Error = I2cAddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<I2cAddress> for String {
    fn from(value: I2cAddress) -> Self {
        value.to_string()
    }
}

/// Errors raised while parsing an [`I2cAddress`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum I2cAddressParseError {
    /// No hexadecimal digits were supplied.
    #[error("I2C address is empty")]
    Empty,
    /// The digits were not a hexadecimal byte.
    #[error("invalid I2C address '{0}'; expected a hexadecimal byte such as 0x3C")]
    Invalid(String),
}
