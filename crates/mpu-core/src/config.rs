use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::registers::DEFAULT_ADDRESS;

/// Default interval between two polls, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Upper bound of an encoded [`PollerConfig`]: one byte of address plus a
/// varint `u32`.
pub const CONFIG_MAX_ENCODED_LEN: usize = 6;

/// Settings for the polling application.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// 7-bit bus address of the sensor.
    pub address: u8,
    /// Milliseconds between two polls.
    pub interval_ms: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config: {0}")]
    Encode(postcard::Error),
    #[error("failed to decode config: {0}")]
    Decode(postcard::Error),
    #[error("address {0:#04x} is not a 7-bit bus address")]
    InvalidAddress(u8),
}

impl PollerConfig {
    /// Reject settings that can never reach a device.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress(self.address));
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix.
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(ConfigError::Encode)
    }

    /// Deserialize and validate a config written by [`PollerConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(ConfigError::Decode)?;
        config.validate()?;
        Ok(config)
    }
}
