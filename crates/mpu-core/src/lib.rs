//! Hardware-independent core library for mpu-rs
//!
//! This crate contains the platform-agnostic driver for the MPU-6050 6-axis
//! inertial sensor: register map, register bus capability, full-scale range
//! discovery, sample decoding and the polling helper used by applications.
//!
//! It is `#![no_std]` so it compiles on both embedded targets and desktop
//! hosts (for the simulator and tests). Any blocking
//! [`embedded_hal::i2c::I2c`] implementation can be used as the bus.

#![no_std]

pub mod bus;
pub mod config;
pub mod driver;
pub mod error;
pub mod poller;
pub mod range;
pub mod registers;
pub mod sample;

pub use bus::RegisterBus;
pub use config::{ConfigError, PollerConfig};
pub use driver::{DeviceHandle, SensorDriver};
pub use error::Error;
pub use poller::{Poller, Snapshot};
pub use range::{AccelRange, GyroRange};
pub use sample::{AccelSample, GyroSample, SensorReadings, TemperatureSample};
