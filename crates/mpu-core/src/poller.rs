//! Periodic polling helper
//!
//! Wraps a [`SensorDriver`] with the settings of the polling application.
//! The caller owns the schedule: call [`Poller::poll`] once per
//! [`Poller::interval_ms`] from a timer, task or loop.

use log::{info, warn};

use crate::bus::RegisterBus;
use crate::config::PollerConfig;
use crate::driver::SensorDriver;
use crate::error::Error;
use crate::sample::{AccelSample, GyroSample, SensorReadings, TemperatureSample};

/// Number of values in a flattened [`Snapshot`].
pub const SNAPSHOT_VALUES: usize = 7;

/// Positions of each reading in [`Snapshot::values`].
pub mod indices {
    pub const ACCEL_X: usize = 0;
    pub const ACCEL_Y: usize = 1;
    pub const ACCEL_Z: usize = 2;
    pub const GYRO_X: usize = 3;
    pub const GYRO_Y: usize = 4;
    pub const GYRO_Z: usize = 5;
    pub const TEMPERATURE: usize = 6;
}

pub use indices::*;

/// Result of one poll. A slot is `None` when its read failed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Snapshot {
    pub accel: Option<AccelSample>,
    pub gyro: Option<GyroSample>,
    pub temperature: Option<TemperatureSample>,
}

impl Snapshot {
    /// Flatten into milli-units (milli-g, milli-deg/s, milli-Celsius) at the
    /// positions given by [`indices`].
    pub fn values(&self) -> [Option<i32>; SNAPSHOT_VALUES] {
        let mut values = [None; SNAPSHOT_VALUES];
        if let Some(accel) = self.accel {
            for (slot, value) in values[ACCEL_X..=ACCEL_Z].iter_mut().zip(accel.to_array()) {
                *slot = Some(value);
            }
        }
        if let Some(gyro) = self.gyro {
            for (slot, value) in values[GYRO_X..=GYRO_Z].iter_mut().zip(gyro.to_array()) {
                *slot = Some(value);
            }
        }
        if let Some(temperature) = self.temperature {
            let [milli_celsius] = temperature.to_array();
            values[TEMPERATURE] = Some(milli_celsius);
        }
        values
    }

    /// True when every read of the poll succeeded.
    pub fn is_complete(&self) -> bool {
        self.accel.is_some() && self.gyro.is_some() && self.temperature.is_some()
    }
}

pub struct Poller<B> {
    driver: SensorDriver<B>,
    config: PollerConfig,
}

impl<B: RegisterBus> Poller<B> {
    /// Initialize the device named by `config`. No poller is created if that
    /// fails, so nothing gets scheduled for a missing device.
    pub fn start(bus: B, config: PollerConfig) -> Result<Self, Error<B::Error>> {
        let mut driver = SensorDriver::new(bus);
        driver.initialize(config.address)?;
        info!(
            "Polling MPU6050 at {:#04x} every {} ms",
            config.address, config.interval_ms
        );
        Ok(Self { driver, config })
    }

    /// Run one polling cycle.
    ///
    /// The three reads are independent: a failed read is logged and leaves
    /// its slot empty while the others still run.
    pub fn poll(&mut self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        match self.driver.read_acceleration() {
            Ok(accel) => {
                let [x, y, z] = accel.to_g();
                info!(
                    "{:>20} - x={:5}, y={:5}, z={:5}",
                    "raw accel", accel.x, accel.y, accel.z
                );
                info!(
                    "{:>20} - x={:5.2}, y={:5.2}, z={:5.2}",
                    "scaled accel (g)", x, y, z
                );
                snapshot.accel = Some(accel);
            }
            Err(e) => warn!("Skipping accel this cycle: {}", e),
        }

        match self.driver.read_angular_rate() {
            Ok(gyro) => {
                let [x, y, z] = gyro.to_dps();
                info!(
                    "{:>20} - x={:5}, y={:5}, z={:5}",
                    "raw gyro", gyro.x, gyro.y, gyro.z
                );
                info!(
                    "{:>20} - x={:5.2}, y={:5.2}, z={:5.2}",
                    "scaled gyro (deg/s)", x, y, z
                );
                snapshot.gyro = Some(gyro);
            }
            Err(e) => warn!("Skipping gyro this cycle: {}", e),
        }

        match self.driver.read_temperature() {
            Ok(temperature) => {
                info!("temperature={:.2}", temperature.celsius);
                snapshot.temperature = Some(temperature);
            }
            Err(e) => warn!("Skipping temperature this cycle: {}", e),
        }

        snapshot
    }
}

impl<B> Poller<B> {
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn interval_ms(&self) -> u32 {
        self.config.interval_ms
    }

    pub fn driver(&self) -> &SensorDriver<B> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut SensorDriver<B> {
        &mut self.driver
    }

    /// Stop polling and hand back the driver.
    pub fn into_driver(self) -> SensorDriver<B> {
        self.driver
    }
}
