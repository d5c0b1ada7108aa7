//! Desktop simulator for the mpu-rs polling driver.
//!
//! Runs the polling application from `mpu-core` against an emulated MPU-6050
//! so the driver can be exercised without hardware. Readings are logged at
//! `info` level.
//!
//! # Environment
//!
//! A `.env` file in the working directory is loaded first.
//!
//! | Variable           | Default | Meaning                                   |
//! |--------------------|---------|-------------------------------------------|
//! | `MPU_ADDRESS`      | `0x68`  | Bus address of the device                 |
//! | `MPU_INTERVAL_MS`  | `1000`  | Milliseconds between polls                |
//! | `MPU_GYRO_FS_SEL`  | `0`     | Gyro full-scale select preset (0..=3)     |
//! | `MPU_ACCEL_FS_SEL` | `0`     | Accel full-scale select preset (0..=3)    |
//! | `MPU_READ_FAULTS`  | `0`     | Fail every n-th bus read, 0 disables      |
//! | `MPU_CYCLES`       | unset   | Stop after this many polls                |

mod simulated;

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use mpu_core::{AccelRange, GyroRange, Poller, PollerConfig};

use crate::simulated::SimulatedMpu6050;

/// Parse a decimal or `0x`-prefixed hexadecimal number.
fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Read a numeric variable, falling back to `default` when it is unset or
/// does not parse.
fn env_number(name: &str, default: u32) -> u32 {
    match std::env::var(name) {
        Ok(text) => parse_number(&text).unwrap_or_else(|| {
            warn!("Ignoring {}={:?}: not a number", name, text);
            default
        }),
        Err(_) => default,
    }
}

fn config_from_env() -> PollerConfig {
    let defaults = PollerConfig::default();
    let address = env_number("MPU_ADDRESS", defaults.address as u32);
    let address = u8::try_from(address).unwrap_or_else(|_| {
        warn!("MPU_ADDRESS {:#x} does not fit a byte, using default", address);
        defaults.address
    });
    PollerConfig {
        address,
        interval_ms: env_number("MPU_INTERVAL_MS", defaults.interval_ms),
    }
}

fn ranges_from_env() -> (GyroRange, AccelRange) {
    let gyro_select = env_number("MPU_GYRO_FS_SEL", 0);
    let accel_select = env_number("MPU_ACCEL_FS_SEL", 0);
    let gyro = u8::try_from(gyro_select)
        .ok()
        .and_then(|code| GyroRange::from_select(code).ok())
        .unwrap_or_else(|| {
            warn!("MPU_GYRO_FS_SEL {} out of range, using ±250 deg/s", gyro_select);
            GyroRange::default()
        });
    let accel = u8::try_from(accel_select)
        .ok()
        .and_then(|code| AccelRange::from_select(code).ok())
        .unwrap_or_else(|| {
            warn!("MPU_ACCEL_FS_SEL {} out of range, using ±2 g", accel_select);
            AccelRange::default()
        });
    (gyro, accel)
}

fn main() {
    let dotenv = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match dotenv {
        Ok(path) => debug!("Loaded {}", path.display()),
        Err(e) => debug!("No .env loaded: {}", e),
    }

    info!("Starting mpu-rs simulator");

    let config = config_from_env();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return;
    }
    let (gyro, accel) = ranges_from_env();
    let cycles = std::env::var("MPU_CYCLES")
        .ok()
        .and_then(|text| parse_number(&text));

    let device = SimulatedMpu6050::new(config.address)
        .with_ranges(gyro, accel)
        .with_read_faults(env_number("MPU_READ_FAULTS", 0));

    // Nothing is scheduled unless the device comes up
    let mut poller = match Poller::start(device, config) {
        Ok(poller) => poller,
        Err(e) => {
            error!("MPU6050 initialization failed: {}", e);
            return;
        }
    };

    let interval = Duration::from_millis(poller.interval_ms() as u64);
    let mut completed = 0u32;

    loop {
        let cycle_start = Instant::now();

        if let Some(device) = poller.driver_mut().bus_mut() {
            device.advance(interval.as_secs_f64());
        }

        let snapshot = poller.poll();
        if !snapshot.is_complete() {
            warn!("Cycle {} finished with missing readings", completed);
        }

        completed += 1;
        if cycles.is_some_and(|max| completed >= max) {
            break;
        }

        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }

    info!("Simulator exiting after {} cycles", completed);
}
