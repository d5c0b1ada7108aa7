#![allow(dead_code)]

pub use mpu_core::SensorDriver;

use embedded_hal_mock as hal;
pub use hal::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

pub const DEV_ADDR: u8 = 0x68;

pub const WHO_AM_I: u8 = 0x75;
pub const PWR_MGMT_1: u8 = 0x6B;
pub const GYRO_CONFIG: u8 = 0x1B;
pub const ACCEL_CONFIG: u8 = 0x1C;
pub const ACCEL_OUT: u8 = 0x3B;
pub const TEMP_OUT: u8 = 0x41;
pub const GYRO_OUT: u8 = 0x43;

pub fn trans_who_am_i(addr: u8, reported: u8) -> I2cTrans {
    I2cTrans::write_read(addr, vec![WHO_AM_I], vec![reported])
}

pub fn trans_wake(addr: u8) -> I2cTrans {
    I2cTrans::write(addr, vec![PWR_MGMT_1, 0x01])
}

/// GYRO_CONFIG read with FS_SEL set to `code`. Self-test and reserved bits
/// are set too, so the driver has to mask them off.
pub fn trans_gyro_config(addr: u8, code: u8) -> I2cTrans {
    I2cTrans::write_read(addr, vec![GYRO_CONFIG], vec![0b1110_0111 | (code << 3)])
}

/// ACCEL_CONFIG read with AFS_SEL set to `code`.
pub fn trans_accel_config(addr: u8, code: u8) -> I2cTrans {
    I2cTrans::write_read(addr, vec![ACCEL_CONFIG], vec![0b1110_0111 | (code << 3)])
}

/// The full transaction script of a successful `initialize`.
pub fn init_sequence(addr: u8, gyro_code: u8, accel_code: u8) -> Vec<I2cTrans> {
    vec![
        trans_who_am_i(addr, addr),
        trans_wake(addr),
        trans_gyro_config(addr, gyro_code),
        trans_accel_config(addr, accel_code),
    ]
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() < tolerance,
        "{} is not within {} of {}",
        actual,
        tolerance,
        expected
    );
}
