mod common;

use common::*;
use embedded_hal::i2c::ErrorKind;
use mpu_core::poller::{ACCEL_X, GYRO_X, GYRO_Z, TEMPERATURE};
use mpu_core::{Error, Poller, PollerConfig};

fn config() -> PollerConfig {
    PollerConfig {
        address: DEV_ADDR,
        interval_ms: 20,
    }
}

#[test]
fn start_initializes_device() {
    let expectations = init_sequence(DEV_ADDR, 1, 2);
    let poller = Poller::start(I2cMock::new(&expectations), config()).unwrap();

    assert_eq!(poller.interval_ms(), 20);
    assert_eq!(poller.config(), &config());
    let device = poller.driver().device().unwrap();
    assert_eq!(device.angular_scale(), 500.0 / 32768.0);

    poller.into_driver().release().unwrap().done();
}

#[test]
fn start_fails_for_missing_device() {
    let expectations = [trans_who_am_i(DEV_ADDR, 0x00)];
    let mut i2c = I2cMock::new(&expectations);

    let result = Poller::start(i2c.clone(), config());

    assert!(matches!(
        result,
        Err(Error::IdentityMismatch {
            reported: 0x00,
            expected: DEV_ADDR
        })
    ));
    drop(result);
    i2c.done();
}

#[test]
fn poll_reads_every_sensor() {
    let mut expectations = init_sequence(DEV_ADDR, 0, 0);
    expectations.push(I2cTrans::write_read(
        DEV_ADDR,
        vec![ACCEL_OUT],
        vec![0x40, 0x00, 0x00, 0x00, 0x00, 0x00],
    ));
    expectations.push(I2cTrans::write_read(
        DEV_ADDR,
        vec![GYRO_OUT],
        vec![0x00, 0x83, 0x00, 0x00, 0xFF, 0x7D],
    ));
    expectations.push(I2cTrans::write_read(DEV_ADDR, vec![TEMP_OUT], vec![0x00, 0x00]));
    let mut poller = Poller::start(I2cMock::new(&expectations), config()).unwrap();

    let snapshot = poller.poll();

    assert!(snapshot.is_complete());
    let values = snapshot.values();
    assert_eq!(values[ACCEL_X], Some(1000));
    // 131 LSB is 1 deg/s at ±250 deg/s, give or take rounding
    assert!((998..=1000).contains(&values[GYRO_X].unwrap()));
    assert!((-1000..=-998).contains(&values[GYRO_Z].unwrap()));
    assert!(values[TEMPERATURE].is_some());

    poller.into_driver().release().unwrap().done();
}

#[test]
fn poll_continues_past_a_failed_read() {
    let mut expectations = init_sequence(DEV_ADDR, 0, 0);
    expectations.push(I2cTrans::write_read(DEV_ADDR, vec![ACCEL_OUT], vec![0; 6]));
    expectations.push(
        I2cTrans::write_read(DEV_ADDR, vec![GYRO_OUT], vec![0; 6]).with_error(ErrorKind::Other),
    );
    expectations.push(I2cTrans::write_read(DEV_ADDR, vec![TEMP_OUT], vec![0x01, 0x54]));
    let mut poller = Poller::start(I2cMock::new(&expectations), config()).unwrap();

    let snapshot = poller.poll();

    assert!(!snapshot.is_complete());
    assert!(snapshot.accel.is_some());
    assert!(snapshot.gyro.is_none());
    assert_close(snapshot.temperature.unwrap().celsius, 37.53, 1e-4);
    assert_eq!(snapshot.values()[GYRO_X], None);

    poller.into_driver().release().unwrap().done();
}
