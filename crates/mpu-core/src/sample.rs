//! Sample types returned by the driver
//!
//! The device transmits every 16-bit output word most significant byte
//! first. The decoders here compose words from bytes explicitly, so the
//! result is the same on any host byte order.

use crate::registers::{ACCEL_OUT_LEN, GYRO_OUT_LEN, TEMP_OFFSET_CELSIUS, TEMP_SENSITIVITY};

/// Compose a signed word from a big-endian byte pair.
#[inline]
pub const fn decode_be_i16(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Decode an x/y/z output block (ACCEL_OUT or GYRO_OUT).
pub const fn decode_axes(block: &[u8; 6]) -> [i16; 3] {
    [
        decode_be_i16([block[0], block[1]]),
        decode_be_i16([block[2], block[3]]),
        decode_be_i16([block[4], block[5]]),
    ]
}

/// Trait for sample data structures.
/// Provides compile-time guarantees about the number of values and their conversion to arrays.
pub trait SensorReadings<const COUNT: usize> {
    /// Convert the readings into a fixed-size array of milli-units.
    fn to_array(self) -> [i32; COUNT];
}

/// Raw accelerometer sample with the scale factor in effect when it was read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// g per raw LSB
    pub scale: f32,
}

impl AccelSample {
    pub const fn from_block(block: &[u8; ACCEL_OUT_LEN], scale: f32) -> Self {
        let [x, y, z] = decode_axes(block);
        Self { x, y, z, scale }
    }

    /// Acceleration in g for x, y and z.
    pub fn to_g(&self) -> [f32; 3] {
        [
            self.x as f32 * self.scale,
            self.y as f32 * self.scale,
            self.z as f32 * self.scale,
        ]
    }
}

impl SensorReadings<3> for AccelSample {
    fn to_array(self) -> [i32; 3] {
        self.to_g().map(|g| (g * 1000.0) as i32)
    }
}

/// Raw gyroscope sample with the scale factor in effect when it was read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GyroSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    /// degrees per second per raw LSB
    pub scale: f32,
}

impl GyroSample {
    pub const fn from_block(block: &[u8; GYRO_OUT_LEN], scale: f32) -> Self {
        let [x, y, z] = decode_axes(block);
        Self { x, y, z, scale }
    }

    /// Angular rate in degrees per second for x, y and z.
    pub fn to_dps(&self) -> [f32; 3] {
        [
            self.x as f32 * self.scale,
            self.y as f32 * self.scale,
            self.z as f32 * self.scale,
        ]
    }
}

impl SensorReadings<3> for GyroSample {
    fn to_array(self) -> [i32; 3] {
        self.to_dps().map(|dps| (dps * 1000.0) as i32)
    }
}

/// Die temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSample {
    pub celsius: f32,
}

impl TemperatureSample {
    /// Apply the datasheet calibration to a raw TEMP_OUT word.
    pub fn from_raw(raw: i16) -> Self {
        Self {
            celsius: raw as f32 / TEMP_SENSITIVITY + TEMP_OFFSET_CELSIUS,
        }
    }
}

impl SensorReadings<1> for TemperatureSample {
    fn to_array(self) -> [i32; 1] {
        [(self.celsius * 1000.0) as i32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_is_big_endian() {
        assert_eq!(decode_be_i16([0x01, 0x02]), 0x0102);
        assert_eq!(decode_be_i16([0x01, 0x02]), 258);
    }

    #[test]
    fn test_decode_negative_words() {
        assert_eq!(decode_be_i16([0xFF, 0xFF]), -1);
        assert_eq!(decode_be_i16([0x80, 0x00]), i16::MIN);
        assert_eq!(decode_be_i16([0x7F, 0xFF]), i16::MAX);
        assert_eq!(decode_be_i16([0xFE, 0xAC]), -340);
    }

    #[test]
    fn test_decode_axes_order() {
        let block = [0x00, 0x01, 0xFF, 0xFE, 0x40, 0x00];
        assert_eq!(decode_axes(&block), [1, -2, 16384]);
    }

    #[test]
    fn test_temperature_conversion() {
        let cases = [(0i16, 36.53f32), (340, 37.53), (-340, 35.53)];
        for (raw, expected) in cases {
            let sample = TemperatureSample::from_raw(raw);
            assert!(
                (sample.celsius - expected).abs() < 1e-4,
                "raw {} gave {} instead of {}",
                raw,
                sample.celsius,
                expected
            );
        }
    }

    #[test]
    fn test_accel_to_g() {
        // 16384 LSB is 1 g at ±2 g
        let block = [0x40, 0x00, 0xC0, 0x00, 0x00, 0x00];
        let sample = AccelSample::from_block(&block, 2.0 / 32768.0);
        assert_eq!(sample.to_g(), [1.0, -1.0, 0.0]);
        assert_eq!(sample.to_array(), [1000, -1000, 0]);
    }

    #[test]
    fn test_gyro_to_dps() {
        // 16384 LSB is 1000 °/s at ±2000 °/s
        let block = [0x40, 0x00, 0x00, 0x00, 0xE0, 0x00];
        let sample = GyroSample::from_block(&block, 2000.0 / 32768.0);
        assert_eq!(sample.to_dps(), [1000.0, 0.0, -500.0]);
        assert_eq!(sample.to_array(), [1_000_000, 0, -500_000]);
    }

    #[test]
    fn test_temperature_milli_celsius() {
        let sample = TemperatureSample { celsius: 25.5 };
        assert_eq!(sample.to_array(), [25_500]);
    }
}
