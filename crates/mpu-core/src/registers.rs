//! MPU-6050 register map
//!
//! Offsets and field layouts follow the MPU-6000/MPU-6050 Register Map
//! (revision 4.2). Only the registers the driver touches are listed.

/// Factory default 7-bit bus address (AD0 pulled low).
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// PWR_MGMT_1 value: CLKSEL=1, PLL with X axis gyroscope reference.
/// Also clears the SLEEP bit.
pub const CLOCK_PLL_XGYRO: u8 = 0x01;

/// FS_SEL / AFS_SEL field in GYRO_CONFIG and ACCEL_CONFIG.
///
/// ```text
/// Bit7  | Bit6  | Bit5  | Bit4 | Bit3 | Bit2 | Bit1 | Bit0
/// XG_ST | YG_ST | ZG_ST | FS_SEL[1:0] |  -   |  -   |  -
/// ```
pub const FULL_SCALE_SELECT: BitField = BitField::new(4, 2);

pub const ACCEL_OUT_LEN: usize = 6;
pub const TEMP_OUT_LEN: usize = 2;
pub const GYRO_OUT_LEN: usize = 6;

/// Raw-to-full-scale denominator of a signed 16-bit sample (2^15).
pub const SAMPLE_FULL_SCALE: f32 = 32768.0;

/// TEMP_OUT sensitivity in LSB per degree Celsius.
pub const TEMP_SENSITIVITY: f32 = 340.0;
/// Temperature offset in degrees Celsius at a raw reading of zero.
pub const TEMP_OFFSET_CELSIUS: f32 = 36.53;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    GyroConfig = 0x1B,
    AccelConfig = 0x1C,
    AccelOut = 0x3B,
    TempOut = 0x41,
    GyroOut = 0x43,
    PwrMgmt1 = 0x6B,
    PwrMgmt2 = 0x6C,
    WhoAmI = 0x75,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Datasheet name, used in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GyroConfig => "GYRO_CONFIG",
            Self::AccelConfig => "ACCEL_CONFIG",
            Self::AccelOut => "ACCEL_OUT",
            Self::TempOut => "TEMP_OUT",
            Self::GyroOut => "GYRO_OUT",
            Self::PwrMgmt1 => "PWR_MGMT_1",
            Self::PwrMgmt2 => "PWR_MGMT_2",
            Self::WhoAmI => "WHO_AM_I",
        }
    }
}

/// A contiguous run of bits inside a single register byte.
///
/// `high_bit` is the most significant bit of the field (0..=7) and `width`
/// the number of bits, so `BitField::new(4, 2)` covers bits 4 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    high_bit: u8,
    width: u8,
}

impl BitField {
    pub const fn new(high_bit: u8, width: u8) -> Self {
        Self { high_bit, width }
    }

    pub const fn high_bit(self) -> u8 {
        self.high_bit
    }

    pub const fn width(self) -> u8 {
        self.width
    }

    /// Position of the least significant bit of the field.
    pub const fn shift(self) -> u8 {
        self.high_bit + 1 - self.width
    }

    /// Right-aligned mask covering `width` bits.
    pub const fn mask(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Extract the field from a raw register value.
    pub const fn extract(self, value: u8) -> u8 {
        (value >> self.shift()) & self.mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_select_covers_bits_4_and_3() {
        assert_eq!(FULL_SCALE_SELECT.shift(), 3);
        assert_eq!(FULL_SCALE_SELECT.mask(), 0b11);
        assert_eq!(FULL_SCALE_SELECT.extract(0b0001_1000), 3);
        assert_eq!(FULL_SCALE_SELECT.extract(0b0000_1000), 1);
        // Self-test bits and the low nibble are ignored
        assert_eq!(FULL_SCALE_SELECT.extract(0b1110_0111), 0);
        assert_eq!(FULL_SCALE_SELECT.extract(0b1111_0111), 2);
    }

    #[test]
    fn test_full_width_field() {
        let whole = BitField::new(7, 8);
        assert_eq!(whole.shift(), 0);
        assert_eq!(whole.mask(), 0xFF);
        assert_eq!(whole.extract(0xA5), 0xA5);
    }

    #[test]
    fn test_register_offsets() {
        assert_eq!(Register::GyroConfig.addr(), 0x1B);
        assert_eq!(Register::AccelConfig.addr(), 0x1C);
        assert_eq!(Register::AccelOut.addr(), 0x3B);
        assert_eq!(Register::TempOut.addr(), 0x41);
        assert_eq!(Register::GyroOut.addr(), 0x43);
        assert_eq!(Register::PwrMgmt1.addr(), 0x6B);
        assert_eq!(Register::PwrMgmt2.addr(), 0x6C);
        assert_eq!(Register::WhoAmI.addr(), 0x75);
    }
}
