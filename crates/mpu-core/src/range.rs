//! Full-scale ranges and the scale factors derived from them

use crate::registers::SAMPLE_FULL_SCALE;

/// Gyroscope full-scale range (FS_SEL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroRange {
    /// ±250 °/s (power-on default)
    #[default]
    Dps250,
    /// ±500 °/s
    Dps500,
    /// ±1000 °/s
    Dps1000,
    /// ±2000 °/s
    Dps2000,
}

impl GyroRange {
    /// Decode a 2-bit FS_SEL code. Codes above 3 are returned as the error.
    pub const fn from_select(code: u8) -> Result<Self, u8> {
        match code {
            0 => Ok(Self::Dps250),
            1 => Ok(Self::Dps500),
            2 => Ok(Self::Dps1000),
            3 => Ok(Self::Dps2000),
            other => Err(other),
        }
    }

    pub const fn select(self) -> u8 {
        match self {
            Self::Dps250 => 0,
            Self::Dps500 => 1,
            Self::Dps1000 => 2,
            Self::Dps2000 => 3,
        }
    }

    /// Full-scale range in degrees per second.
    pub const fn full_scale(self) -> f32 {
        match self {
            Self::Dps250 => 250.0,
            Self::Dps500 => 500.0,
            Self::Dps1000 => 1000.0,
            Self::Dps2000 => 2000.0,
        }
    }

    /// Degrees per second per raw LSB.
    pub fn scale(self) -> f32 {
        self.full_scale() / SAMPLE_FULL_SCALE
    }
}

/// Accelerometer full-scale range (AFS_SEL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelRange {
    /// ±2 g (power-on default)
    #[default]
    G2,
    /// ±4 g
    G4,
    /// ±8 g
    G8,
    /// ±16 g
    G16,
}

impl AccelRange {
    /// Decode a 2-bit AFS_SEL code. Codes above 3 are returned as the error.
    pub const fn from_select(code: u8) -> Result<Self, u8> {
        match code {
            0 => Ok(Self::G2),
            1 => Ok(Self::G4),
            2 => Ok(Self::G8),
            3 => Ok(Self::G16),
            other => Err(other),
        }
    }

    pub const fn select(self) -> u8 {
        match self {
            Self::G2 => 0,
            Self::G4 => 1,
            Self::G8 => 2,
            Self::G16 => 3,
        }
    }

    /// Full-scale range in g.
    pub const fn full_scale(self) -> f32 {
        match self {
            Self::G2 => 2.0,
            Self::G4 => 4.0,
            Self::G8 => 8.0,
            Self::G16 => 16.0,
        }
    }

    /// g per raw LSB.
    pub fn scale(self) -> f32 {
        self.full_scale() / SAMPLE_FULL_SCALE
    }
}
