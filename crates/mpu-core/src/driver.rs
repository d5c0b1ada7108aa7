//! MPU-6050 sensor driver
//!
//! [`SensorDriver`] owns the bus transport and, once initialized, a
//! [`DeviceHandle`] describing the device it talks to. There is no global
//! state: each driver value stands for one physical device, and callers
//! thread it (usually `&mut`) into every read. All calls block on the bus.

use log::{error, info};

use crate::bus::RegisterBus;
use crate::error::Error;
use crate::range::{AccelRange, GyroRange};
use crate::registers::{
    ACCEL_OUT_LEN, CLOCK_PLL_XGYRO, FULL_SCALE_SELECT, GYRO_OUT_LEN, Register,
};
use crate::sample::{AccelSample, GyroSample, TemperatureSample};

/// Everything learned about the device during initialization.
///
/// Scale factors are fixed here and never recomputed; re-run
/// [`SensorDriver::initialize`] to pick up a changed range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceHandle {
    address: u8,
    gyro_range: GyroRange,
    accel_range: AccelRange,
    angular_scale: f32,
    linear_scale: f32,
}

impl DeviceHandle {
    fn new(address: u8, gyro_range: GyroRange, accel_range: AccelRange) -> Self {
        Self {
            address,
            gyro_range,
            accel_range,
            angular_scale: gyro_range.scale(),
            linear_scale: accel_range.scale(),
        }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn gyro_range(&self) -> GyroRange {
        self.gyro_range
    }

    pub const fn accel_range(&self) -> AccelRange {
        self.accel_range
    }

    /// Degrees per second per raw gyroscope LSB.
    pub const fn angular_scale(&self) -> f32 {
        self.angular_scale
    }

    /// g per raw accelerometer LSB.
    pub const fn linear_scale(&self) -> f32 {
        self.linear_scale
    }
}

pub struct SensorDriver<B> {
    bus: Option<B>,
    device: Option<DeviceHandle>,
}

impl<B> SensorDriver<B> {
    /// Create a driver on top of a bus transport.
    pub const fn new(bus: B) -> Self {
        Self {
            bus: Some(bus),
            device: None,
        }
    }

    /// Create a driver with no transport yet. `initialize` fails with
    /// [`Error::TransportUnavailable`] until one is attached.
    pub const fn unattached() -> Self {
        Self {
            bus: None,
            device: None,
        }
    }

    /// Attach a transport, returning the one it replaces.
    ///
    /// The device handle is kept; it describes the device, not the transport.
    pub fn attach(&mut self, bus: B) -> Option<B> {
        self.bus.replace(bus)
    }

    pub fn bus_mut(&mut self) -> Option<&mut B> {
        self.bus.as_mut()
    }

    /// The handle installed by the last successful `initialize`.
    pub fn device(&self) -> Option<&DeviceHandle> {
        self.device.as_ref()
    }

    /// Releases the underlying transport and destroys the driver.
    pub fn release(self) -> Option<B> {
        self.bus
    }
}

impl<B: RegisterBus> SensorDriver<B> {
    /// Bring the device at `address` up and discover its full-scale ranges.
    ///
    /// Steps run in order and the first failure is returned. On failure any
    /// previously installed handle is left as it was; on success it is
    /// replaced. The device's power state is changed by step 2 even if a
    /// later step fails.
    pub fn initialize(&mut self, address: u8) -> Result<DeviceHandle, Error<B::Error>> {
        let bus = self.bus.as_mut().ok_or_else(|| {
            error!("MPU6050: no bus transport available");
            Error::TransportUnavailable
        })?;

        // The WHO_AM_I register echoes the device's own bus address
        let reported = bus
            .read_register(address, Register::WhoAmI)
            .map_err(|e| {
                error!("MPU6050: {} read failed: {:?}", Register::WhoAmI.name(), e);
                Error::ReadFailed(e)
            })?;
        if reported != address {
            error!(
                "MPU6050: {}: {:#04x} != {:#04x}",
                Register::WhoAmI.name(),
                reported,
                address
            );
            return Err(Error::IdentityMismatch {
                reported,
                expected: address,
            });
        }

        bus.write_register(address, Register::PwrMgmt1, CLOCK_PLL_XGYRO)
            .map_err(|e| {
                error!("MPU6050: failed to wake device: {:?}", e);
                Error::WriteFailed(e)
            })?;

        let gyro_select = bus
            .read_bits(address, Register::GyroConfig, FULL_SCALE_SELECT)
            .map_err(|e| {
                error!("MPU6050: failed to read gyro scale: {:?}", e);
                Error::ReadFailed(e)
            })?;
        let accel_select = bus
            .read_bits(address, Register::AccelConfig, FULL_SCALE_SELECT)
            .map_err(|e| {
                error!("MPU6050: failed to read accel scale: {:?}", e);
                Error::ReadFailed(e)
            })?;

        let gyro_range = GyroRange::from_select(gyro_select).map_err(|code| {
            error!("MPU6050: gyro FS_SEL {} out of range", code);
            Error::InvalidScaleSelect(code)
        })?;
        let accel_range = AccelRange::from_select(accel_select).map_err(|code| {
            error!("MPU6050: accel AFS_SEL {} out of range", code);
            Error::InvalidScaleSelect(code)
        })?;

        let device = DeviceHandle::new(address, gyro_range, accel_range);
        info!(
            "MPU6050 at {:#04x}: gyro {:?} ({} deg/s per LSB), accel {:?} ({} g per LSB)",
            address, gyro_range, device.angular_scale, accel_range, device.linear_scale
        );

        self.device = Some(device);
        Ok(device)
    }

    /// Read the x/y/z accelerometer outputs in one block transfer.
    pub fn read_acceleration(&mut self) -> Result<AccelSample, Error<B::Error>> {
        let (bus, device) = self.session()?;
        let mut block = [0u8; ACCEL_OUT_LEN];
        bus.read_block(device.address, Register::AccelOut, &mut block)
            .map_err(|e| {
                error!("MPU6050: failed to read accel: {:?}", e);
                Error::ReadFailed(e)
            })?;
        Ok(AccelSample::from_block(&block, device.linear_scale))
    }

    /// Read the x/y/z gyroscope outputs in one block transfer.
    pub fn read_angular_rate(&mut self) -> Result<GyroSample, Error<B::Error>> {
        let (bus, device) = self.session()?;
        let mut block = [0u8; GYRO_OUT_LEN];
        bus.read_block(device.address, Register::GyroOut, &mut block)
            .map_err(|e| {
                error!("MPU6050: failed to read gyro: {:?}", e);
                Error::ReadFailed(e)
            })?;
        Ok(GyroSample::from_block(&block, device.angular_scale))
    }

    /// Read the die temperature in degrees Celsius.
    pub fn read_temperature(&mut self) -> Result<TemperatureSample, Error<B::Error>> {
        let (bus, device) = self.session()?;
        let raw = bus
            .read_word(device.address, Register::TempOut)
            .map_err(|e| {
                error!("MPU6050: failed to read temperature: {:?}", e);
                Error::ReadFailed(e)
            })?;
        Ok(TemperatureSample::from_raw(raw))
    }

    fn session(&mut self) -> Result<(&mut B, DeviceHandle), Error<B::Error>> {
        let device = self.device.ok_or(Error::NotInitialized)?;
        let bus = self.bus.as_mut().ok_or(Error::TransportUnavailable)?;
        Ok((bus, device))
    }
}

impl<B> Default for SensorDriver<B> {
    fn default() -> Self {
        Self::unattached()
    }
}
