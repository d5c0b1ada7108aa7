//! Emulated MPU-6050 register file
//!
//! Answers on one 7-bit address through the blocking `embedded_hal::i2c::I2c`
//! trait, so the real driver code runs against it unchanged. Output registers
//! are filled from a synthetic motion model that moves forward with
//! [`SimulatedMpu6050::advance`].

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use mpu_core::registers::{
    FULL_SCALE_SELECT, Register, TEMP_OFFSET_CELSIUS, TEMP_SENSITIVITY,
};
use mpu_core::{AccelRange, GyroRange};

const REGISTER_COUNT: usize = 128;

/// PWR_MGMT_1 SLEEP bit, set at power on.
const SLEEP_BIT: u8 = 0x40;

pub struct SimulatedMpu6050 {
    address: u8,
    registers: [u8; REGISTER_COUNT],
    pointer: usize,
    /// Monotonic seconds driving the motion model.
    elapsed_secs: f64,
    /// Fail every n-th read transfer with a bus error, 0 disables.
    fail_every: u32,
    reads: u32,
}

impl SimulatedMpu6050 {
    /// A device in its power-on state: asleep, ±250 °/s, ±2 g.
    pub fn new(address: u8) -> Self {
        let mut registers = [0u8; REGISTER_COUNT];
        registers[Register::WhoAmI.addr() as usize] = address;
        registers[Register::PwrMgmt1.addr() as usize] = SLEEP_BIT;
        Self {
            address,
            registers,
            pointer: 0,
            elapsed_secs: 0.0,
            fail_every: 0,
            reads: 0,
        }
    }

    /// Preset the full-scale selects, as firmware on the device would.
    pub fn with_ranges(mut self, gyro: GyroRange, accel: AccelRange) -> Self {
        let shift = FULL_SCALE_SELECT.shift();
        self.registers[Register::GyroConfig.addr() as usize] = gyro.select() << shift;
        self.registers[Register::AccelConfig.addr() as usize] = accel.select() << shift;
        self
    }

    /// Make every `n`-th read transfer fail, to exercise transient bus errors.
    pub fn with_read_faults(mut self, n: u32) -> Self {
        self.fail_every = n;
        self
    }

    pub fn register(&self, register: Register) -> u8 {
        self.registers[register.addr() as usize]
    }

    pub fn is_awake(&self) -> bool {
        self.register(Register::PwrMgmt1) & SLEEP_BIT == 0
    }

    /// Move the motion model forward and latch new output values.
    pub fn advance(&mut self, dt_secs: f64) {
        self.elapsed_secs += dt_secs;
        self.refresh_outputs();
    }

    fn gyro_range(&self) -> GyroRange {
        let select = FULL_SCALE_SELECT.extract(self.register(Register::GyroConfig));
        GyroRange::from_select(select).unwrap_or_default()
    }

    fn accel_range(&self) -> AccelRange {
        let select = FULL_SCALE_SELECT.extract(self.register(Register::AccelConfig));
        AccelRange::from_select(select).unwrap_or_default()
    }

    fn refresh_outputs(&mut self) {
        // A sleeping device keeps its outputs frozen
        if !self.is_awake() {
            return;
        }
        let t = self.elapsed_secs;

        // Resting on a table with a slow wobble: ~1 g on z
        let accel_g = [
            0.1 * (t / 2.0).sin(),
            0.1 * (t / 3.0).cos(),
            1.0 + 0.02 * t.sin(),
        ];
        let gyro_dps = [
            20.0 * (t / 1.5).sin(),
            10.0 * (t / 2.5).cos(),
            5.0 * (t / 4.0).sin(),
        ];
        let celsius = 24.0 + 1.5 * (t / 60.0).sin();

        let accel_scale = self.accel_range().scale() as f64;
        let gyro_scale = self.gyro_range().scale() as f64;

        let mut offset = Register::AccelOut.addr() as usize;
        for g in accel_g {
            self.store_word(offset, to_raw(g / accel_scale));
            offset += 2;
        }

        let temp_raw = (celsius - TEMP_OFFSET_CELSIUS as f64) * TEMP_SENSITIVITY as f64;
        self.store_word(Register::TempOut.addr() as usize, to_raw(temp_raw));

        let mut offset = Register::GyroOut.addr() as usize;
        for dps in gyro_dps {
            self.store_word(offset, to_raw(dps / gyro_scale));
            offset += 2;
        }
    }

    fn store_word(&mut self, offset: usize, value: i16) {
        self.registers[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    }

    fn write_register(&mut self, offset: usize, value: u8) {
        // WHO_AM_I and the output registers are read-only
        let read_only = offset == Register::WhoAmI.addr() as usize
            || (Register::AccelOut.addr() as usize..Register::GyroOut.addr() as usize + 6)
                .contains(&offset);
        if read_only {
            return;
        }

        let was_awake = self.is_awake();
        self.registers[offset] = value;
        if !was_awake && self.is_awake() {
            self.refresh_outputs();
        }
    }
}

fn to_raw(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

impl ErrorType for SimulatedMpu6050 {
    type Error = ErrorKind;
}

impl I2c for SimulatedMpu6050 {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let Some((&register, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = register as usize % REGISTER_COUNT;
                    for &value in data {
                        self.write_register(self.pointer, value);
                        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
                    }
                }
                Operation::Read(buf) => {
                    self.reads += 1;
                    if self.fail_every != 0 && self.reads % self.fail_every == 0 {
                        return Err(ErrorKind::Bus);
                    }
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer];
                        self.pointer = (self.pointer + 1) % REGISTER_COUNT;
                    }
                }
            }
        }
        Ok(())
    }
}
