//! Register-addressed bus capability
//!
//! The driver never talks to a bus peripheral directly. It goes through
//! [`RegisterBus`], which any blocking [`embedded_hal::i2c::I2c`] implements
//! out of the box. Hosts with an unusual transport can implement the trait
//! themselves.

use embedded_hal::i2c::I2c;

use crate::registers::{BitField, Register};
use crate::sample::decode_be_i16;

/// Single-register and block access to a device on a shared two-wire bus.
///
/// Every method is one blocking bus transaction. Timeouts and retries, if
/// any, belong to the implementation.
pub trait RegisterBus {
    type Error: core::fmt::Debug;

    /// Read one register byte.
    fn read_register(&mut self, address: u8, register: Register) -> Result<u8, Self::Error>;

    /// Write one register byte.
    fn write_register(
        &mut self,
        address: u8,
        register: Register,
        value: u8,
    ) -> Result<(), Self::Error>;

    /// Read `buf.len()` consecutive registers starting at `register`.
    fn read_block(
        &mut self,
        address: u8,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read a signed 16-bit word transmitted most significant byte first.
    fn read_word(&mut self, address: u8, register: Register) -> Result<i16, Self::Error> {
        let mut buf = [0u8; 2];
        self.read_block(address, register, &mut buf)?;
        Ok(decode_be_i16(buf))
    }

    /// Read a bit-field out of one register, right-aligned.
    fn read_bits(
        &mut self,
        address: u8,
        register: Register,
        field: BitField,
    ) -> Result<u8, Self::Error> {
        let value = self.read_register(address, register)?;
        Ok(field.extract(value))
    }
}

impl<I: I2c> RegisterBus for I {
    type Error = I::Error;

    #[inline]
    fn read_register(&mut self, address: u8, register: Register) -> Result<u8, Self::Error> {
        let mut buf = [0u8];
        self.write_read(address, &[register.addr()], &mut buf)?;
        Ok(buf[0])
    }

    #[inline]
    fn write_register(
        &mut self,
        address: u8,
        register: Register,
        value: u8,
    ) -> Result<(), Self::Error> {
        self.write(address, &[register.addr(), value])
    }

    #[inline]
    fn read_block(
        &mut self,
        address: u8,
        register: Register,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.write_read(address, &[register.addr()], buf)
    }
}
