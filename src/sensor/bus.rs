use embedded_hal::i2c::I2c;
use heapless::Vec;
use log::trace;

use crate::sensor::error::{SensorError, TableError};

/// Default 7-bit I2C address of the sensor.
pub const DEFAULT_ADDRESS: u8 = 0x36;

/// Longest register burst, in 16-bit words.
pub const MAX_BURST_WORDS: usize = 16;

const BURST_BYTES: usize = 2 + 2 * MAX_BURST_WORDS;

/// 16-bit big-endian register access over I2C.
///
/// Every write carries the register address followed by the value. Bursts
/// are sent as one message and rely on the sensor auto-incrementing the
/// address by two after every word.
pub struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RegisterBus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn write_reg(&mut self, reg: u16, value: u16) -> Result<(), SensorError<I2C::Error>> {
        trace!("ar1335: write {reg:#06x} = {value:#06x}");
        let [rh, rl] = reg.to_be_bytes();
        let [vh, vl] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[rh, rl, vh, vl])
            .map_err(SensorError::Bus)
    }

    pub fn read_reg(&mut self, reg: u16) -> Result<u16, SensorError<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &reg.to_be_bytes(), &mut buf)
            .map_err(SensorError::Bus)?;
        let value = u16::from_be_bytes(buf);
        trace!("ar1335: read {reg:#06x} = {value:#06x}");
        Ok(value)
    }

    /// Writes `values` to consecutive registers starting at `base`.
    pub fn write_burst(&mut self, base: u16, values: &[u16]) -> Result<(), SensorError<I2C::Error>> {
        if values.len() > MAX_BURST_WORDS {
            return Err(TableError::BurstTooLong.into());
        }

        let mut buf: Vec<u8, BURST_BYTES> = Vec::new();
        for word in core::iter::once(&base).chain(values) {
            buf.extend_from_slice(&word.to_be_bytes())
                .map_err(|_| SensorError::Table(TableError::BurstTooLong))?;
        }

        trace!("ar1335: burst {base:#06x} x{}", values.len());
        self.i2c
            .write(self.address, &buf)
            .map_err(SensorError::Bus)
    }

    /// Read-modify-write of the bits in `mask`.
    pub fn update_bits(
        &mut self,
        reg: u16,
        mask: u16,
        set: bool,
    ) -> Result<(), SensorError<I2C::Error>> {
        let current = self.read_reg(reg)?;
        let value = if set { current | mask } else { current & !mask };
        self.write_reg(reg, value)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}
