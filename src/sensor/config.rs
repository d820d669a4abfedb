use crate::sensor::{
    bus::DEFAULT_ADDRESS,
    error::SensorError,
    pll::{EXTCLK_MAX_HZ, EXTCLK_MIN_HZ},
};

/// Board-level configuration of one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    /// External clock frequency in Hz.
    pub extclk_hz: u32,
    /// Active MIPI data lanes.
    pub lanes: u8,
    /// 7-bit I2C address.
    pub address: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            extclk_hz: 24_000_000,
            lanes: 4,
            address: DEFAULT_ADDRESS,
        }
    }
}

impl SensorConfig {
    pub fn new(extclk_hz: u32, lanes: u8) -> Self {
        Self {
            extclk_hz,
            lanes,
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn validate<E>(&self) -> Result<(), SensorError<E>> {
        if !(EXTCLK_MIN_HZ..=EXTCLK_MAX_HZ).contains(&self.extclk_hz) {
            return Err(SensorError::ExtclkOutOfRange(self.extclk_hz));
        }
        if !matches!(self.lanes, 1 | 2 | 4) {
            return Err(SensorError::UnsupportedLaneCount(self.lanes));
        }
        Ok(())
    }
}
