use core::marker::PhantomData;

use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::I2c};

use crate::sensor::{
    config::SensorConfig,
    device::Ar1335,
    error::SensorError,
    power::{NoPower, PowerControl},
};

// Builder states
pub struct NeedBus;
pub struct NeedDelay;
pub struct NeedResetPin;
pub struct NeedPower;
pub struct Ready;

/// Collects the hardware handles of an [`Ar1335`].
///
/// Each handle is supplied exactly once, in order; `build` is only
/// available once all of them are present.
pub struct Ar1335Builder<I2C, D, RST, P, State> {
    config: SensorConfig,
    i2c: I2C,
    delay: D,
    reset: RST,
    power: P,
    _state: PhantomData<State>,
}

// Start the builder
impl Ar1335Builder<(), (), (), (), NeedBus> {
    pub fn new(config: SensorConfig) -> Self {
        Ar1335Builder {
            config,
            i2c: (),
            delay: (),
            reset: (),
            power: (),
            _state: PhantomData,
        }
    }
}

// Set bus
impl Ar1335Builder<(), (), (), (), NeedBus> {
    pub fn bus<I2C: I2c>(self, i2c: I2C) -> Ar1335Builder<I2C, (), (), (), NeedDelay> {
        Ar1335Builder {
            config: self.config,
            i2c,
            delay: (),
            reset: (),
            power: (),
            _state: PhantomData,
        }
    }
}

// Set delay
impl<I2C: I2c> Ar1335Builder<I2C, (), (), (), NeedDelay> {
    pub fn delay<D: DelayNs>(self, delay: D) -> Ar1335Builder<I2C, D, (), (), NeedResetPin> {
        Ar1335Builder {
            config: self.config,
            i2c: self.i2c,
            delay,
            reset: (),
            power: (),
            _state: PhantomData,
        }
    }
}

// Set reset pin
impl<I2C: I2c, D: DelayNs> Ar1335Builder<I2C, D, (), (), NeedResetPin> {
    /// Active-low reset line.
    pub fn reset_pin<RST: OutputPin>(self, reset: RST) -> Ar1335Builder<I2C, D, RST, (), NeedPower> {
        Ar1335Builder {
            config: self.config,
            i2c: self.i2c,
            delay: self.delay,
            reset,
            power: (),
            _state: PhantomData,
        }
    }
}

// Set power control
impl<I2C: I2c, D: DelayNs, RST: OutputPin> Ar1335Builder<I2C, D, RST, (), NeedPower> {
    pub fn power<P: PowerControl>(self, power: P) -> Ar1335Builder<I2C, D, RST, P, Ready> {
        Ar1335Builder {
            config: self.config,
            i2c: self.i2c,
            delay: self.delay,
            reset: self.reset,
            power,
            _state: PhantomData,
        }
    }

    /// Supplies are switched outside this driver.
    pub fn no_power(self) -> Ar1335Builder<I2C, D, RST, NoPower, Ready> {
        self.power(NoPower)
    }
}

// Build
impl<I2C, D, RST, P> Ar1335Builder<I2C, D, RST, P, Ready>
where
    I2C: I2c,
    D: DelayNs,
    RST: OutputPin,
    P: PowerControl,
{
    /// Validates the configuration and creates the unpowered driver.
    pub fn build(self) -> Result<Ar1335<I2C, D, RST, P>, SensorError<I2C::Error>> {
        Ar1335::new(self.config, self.i2c, self.delay, self.reset, self.power)
    }
}
