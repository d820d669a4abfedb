//! Test support utilities - only compiled in test builds.

use core::cell::RefCell;
use std::{collections::BTreeMap, rc::Rc, vec::Vec};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    i2c::{self, ErrorKind, I2c, Operation},
};

use crate::sensor::{
    builder::Ar1335Builder,
    bus::{DEFAULT_ADDRESS, RegisterBus},
    config::SensorConfig,
    device::Ar1335,
    power::{PowerControl, Supply},
    regs,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

impl i2c::Error for FakeBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct FakeState {
    regs: BTreeMap<u16, u16>,
    writes: Vec<(u16, u16)>,
    messages: Vec<(u16, usize)>,
    fail_on: Option<u16>,
}

/// Register file behind an I2C interface with address auto-increment.
///
/// Clones share state, so a test can keep one handle while the driver owns
/// another.
#[derive(Clone, Default)]
pub struct FakeSensor {
    state: Rc<RefCell<FakeState>>,
}

impl FakeSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensor answering with the expected identification values.
    pub fn ar1335() -> Self {
        let sensor = Self::new();
        sensor.set_register(regs::CHIP_ID, regs::CHIP_ID_VALUE);
        sensor.set_register(regs::REVISION_ID, regs::REVISION_ID_VALUE);
        sensor
    }

    pub fn set_register(&self, reg: u16, value: u16) {
        self.state.borrow_mut().regs.insert(reg, value);
    }

    pub fn register(&self, reg: u16) -> Option<u16> {
        self.state.borrow().regs.get(&reg).copied()
    }

    /// Every register write in order, bursts expanded.
    pub fn writes(&self) -> Vec<(u16, u16)> {
        self.state.borrow().writes.clone()
    }

    /// Start register and word count of every write message.
    pub fn messages(&self) -> Vec<(u16, usize)> {
        self.state.borrow().messages.clone()
    }

    /// Position of the first write of `value` to `reg`.
    pub fn position(&self, reg: u16, value: u16) -> Option<usize> {
        self.state
            .borrow()
            .writes
            .iter()
            .position(|w| *w == (reg, value))
    }

    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.writes.clear();
        state.messages.clear();
    }

    /// Makes every write touching `reg` fail.
    pub fn fail_on_write(&self, reg: u16) {
        self.state.borrow_mut().fail_on = Some(reg);
    }

    pub fn clear_failure(&self) {
        self.state.borrow_mut().fail_on = None;
    }
}

impl i2c::ErrorType for FakeSensor {
    type Error = FakeBusError;
}

impl I2c for FakeSensor {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        let mut pointer = 0u16;

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let mut words = bytes
                        .chunks(2)
                        .map(|c| u16::from_be_bytes([c[0], *c.get(1).unwrap_or(&0)]));
                    let Some(base) = words.next() else {
                        continue;
                    };
                    let values: Vec<u16> = words.collect();
                    let touched = base..base.wrapping_add(2 * values.len() as u16);
                    if state
                        .fail_on
                        .is_some_and(|reg| !values.is_empty() && touched.contains(&reg))
                    {
                        return Err(FakeBusError);
                    }

                    pointer = base;
                    if !values.is_empty() {
                        state.messages.push((base, values.len()));
                    }
                    for value in values {
                        state.regs.insert(pointer, value);
                        state.writes.push((pointer, value));
                        pointer = pointer.wrapping_add(2);
                    }
                }
                Operation::Read(buf) => {
                    for chunk in buf.chunks_mut(2) {
                        let value = state.regs.get(&pointer).copied().unwrap_or(0);
                        let bytes = value.to_be_bytes();
                        chunk.copy_from_slice(&bytes[..chunk.len()]);
                        pointer = pointer.wrapping_add(2);
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn fake_bus(sensor: &FakeSensor) -> RegisterBus<FakeSensor> {
    RegisterBus::new(sensor.clone(), DEFAULT_ADDRESS)
}

/// Delay that records requested waits instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingDelay {
    waits_ms: Rc<RefCell<Vec<u32>>>,
    waits_us: Rc<RefCell<Vec<u32>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waits_ms(&self) -> Vec<u32> {
        self.waits_ms.borrow().clone()
    }

    pub fn waits_us(&self) -> Vec<u32> {
        self.waits_us.borrow().clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.borrow_mut().push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.borrow_mut().push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.borrow_mut().push(ms);
    }
}

/// Output pin recording every level it is driven to.
#[derive(Clone, Default)]
pub struct FakePin {
    levels: Rc<RefCell<Vec<bool>>>,
}

impl FakePin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }
}

impl digital::ErrorType for FakePin {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

/// Power control recording enable/disable calls.
#[derive(Clone, Default)]
pub struct FakePower {
    events: Rc<RefCell<Vec<(Supply, bool)>>>,
    failing: Option<Supply>,
}

impl FakePower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(supply: Supply) -> Self {
        Self {
            failing: Some(supply),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<(Supply, bool)> {
        self.events.borrow().clone()
    }
}

impl PowerControl for FakePower {
    fn enable(&mut self, supply: Supply) -> bool {
        if self.failing == Some(supply) {
            return false;
        }
        self.events.borrow_mut().push((supply, true));
        true
    }

    fn disable(&mut self, supply: Supply) {
        self.events.borrow_mut().push((supply, false));
    }
}

pub type TestDevice = Ar1335<FakeSensor, RecordingDelay, FakePin, FakePower>;

/// Handles kept by a test while the driver owns the other clones.
pub struct Fixture {
    pub sensor: FakeSensor,
    pub delay: RecordingDelay,
    pub reset: FakePin,
    pub power: FakePower,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_sensor(FakeSensor::ar1335())
    }

    pub fn with_sensor(sensor: FakeSensor) -> Self {
        Self {
            sensor,
            delay: RecordingDelay::new(),
            reset: FakePin::new(),
            power: FakePower::new(),
        }
    }

    pub fn device(&self) -> TestDevice {
        self.device_with(SensorConfig::default())
    }

    pub fn device_with(&self, config: SensorConfig) -> TestDevice {
        Ar1335Builder::new(config)
            .bus(self.sensor.clone())
            .delay(self.delay.clone())
            .reset_pin(self.reset.clone())
            .power(self.power.clone())
            .build()
            .unwrap()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Powered device with the write log cleared.
pub fn powered_device(fixture: &Fixture) -> TestDevice {
    let mut device = fixture.device();
    device.power_on().unwrap();
    fixture.sensor.clear_log();
    device
}
