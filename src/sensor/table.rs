use embedded_hal::{delay::DelayNs, i2c::I2c};
use heapless::Vec;

use crate::sensor::{
    bus::RegisterBus,
    error::{SensorError, TableError},
};

/// Address of the pseudo-entry that sleeps for `value` milliseconds.
pub const TABLE_WAIT: u16 = 0x0000;
/// Address of the pseudo-entry that terminates a table.
pub const TABLE_END: u16 = 0x0001;
/// Settle time used by the manufacturer tables.
pub const WAIT_MS: u16 = 100;

/// One `(address, value)` pair of a register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterEntry {
    pub address: u16,
    pub value: u16,
}

impl RegisterEntry {
    pub const END: Self = Self::new(TABLE_END, 0);

    pub const fn new(address: u16, value: u16) -> Self {
        Self { address, value }
    }

    pub const fn wait(ms: u16) -> Self {
        Self::new(TABLE_WAIT, ms)
    }

    pub const fn is_wait(&self) -> bool {
        self.address == TABLE_WAIT
    }

    pub const fn is_end(&self) -> bool {
        self.address == TABLE_END
    }
}

/// An ordered register table terminated by [`RegisterEntry::END`].
///
/// The end marker is found by address, so entries stored after it are never
/// played.
#[derive(Debug, Clone, Copy)]
pub struct RegisterTable<'a> {
    entries: &'a [RegisterEntry],
}

impl<'a> RegisterTable<'a> {
    /// Wraps static table storage.
    ///
    /// # Panics
    /// Panics if `entries` holds no end marker. In a `static` initializer
    /// this is a compile error.
    pub const fn new(entries: &'a [RegisterEntry]) -> Self {
        assert!(has_end(entries), "register table has no end marker");
        Self { entries }
    }

    /// Wraps table storage built at runtime.
    pub fn try_new(entries: &'a [RegisterEntry]) -> Result<Self, TableError> {
        if has_end(entries) {
            Ok(Self { entries })
        } else {
            Err(TableError::MissingEnd)
        }
    }

    /// Entries up to, not including, the end marker.
    pub fn iter(&self) -> impl Iterator<Item = &'a RegisterEntry> + 'a {
        self.entries.iter().take_while(|entry| !entry.is_end())
    }

    /// Number of register writes, excluding waits.
    pub fn write_count(&self) -> usize {
        self.iter().filter(|entry| !entry.is_wait()).count()
    }

    /// Last value the table writes to `address`.
    pub fn value_of(&self, address: u16) -> Option<u16> {
        self.iter()
            .filter(|entry| !entry.is_wait() && entry.address == address)
            .last()
            .map(|entry| entry.value)
    }
}

const fn has_end(entries: &[RegisterEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        if entries[i].is_end() {
            return true;
        }
        i += 1;
    }
    false
}

/// Per-address replacement values consulted during playback.
///
/// Duplicate addresses are kept; the first one pushed wins.
#[derive(Debug, Default)]
pub struct OverrideList<const N: usize> {
    entries: Vec<RegisterEntry, N>,
}

impl<const N: usize> OverrideList<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, address: u16, value: u16) -> Result<(), TableError> {
        self.entries
            .push(RegisterEntry::new(address, value))
            .map_err(|_| TableError::OverridesFull)
    }

    pub fn lookup(&self, address: u16) -> Option<u16> {
        self.entries
            .iter()
            .find(|entry| entry.address == address)
            .map(|entry| entry.value)
    }

    pub fn as_slice(&self) -> &[RegisterEntry] {
        &self.entries
    }
}

/// Plays `table` in order.
///
/// Wait entries block for their value in milliseconds. Other entries are
/// written with the first matching override, if any. The first failed write
/// aborts playback; registers already written stay written.
pub fn apply<I2C, D>(
    bus: &mut RegisterBus<I2C>,
    delay: &mut D,
    table: &RegisterTable<'_>,
    overrides: Option<&[RegisterEntry]>,
) -> Result<(), SensorError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    for entry in table.iter() {
        if entry.is_wait() {
            delay.delay_ms(u32::from(entry.value));
            continue;
        }

        let value = overrides
            .and_then(|list| list.iter().find(|o| o.address == entry.address))
            .map_or(entry.value, |o| o.value);

        bus.write_reg(entry.address, value)?;
    }
    Ok(())
}

/// Declares a static [`RegisterTable`] with the end marker appended.
///
/// The entries are stored in a sibling static array named `<NAME>_ENTRIES`
/// whose length is fixed at compile time.
macro_rules! register_table {
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident = [$(($addr:expr, $value:expr)),* $(,)?];
    ) => {
        paste::paste! {
            $vis static [<$name _ENTRIES>]: [
                $crate::sensor::table::RegisterEntry;
                <[&str]>::len(&[$(stringify!($addr)),*]) + 1
            ] = [
                $($crate::sensor::table::RegisterEntry::new($addr, $value),)*
                $crate::sensor::table::RegisterEntry::END,
            ];

            $(#[$meta])*
            $vis static $name: $crate::sensor::table::RegisterTable<'static> =
                $crate::sensor::table::RegisterTable::new(&[<$name _ENTRIES>]);
        }
    };
}

pub(crate) use register_table;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::test_support::{FakeSensor, RecordingDelay, fake_bus};
    use std::vec;

    register_table! {
        static SHORT = [
            (0x3F3C, 0x0003),
            (TABLE_WAIT, 5),
            (0x301A, 0x023C),
        ];
    }

    static EARLY_END: [RegisterEntry; 4] = [
        RegisterEntry::new(0x3000, 0x0001),
        RegisterEntry::END,
        RegisterEntry::new(0x3002, 0x0002),
        RegisterEntry::END,
    ];

    static UNTERMINATED: [RegisterEntry; 2] = [
        RegisterEntry::new(0x3000, 0x0001),
        RegisterEntry::new(0x3002, 0x0002),
    ];

    #[test]
    fn macro_appends_end_marker() {
        assert_eq!(SHORT_ENTRIES.len(), 4);
        assert_eq!(SHORT_ENTRIES[3], RegisterEntry::END);
        assert_eq!(SHORT.write_count(), 2);
    }

    #[test]
    fn unterminated_storage_is_rejected() {
        assert_eq!(
            RegisterTable::try_new(&UNTERMINATED).unwrap_err(),
            TableError::MissingEnd
        );
    }

    #[test]
    fn iteration_stops_at_end_marker_not_storage_end() {
        let table = RegisterTable::try_new(&EARLY_END).unwrap();
        let addresses: std::vec::Vec<u16> = table.iter().map(|e| e.address).collect();
        assert_eq!(addresses, vec![0x3000]);
    }

    #[test]
    fn apply_writes_in_order_and_waits() {
        let sensor = FakeSensor::new();
        let mut bus = fake_bus(&sensor);
        let mut delay = RecordingDelay::new();

        apply(&mut bus, &mut delay, &SHORT, None).unwrap();

        assert_eq!(sensor.writes(), vec![(0x3F3C, 0x0003), (0x301A, 0x023C)]);
        assert_eq!(delay.waits_ms(), vec![5]);
    }

    #[test]
    fn first_matching_override_wins() {
        let sensor = FakeSensor::new();
        let mut bus = fake_bus(&sensor);
        let mut delay = RecordingDelay::new();
        let mut overrides = OverrideList::<4>::new();
        overrides.push(0x301A, 0x0210).unwrap();
        overrides.push(0x301A, 0xFFFF).unwrap();

        apply(&mut bus, &mut delay, &SHORT, Some(overrides.as_slice())).unwrap();

        assert_eq!(sensor.writes(), vec![(0x3F3C, 0x0003), (0x301A, 0x0210)]);
    }

    #[test]
    fn override_list_capacity_is_enforced() {
        let mut overrides = OverrideList::<1>::new();
        overrides.push(0x0202, 1).unwrap();
        assert_eq!(overrides.push(0x0342, 2), Err(TableError::OverridesFull));
        assert_eq!(overrides.lookup(0x0202), Some(1));
        assert_eq!(overrides.lookup(0x0342), None);
    }

    #[test]
    fn failed_write_aborts_without_rollback() {
        let sensor = FakeSensor::new();
        sensor.fail_on_write(0x301A);
        let mut bus = fake_bus(&sensor);
        let mut delay = RecordingDelay::new();

        let result = apply(&mut bus, &mut delay, &SHORT, None);

        assert!(matches!(result, Err(SensorError::Bus(_))));
        assert_eq!(sensor.writes(), vec![(0x3F3C, 0x0003)]);
        assert_eq!(sensor.register(0x3F3C), Some(0x0003));
    }

    #[test]
    fn applied_registers_read_back() {
        let sensor = FakeSensor::new();
        let mut bus = fake_bus(&sensor);
        let mut delay = RecordingDelay::new();

        apply(&mut bus, &mut delay, &SHORT, None).unwrap();

        for entry in SHORT.iter().filter(|e| !e.is_wait()) {
            assert_eq!(bus.read_reg(entry.address).unwrap(), entry.value);
        }
    }

    #[test]
    fn value_of_returns_last_write() {
        assert_eq!(SHORT.value_of(0x301A), Some(0x023C));
        assert_eq!(SHORT.value_of(0x0000), None);
    }
}
