use crate::sensor::{controls::ControlId, power::Supply};

/// Errors raised while building or playing a register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// Table storage holds no end marker.
    MissingEnd,
    /// Override list capacity exceeded.
    OverridesFull,
    /// Burst does not fit the transfer buffer.
    BurstTooLong,
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::MissingEnd => write!(f, "register table has no end marker"),
            TableError::OverridesFull => write!(f, "override list capacity exceeded"),
            TableError::BurstTooLong => write!(f, "register burst exceeds transfer buffer"),
        }
    }
}

/// Errors that can occur while driving the sensor.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError<E> {
    /// The I2C transaction failed.
    Bus(E),
    /// The reset line could not be driven.
    ResetPin,
    /// A supply refused to switch on.
    Supply(Supply),
    /// An identification register returned an unexpected value.
    ChipIdMismatch {
        register: u16,
        expected: u16,
        found: u16,
    },
    /// External clock outside the supported input range.
    ExtclkOutOfRange(u32),
    /// MIPI lane count other than 1, 2 or 4.
    UnsupportedLaneCount(u8),
    /// No divider/multiplier pair reaches the requested frequency.
    NoPllSolution { extclk_hz: u32, target_hz: u32 },
    /// Media bus code is not produced by the sensor.
    UnsupportedFormat(u32),
    /// Register table construction or playback failed.
    Table(TableError),
    /// Control value outside its range.
    ControlOutOfRange { id: ControlId, value: i32 },
    /// Control can only be read.
    ReadOnlyControl(ControlId),
    /// Operation needs a powered sensor.
    NotPowered,
    /// Active format cannot change while streaming.
    Busy,
}

impl<E> From<TableError> for SensorError<E> {
    fn from(err: TableError) -> Self {
        SensorError::Table(err)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for SensorError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SensorError::Bus(err) => write!(f, "i2c transaction failed: {err:?}"),
            SensorError::ResetPin => write!(f, "reset line could not be driven"),
            SensorError::Supply(supply) => write!(f, "{supply:?} supply failed to enable"),
            SensorError::ChipIdMismatch {
                register,
                expected,
                found,
            } => write!(
                f,
                "chip id mismatch at {register:#06x}: expected {expected:#06x}, found {found:#06x}"
            ),
            SensorError::ExtclkOutOfRange(hz) => write!(f, "external clock {hz} Hz out of range"),
            SensorError::UnsupportedLaneCount(lanes) => {
                write!(f, "unsupported MIPI lane count {lanes}")
            }
            SensorError::NoPllSolution {
                extclk_hz,
                target_hz,
            } => write!(
                f,
                "no PLL configuration reaches {target_hz} Hz from {extclk_hz} Hz"
            ),
            SensorError::UnsupportedFormat(code) => {
                write!(f, "unsupported media bus code {code:#06x}")
            }
            SensorError::Table(err) => write!(f, "register table: {err}"),
            SensorError::ControlOutOfRange { id, value } => {
                write!(f, "value {value} out of range for {id:?}")
            }
            SensorError::ReadOnlyControl(id) => write!(f, "control {id:?} is read-only"),
            SensorError::NotPowered => write!(f, "sensor is not powered"),
            SensorError::Busy => write!(f, "sensor is streaming"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn display_chip_id_mismatch_shows_hex_values() {
        let err: SensorError<()> = SensorError::ChipIdMismatch {
            register: 0x0000,
            expected: 0x0153,
            found: 0x0001,
        };
        assert_eq!(
            format!("{err}"),
            "chip id mismatch at 0x0000: expected 0x0153, found 0x0001"
        );
    }

    #[test]
    fn table_error_converts_into_sensor_error() {
        let err: SensorError<()> = TableError::MissingEnd.into();
        assert_eq!(err, SensorError::Table(TableError::MissingEnd));
    }
}
