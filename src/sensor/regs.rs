//! Register addresses and fixed register values.

pub const CHIP_ID: u16 = 0x0000;
pub const REVISION_ID: u16 = 0x0003;
pub const COARSE_INTEGRATION_TIME: u16 = 0x0202;
pub const PLL_BASE: u16 = 0x0300;
pub const SOFTWARE_RESET: u16 = 0x0103;
pub const DATA_FORMAT: u16 = 0x0112;
pub const FRAME_LENGTH_LINES: u16 = 0x0340;
pub const LINE_LENGTH_PCK: u16 = 0x0342;
pub const X_ADDR_START: u16 = 0x0344;
pub const TEST_PATTERN_MODE: u16 = 0x0600;
/// Aliases `COARSE_INTEGRATION_TIME` in the manufacturer register space.
pub const EXPOSURE: u16 = 0x3012;
pub const ANALOGUE_GAIN: u16 = 0x3028;
pub const RESET: u16 = 0x301A;
pub const READ_MODE: u16 = 0x3040;
/// Green1, blue, red, green2 in that order.
pub const COLOR_GAIN_BASE: u16 = 0x3056;
pub const GLOBAL_GAIN: u16 = 0x305E;
pub const HISPI_TEST_MODE: u16 = 0x3066;
pub const SERIAL_FORMAT: u16 = 0x31AE;
pub const HISPI_CONTROL_STATUS: u16 = 0x31C6;
pub const DEFECT_CORRECTION: u16 = 0x31E0;

pub const CHIP_ID_VALUE: u16 = 0x0153;
pub const REVISION_ID_VALUE: u16 = 0x060A;
pub const SOFTWARE_RESET_VALUE: u16 = 0x0100;

pub const READ_MODE_HFLIP: u16 = 1 << 14;
pub const READ_MODE_VFLIP: u16 = 1 << 15;

pub const SERIAL_FORMAT_MIPI: u16 = 0x0200;
pub const HISPI_TEST_MODE_LP11: u16 = 0x0004;

/// Global gain written ahead of the stop-stream table.
pub const SAFE_GLOBAL_GAIN: u16 = 0x2000;

/// Value written to `TEST_PATTERN_MODE` per menu index.
pub const TEST_PATTERNS: [u16; 6] = [0x0000, 0x0001, 0x0002, 0x0003, 0x0100, 0x0101];

/// `SERIAL_FORMAT` for a MIPI link of `lanes` lanes.
pub const fn serial_format(lanes: u8) -> u16 {
    SERIAL_FORMAT_MIPI | lanes as u16
}

/// `HISPI_TEST_MODE` enabling LP-11 on every active lane.
pub const fn hispi_test_mode(lanes: u8) -> u16 {
    ((0x40u16 << lanes) - 0x40) | HISPI_TEST_MODE_LP11
}

/// `DATA_FORMAT` for compressed and uncompressed bit depth `bpp`.
pub const fn data_format(bpp: u8) -> u16 {
    ((bpp as u16) << 8) | bpp as u16
}
