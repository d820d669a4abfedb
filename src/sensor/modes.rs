use crate::sensor::{
    table::RegisterTable,
    tables,
    types::MediaBusCode,
};

/// Largest aspect ratio mismatch accepted by the matcher, in percent.
pub const MAX_RATIO_MISMATCH: u64 = 10;

const SCALE: u64 = 8192;

/// A statically enumerated sensor mode.
#[derive(Debug)]
pub struct SensorMode {
    pub width: u32,
    pub height: u32,
    pub code: MediaBusCode,
    pub fps: u32,
    /// Line length the mode table programs.
    pub line_length_pck: u16,
    /// Frame length the mode table programs.
    pub frame_length_lines: u16,
    /// Default coarse integration time in lines.
    pub coarse_integration_time: u16,
    pub table: &'static RegisterTable<'static>,
}

impl SensorMode {
    pub const fn hblank(&self) -> u32 {
        self.line_length_pck as u32 - self.width
    }

    pub const fn vblank(&self) -> u32 {
        self.frame_length_lines as u32 - self.height
    }
}

/// Supported modes in ascending size. The last entry is the fallback.
pub static MODES: [SensorMode; 4] = [
    SensorMode {
        width: 1280,
        height: 720,
        code: MediaBusCode::SRGGB10_1X10,
        fps: 60,
        line_length_pck: 0x1230,
        frame_length_lines: 0x0626,
        coarse_integration_time: 0x05E8,
        table: &tables::MODE_1280X720_60,
    },
    SensorMode {
        width: 1920,
        height: 1080,
        code: MediaBusCode::SRGGB10_1X10,
        fps: 30,
        line_length_pck: 0x1230,
        frame_length_lines: 0x0C4E,
        coarse_integration_time: 0x0C2E,
        table: &tables::MODE_1920X1080_30,
    },
    SensorMode {
        width: 3840,
        height: 2160,
        code: MediaBusCode::SRGGB10_1X10,
        fps: 30,
        line_length_pck: 0x1230,
        frame_length_lines: 0x0C4E,
        coarse_integration_time: 0x0C2E,
        table: &tables::MODE_3840X2160_30,
    },
    SensorMode {
        width: 4208,
        height: 3120,
        code: MediaBusCode::SRGGB10_1X10,
        fps: 30,
        line_length_pck: 0x1240,
        frame_length_lines: 0x0C4E,
        coarse_integration_time: 0x0C2E,
        table: &tables::MODE_4208X3120_30,
    },
];

/// Index of the mode closest to `width` x `height`.
///
/// Only modes at least as large as the request in both dimensions and
/// within [`MAX_RATIO_MISMATCH`] of its aspect ratio qualify. Among those the
/// smallest distance wins; ties keep the earlier mode. Returns `None` for a
/// zero dimension or when nothing qualifies.
pub fn match_resolution(modes: &[SensorMode], width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }

    let w1 = u64::from(width);
    let h1 = u64::from(height);
    let mut best: Option<(usize, u64)> = None;

    for (idx, mode) in modes.iter().enumerate() {
        let w0 = u64::from(mode.width);
        let h0 = u64::from(mode.height);
        if w0 < w1 || h0 < h1 {
            continue;
        }

        let mismatch = (w0 * h1).abs_diff(w1 * h0) * SCALE / (w1 * h0);
        if mismatch > SCALE * MAX_RATIO_MISMATCH / 100 {
            continue;
        }

        let distance = (w0 * h1 + w1 * h0) * SCALE / (w1 * h0);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((idx, distance));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Mode index for a format request, falling back to the largest mode.
pub fn negotiate(modes: &[SensorMode], width: u32, height: u32) -> usize {
    let last = modes.len().saturating_sub(1);
    let Some(largest) = modes.last() else {
        return 0;
    };

    if width > largest.width || height > largest.height {
        return last;
    }
    match_resolution(modes, width, height).unwrap_or(last)
}
