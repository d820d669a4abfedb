use crate::sensor::types::Format;

pub const NATIVE_WIDTH: u32 = 4240;
pub const NATIVE_HEIGHT: u32 = 3152;

pub const MIN_X_ADDR_START: u32 = 8;
pub const MIN_Y_ADDR_START: u32 = 8;
pub const MAX_X_ADDR_END: u32 = 4231;
pub const MAX_Y_ADDR_END: u32 = 3143;

pub const HBLANK_MIN: u32 = 240;
pub const VBLANK_MIN: u32 = 30;
/// Lines kept free between the end of exposure and the next frame.
pub const EXPOSURE_MARGIN: u32 = 4;

/// Crop window and frame timing programmed as one register burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryWindow {
    pub x_start: u16,
    pub y_start: u16,
    pub x_end: u16,
    pub y_end: u16,
    pub width: u16,
    pub height: u16,
    pub frame_length_lines: u16,
    pub line_length_pck: u16,
}

impl GeometryWindow {
    /// Values for the burst starting at the frame length register, in
    /// register order.
    pub fn burst(&self) -> [u16; 8] {
        [
            self.frame_length_lines,
            self.line_length_pck,
            self.x_start,
            self.y_start,
            self.x_end,
            self.y_end,
            self.width,
            self.height,
        ]
    }
}

/// Centers `format` in the pixel array.
///
/// The row start is forced even so the Bayer phase stays the same for every
/// mode.
pub fn compute_window(format: &Format, hblank: u32, vblank: u32) -> GeometryWindow {
    let width = format.width;
    let height = format.height;

    let x = (NATIVE_WIDTH.saturating_sub(width) / 2).clamp(MIN_X_ADDR_START, MAX_X_ADDR_END);
    let y = ((NATIVE_HEIGHT.saturating_sub(height) / 2) & !1)
        .clamp(MIN_Y_ADDR_START, MAX_Y_ADDR_END);

    GeometryWindow {
        x_start: word(x),
        y_start: word(y),
        x_end: word((x + width).saturating_sub(1)),
        y_end: word((y + height).saturating_sub(1)),
        width: word(width),
        height: word(height),
        frame_length_lines: word(height + vblank),
        line_length_pck: word(width + hblank),
    }
}

fn word(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::types::MediaBusCode;

    fn format(width: u32, height: u32) -> Format {
        Format::new(width, height, MediaBusCode::SRGGB10_1X10)
    }

    #[test]
    fn full_hd_is_centered() {
        let window = compute_window(&format(1920, 1080), 240, 142);

        assert_eq!(window.x_start, 1160);
        assert_eq!(window.y_start, 1036);
        assert_eq!(window.x_end, 1160 + 1919);
        assert_eq!(window.y_end, 1036 + 1079);
        assert_eq!(window.line_length_pck, 2160);
        assert_eq!(window.frame_length_lines, 1222);
    }

    #[test]
    fn row_start_is_even() {
        for height in [720, 1080, 2160, 3120, 1001, 1003] {
            let window = compute_window(&format(1280, height), 240, 30);
            assert_eq!(window.y_start % 2, 0, "height {height}");
        }
    }

    #[test]
    fn full_array_clamps_to_minimum_start() {
        let window = compute_window(&format(4240, 3152), 240, 30);
        assert_eq!(window.x_start, MIN_X_ADDR_START as u16);
        assert_eq!(window.y_start, MIN_Y_ADDR_START as u16);
    }

    #[test]
    fn largest_mode_stays_inside_array() {
        let window = compute_window(&format(4208, 3120), 464, 30);
        assert_eq!(window.x_start, 16);
        assert_eq!(window.y_start, 16);
        assert!(u32::from(window.x_end) <= MAX_X_ADDR_END);
        assert!(u32::from(window.y_end) <= MAX_Y_ADDR_END);
    }

    #[test]
    fn burst_follows_register_order() {
        let window = compute_window(&format(1920, 1080), 240, 142);
        assert_eq!(
            window.burst(),
            [1222, 2160, 1160, 1036, 3079, 2115, 1920, 1080]
        );
    }
}
