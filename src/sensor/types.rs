/// Media bus pixel code, numbered as in the V4L2 `MEDIA_BUS_FMT_*` space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaBusCode(pub u32);

impl MediaBusCode {
    pub const SRGGB8_1X8: Self = Self(0x3014);
    pub const SRGGB10_1X10: Self = Self(0x300f);

    /// Codes the sensor produces, in enumeration order.
    pub const SUPPORTED: [Self; 2] = [Self::SRGGB10_1X10, Self::SRGGB8_1X8];

    /// Bits per pixel, or `None` for codes the sensor cannot output.
    pub const fn bits_per_pixel(self) -> Option<u8> {
        match self.0 {
            0x3014 => Some(8),
            0x300f => Some(10),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    #[default]
    None,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colorspace {
    #[default]
    Srgb,
    Raw,
}

/// Active image format on the source pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub width: u32,
    pub height: u32,
    pub code: MediaBusCode,
    pub field: FieldOrder,
    pub colorspace: Colorspace,
}

impl Format {
    pub const fn new(width: u32, height: u32, code: MediaBusCode) -> Self {
        Self {
            width,
            height,
            code,
            field: FieldOrder::None,
            colorspace: Colorspace::Srgb,
        }
    }
}

/// Which format slot a negotiation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    /// Negotiate only; device state is untouched.
    Try,
    /// Negotiate and make the result active.
    Active,
}

/// Frame interval as a fraction of a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInterval {
    pub numerator: u32,
    pub denominator: u32,
}

impl FrameInterval {
    pub const FPS_30: Self = Self::from_fps(30);
    pub const FPS_60: Self = Self::from_fps(60);

    pub const fn from_fps(fps: u32) -> Self {
        Self {
            numerator: 1,
            denominator: fps,
        }
    }

    /// Whole frames per second, `0` for a degenerate interval.
    pub const fn fps(&self) -> u32 {
        if self.numerator == 0 {
            0
        } else {
            self.denominator / self.numerator
        }
    }
}

/// Frame size enumeration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}
