use bitmaps::Bitmap;

use crate::sensor::error::SensorError;

pub const CONTROL_COUNT: usize = 16;

/// Controls exposed by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    AnalogueGain,
    /// Green gain; red and blue follow it with their balance offsets.
    Gain,
    RedBalance,
    BlueBalance,
    HBlank,
    VBlank,
    PixelRate,
    Exposure,
    LinkFreq,
    TestPattern,
    HFlip,
    VFlip,
    HdrMode,
    DefectCorrection,
    LineLengthPck,
    CoarseIntegrationTime,
}

impl ControlId {
    pub const ALL: [ControlId; CONTROL_COUNT] = [
        ControlId::AnalogueGain,
        ControlId::Gain,
        ControlId::RedBalance,
        ControlId::BlueBalance,
        ControlId::HBlank,
        ControlId::VBlank,
        ControlId::PixelRate,
        ControlId::Exposure,
        ControlId::LinkFreq,
        ControlId::TestPattern,
        ControlId::HFlip,
        ControlId::VFlip,
        ControlId::HdrMode,
        ControlId::DefectCorrection,
        ControlId::LineLengthPck,
        ControlId::CoarseIntegrationTime,
    ];

    fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Members of the colour gain cluster.
    pub const fn is_gain_cluster(self) -> bool {
        matches!(
            self,
            ControlId::Gain | ControlId::RedBalance | ControlId::BlueBalance
        )
    }

    const fn default_info(self) -> ControlInfo {
        match self {
            ControlId::AnalogueGain => ControlInfo::new(0, 0x7F, 0x10),
            ControlId::Gain => ControlInfo::new(0, GAIN_MAX, 0x80),
            ControlId::RedBalance | ControlId::BlueBalance => ControlInfo::new(-512, 511, 0),
            ControlId::HBlank => ControlInfo::new(240, 0xFFFF, 240),
            ControlId::VBlank => ControlInfo::new(30, 0xFFFF, 30),
            ControlId::PixelRate | ControlId::LinkFreq => ControlInfo::read_only(),
            ControlId::Exposure => ControlInfo::new(0, 0xFFFF, 0),
            ControlId::TestPattern => ControlInfo::new(0, TEST_PATTERN_MENU.len() as i32 - 1, 0),
            ControlId::HFlip
            | ControlId::VFlip
            | ControlId::HdrMode
            | ControlId::DefectCorrection => ControlInfo::new(0, 1, 0),
            ControlId::LineLengthPck | ControlId::CoarseIntegrationTime => {
                ControlInfo::new(0, 0xFFFF, 0)
            }
        }
    }
}

const GAIN_MAX: i32 = 511;

pub const TEST_PATTERN_MENU: [&str; 6] = [
    "Normal pixel operation",
    "Solid color",
    "100% Color Bar",
    "Fade-to-Gray Color Bars",
    "Walking 1s (10-bit)",
    "Walking 1s (8-bit)",
];

/// Range and default of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlInfo {
    pub min: i32,
    pub max: i32,
    pub default: i32,
    pub read_only: bool,
}

impl ControlInfo {
    const fn new(min: i32, max: i32, default: i32) -> Self {
        Self {
            min,
            max,
            default,
            read_only: false,
        }
    }

    const fn read_only() -> Self {
        Self {
            min: 0,
            max: i32::MAX,
            default: 0,
            read_only: true,
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Cached control values.
///
/// Values written through [`ControlSet::set`] are marked as user-set until
/// their range is redefined by a mode change.
#[derive(Debug, Clone)]
pub struct ControlSet {
    info: [ControlInfo; CONTROL_COUNT],
    values: [i32; CONTROL_COUNT],
    user_set: Bitmap<CONTROL_COUNT>,
}

impl Default for ControlSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlSet {
    pub fn new() -> Self {
        let info = ControlId::ALL.map(ControlId::default_info);
        Self {
            values: info.map(|i| i.default),
            info,
            user_set: Bitmap::new(),
        }
    }

    pub fn info(&self, id: ControlId) -> ControlInfo {
        self.info[id.index()]
    }

    pub fn get(&self, id: ControlId) -> i32 {
        self.values[id.index()]
    }

    /// Stores a user value after checking access and range.
    pub fn set<E>(&mut self, id: ControlId, value: i32) -> Result<(), SensorError<E>> {
        let info = self.info(id);
        if info.read_only {
            return Err(SensorError::ReadOnlyControl(id));
        }
        if !info.contains(value) {
            return Err(SensorError::ControlOutOfRange { id, value });
        }
        self.values[id.index()] = value;
        self.user_set.set(id.index(), true);
        Ok(())
    }

    /// Stores a value computed by the driver, clamped to the range.
    pub(crate) fn store(&mut self, id: ControlId, value: i32) {
        let info = self.info(id);
        self.values[id.index()] = value.clamp(info.min, info.max);
    }

    /// Redefines range and default, resetting the value to the default.
    pub(crate) fn reset_range(&mut self, id: ControlId, min: i32, max: i32, default: i32) {
        let info = &mut self.info[id.index()];
        info.min = min;
        info.max = max.max(min);
        info.default = default.clamp(info.min, info.max);
        self.values[id.index()] = info.default;
        self.user_set.set(id.index(), false);
    }

    /// Narrows or widens the upper bound, clamping the current value.
    pub(crate) fn set_max(&mut self, id: ControlId, max: i32) {
        let info = &mut self.info[id.index()];
        info.max = max.max(info.min);
        info.default = info.default.min(info.max);
        let value = self.values[id.index()].min(info.max);
        self.values[id.index()] = value;
    }

    pub fn is_user_set(&self, id: ControlId) -> bool {
        self.user_set.get(id.index())
    }

    /// Controls set by the user, in id order.
    pub fn user_set(&self) -> impl Iterator<Item = ControlId> + use<> {
        let bits = self.user_set;
        core::iter::successors(bits.first_index(), move |&idx| bits.next_index(idx))
            .filter_map(ControlId::from_index)
    }

    /// Green1, blue, red, green2 gains for the colour gain registers.
    pub fn color_gains(&self) -> [u16; 4] {
        let green = self.get(ControlId::Gain);
        let red = (green + self.get(ControlId::RedBalance)).clamp(0, GAIN_MAX);
        let blue = (green + self.get(ControlId::BlueBalance)).clamp(0, GAIN_MAX);
        [green as u16, blue as u16, red as u16, green as u16]
    }
}
