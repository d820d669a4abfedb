use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c::I2c};
use log::{debug, error, info, warn};

use crate::sensor::{
    bus::RegisterBus,
    config::SensorConfig,
    controls::{ControlId, ControlInfo, ControlSet},
    error::SensorError,
    geometry::{self, EXPOSURE_MARGIN, GeometryWindow, HBLANK_MIN, VBLANK_MIN},
    modes::{self, MODES, SensorMode},
    pll::PllConfig,
    power::{self, PowerControl},
    regs,
    state::StreamState,
    table::{self, OverrideList},
    tables,
    types::{Colorspace, FieldOrder, Format, FrameInterval, FrameSize, MediaBusCode, Which},
};

/// Reset held asserted before release, in microseconds.
pub const RESET_HOLD_US: u32 = 1_000;
/// Wait after releasing reset, in milliseconds.
pub const RESET_SETTLE_MS: u32 = 1;
/// Wait after the software reset command, in milliseconds.
pub const SOFTWARE_RESET_MS: u32 = 500;

/// Frame length and coarse integration time for 60 fps.
const TIMING_60FPS: (u16, u16) = (0x0626, 0x05E8);
/// Frame length and coarse integration time for 30 fps.
const TIMING_30FPS: (u16, u16) = (0x0C4E, 0x0C4E);

const MODE_OVERRIDES: usize = 4;

/// AR1335 driver.
///
/// Every operation that touches the bus takes `&mut self` and holds it for
/// its full duration, table waits included. No critical section is taken;
/// to share the driver between contexts, put it behind the mutex of the
/// surrounding executor or RTOS.
///
/// ```text
///  Off ── power_on ──► InitialConfig ── set_stream(true) ──► Streaming
///   ▲                    ▲      │                               │
///   │                    │      └─ set_fmt ◄── ModeConfigured ◄─┘
///   └──── power_off ─────┴────────────────── set_stream(false)
/// ```
pub struct Ar1335<I2C, D, RST, P> {
    inner: Inner<I2C, D, RST, P>,
}

struct Inner<I2C, D, RST, P> {
    bus: RegisterBus<I2C>,
    delay: D,
    reset: RST,
    power: P,
    config: SensorConfig,
    state: StreamState,
    format: Format,
    mode: usize,
    pll: PllConfig,
    frame_interval: FrameInterval,
    controls: ControlSet,
}

impl<I2C, D, RST, P> Ar1335<I2C, D, RST, P>
where
    I2C: I2c,
    D: DelayNs,
    RST: OutputPin,
    P: PowerControl,
{
    pub(crate) fn new(
        config: SensorConfig,
        i2c: I2C,
        delay: D,
        reset: RST,
        power: P,
    ) -> Result<Self, SensorError<I2C::Error>> {
        config.validate()?;

        let mode = MODES.len() - 1;
        let code = MediaBusCode::SRGGB10_1X10;
        let bpp = code.bits_per_pixel().unwrap_or(10);
        let pll = PllConfig::for_depth(config.extclk_hz, bpp).ok_or(SensorError::NoPllSolution {
            extclk_hz: config.extclk_hz,
            target_hz: PllConfig::target_hz(bpp),
        })?;

        let mut inner = Inner {
            bus: RegisterBus::new(i2c, config.address),
            delay,
            reset,
            power,
            config,
            state: StreamState::Off,
            format: Format::new(MODES[mode].width, MODES[mode].height, code),
            mode,
            pll,
            frame_interval: FrameInterval::from_fps(MODES[mode].fps),
            controls: ControlSet::new(),
        };
        inner.reset_mode_controls();

        debug!(
            "ar1335: pll pre_div {} multiplier {} -> {} Hz",
            pll.pre_div, pll.multiplier, pll.pll_hz
        );

        Ok(Self { inner })
    }

    pub fn state(&self) -> StreamState {
        self.inner.state
    }

    /// Enables supplies, releases reset, verifies the chip and loads the
    /// manufacturer configuration. Does nothing if already powered.
    ///
    /// On failure everything enabled so far is undone and the sensor is
    /// left `Off`.
    pub fn power_on(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.inner.power_on()
    }

    /// Asserts reset and disables supplies in reverse order.
    pub fn power_off(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.inner.power_off()
    }

    /// The `index`-th supported media bus code.
    pub fn enum_mbus_code(&self, index: usize) -> Option<MediaBusCode> {
        MediaBusCode::SUPPORTED.get(index).copied()
    }

    /// Size of the `index`-th mode.
    pub fn enum_frame_size(&self, index: usize) -> Option<FrameSize> {
        MODES.get(index).map(|mode| FrameSize {
            min_width: mode.width,
            max_width: mode.width,
            min_height: mode.height,
            max_height: mode.height,
        })
    }

    pub fn get_fmt(&self) -> Format {
        self.inner.format
    }

    /// Negotiates `request` against the mode list.
    ///
    /// `Which::Try` only reports the result. `Which::Active` also selects the
    /// mode; it takes effect on the next stream start.
    pub fn set_fmt(&mut self, request: &Format, which: Which) -> Result<Format, SensorError<I2C::Error>> {
        self.inner.set_fmt(request, which)
    }

    pub fn frame_interval(&self) -> FrameInterval {
        self.inner.frame_interval
    }

    /// Selects 60 fps if requested exactly and the active height fits the
    /// 60 fps frame, 30 fps otherwise. Returns the rate actually programmed.
    pub fn set_frame_interval(
        &mut self,
        interval: FrameInterval,
    ) -> Result<FrameInterval, SensorError<I2C::Error>> {
        self.inner.set_frame_interval(interval)
    }

    /// Starts or stops streaming.
    pub fn set_stream(&mut self, on: bool) -> Result<(), SensorError<I2C::Error>> {
        if on {
            self.inner.stream_on()
        } else {
            self.inner.stream_off()
        }
    }

    /// Raw register read for debugging.
    pub fn read_register(&mut self, reg: u16) -> Result<u16, SensorError<I2C::Error>> {
        self.inner.require_power()?;
        self.inner.bus.read_reg(reg)
    }

    /// Raw register write for debugging.
    pub fn write_register(&mut self, reg: u16, value: u16) -> Result<(), SensorError<I2C::Error>> {
        self.inner.require_power()?;
        self.inner.bus.write_reg(reg, value)
    }

    pub fn control(&self, id: ControlId) -> i32 {
        self.inner.controls.get(id)
    }

    pub fn control_info(&self, id: ControlId) -> ControlInfo {
        self.inner.controls.info(id)
    }

    /// Caches the value and writes it if a mode is programmed.
    pub fn set_control(&mut self, id: ControlId, value: i32) -> Result<(), SensorError<I2C::Error>> {
        self.inner.set_control(id, value)
    }

    pub fn pll(&self) -> PllConfig {
        self.inner.pll
    }

    /// Readout window for the active format and blanking.
    pub fn window(&self) -> GeometryWindow {
        self.inner.window()
    }

    /// Frames to drop after stream start.
    pub fn skip_frames(&self) -> u32 {
        0
    }

    /// Gives back the hardware handles.
    pub fn release(self) -> (I2C, D, RST, P) {
        let inner = self.inner;
        (inner.bus.release(), inner.delay, inner.reset, inner.power)
    }
}

impl<I2C, D, RST, P> Inner<I2C, D, RST, P>
where
    I2C: I2c,
    D: DelayNs,
    RST: OutputPin,
    P: PowerControl,
{
    fn mode(&self) -> &'static SensorMode {
        &MODES[self.mode]
    }

    fn bpp(&self) -> u8 {
        self.format.code.bits_per_pixel().unwrap_or(10)
    }

    fn require_power(&self) -> Result<(), SensorError<I2C::Error>> {
        if self.state.is_powered() {
            Ok(())
        } else {
            Err(SensorError::NotPowered)
        }
    }

    fn power_on(&mut self) -> Result<(), SensorError<I2C::Error>> {
        if self.state != StreamState::Off {
            return Ok(());
        }

        power::power_up(&mut self.power).map_err(|supply| {
            error!("ar1335: failed to enable {supply:?} supply");
            SensorError::Supply(supply)
        })?;
        self.state = StreamState::Identifying;

        if let Err(err) = self.bring_up() {
            error!("ar1335: power on failed: {err:?}");
            // The bring-up error is the one worth reporting.
            let _ = self.shutdown();
            return Err(err);
        }

        self.state = StreamState::InitialConfig;
        info!("ar1335: powered on, {} lanes", self.config.lanes);
        Ok(())
    }

    fn bring_up(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.reset.set_low().map_err(|_| SensorError::ResetPin)?;
        self.delay.delay_us(RESET_HOLD_US);
        self.reset.set_high().map_err(|_| SensorError::ResetPin)?;
        self.delay.delay_ms(RESET_SETTLE_MS);

        self.identify()?;

        self.bus
            .write_reg(regs::SOFTWARE_RESET, regs::SOFTWARE_RESET_VALUE)?;
        self.delay.delay_ms(SOFTWARE_RESET_MS);

        table::apply(&mut self.bus, &mut self.delay, &tables::INITIAL, None)?;
        self.bus
            .write_reg(regs::HISPI_TEST_MODE, regs::hispi_test_mode(self.config.lanes))
    }

    fn identify(&mut self) -> Result<(), SensorError<I2C::Error>> {
        for (register, expected) in [
            (regs::CHIP_ID, regs::CHIP_ID_VALUE),
            (regs::REVISION_ID, regs::REVISION_ID_VALUE),
        ] {
            let found = self.bus.read_reg(register)?;
            if found != expected {
                return Err(SensorError::ChipIdMismatch {
                    register,
                    expected,
                    found,
                });
            }
        }
        debug!("ar1335: chip identified");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), SensorError<I2C::Error>> {
        let reset = self.reset.set_low().map_err(|_| SensorError::ResetPin);
        power::power_down(&mut self.power);
        self.state = StreamState::Off;
        reset
    }

    fn power_off(&mut self) -> Result<(), SensorError<I2C::Error>> {
        if self.state == StreamState::Off {
            return Ok(());
        }
        info!("ar1335: power off");
        self.shutdown()
    }

    fn stream_on(&mut self) -> Result<(), SensorError<I2C::Error>> {
        self.require_power()?;
        if self.state == StreamState::Streaming {
            return Ok(());
        }

        let result = self
            .configure_mode()
            .and_then(|()| self.start_streaming());
        match result {
            Ok(()) => {
                self.state = StreamState::Streaming;
                info!(
                    "ar1335: streaming {}x{}",
                    self.format.width, self.format.height
                );
                Ok(())
            }
            Err(err) => {
                error!("ar1335: stream on failed: {err:?}");
                self.state = StreamState::InitialConfig;
                Err(err)
            }
        }
    }

    fn stream_off(&mut self) -> Result<(), SensorError<I2C::Error>> {
        if self.state != StreamState::Streaming {
            return Ok(());
        }

        let result = self
            .bus
            .write_reg(regs::GLOBAL_GAIN, regs::SAFE_GLOBAL_GAIN)
            .and_then(|()| table::apply(&mut self.bus, &mut self.delay, &tables::STOP_STREAM, None));
        match result {
            Ok(()) => {
                self.state = StreamState::ModeConfigured;
                info!("ar1335: stream off");
                Ok(())
            }
            Err(err) => {
                error!("ar1335: stream off failed: {err:?}");
                self.state = StreamState::InitialConfig;
                Err(err)
            }
        }
    }

    /// Mode table, geometry, PLL, then the user controls on top.
    fn configure_mode(&mut self) -> Result<(), SensorError<I2C::Error>> {
        let mode = self.mode();

        let mut overrides = OverrideList::<MODE_OVERRIDES>::new();
        overrides.push(regs::SERIAL_FORMAT, regs::serial_format(self.config.lanes))?;
        overrides.push(regs::DATA_FORMAT, regs::data_format(self.bpp()))?;
        for (id, reg) in [
            (ControlId::LineLengthPck, regs::LINE_LENGTH_PCK),
            (ControlId::CoarseIntegrationTime, regs::COARSE_INTEGRATION_TIME),
        ] {
            if self.controls.is_user_set(id) {
                overrides.push(reg, self.controls.get(id) as u16)?;
            }
        }

        debug!("ar1335: mode {}x{}@{}", mode.width, mode.height, mode.fps);
        table::apply(
            &mut self.bus,
            &mut self.delay,
            mode.table,
            Some(overrides.as_slice()),
        )?;
        self.write_geometry()?;
        self.bus.write_burst(regs::PLL_BASE, &self.pll.burst())?;
        self.bus
            .write_reg(regs::EXPOSURE, self.controls.get(ControlId::Exposure) as u16)?;

        self.state = StreamState::ModeConfigured;
        self.apply_user_controls()
    }

    fn start_streaming(&mut self) -> Result<(), SensorError<I2C::Error>> {
        table::apply(&mut self.bus, &mut self.delay, &tables::LP11_PRESTREAM, None)?;
        table::apply(&mut self.bus, &mut self.delay, &tables::START_STREAM, None)
    }

    fn apply_user_controls(&mut self) -> Result<(), SensorError<I2C::Error>> {
        let mut gains_written = false;
        for id in self.controls.user_set() {
            match id {
                // Already part of the geometry and exposure writes.
                ControlId::HBlank | ControlId::VBlank | ControlId::Exposure => continue,
                _ if id.is_gain_cluster() => {
                    if gains_written {
                        continue;
                    }
                    gains_written = true;
                }
                _ => {}
            }
            self.apply_control(id)?;
        }
        Ok(())
    }

    fn apply_control(&mut self, id: ControlId) -> Result<(), SensorError<I2C::Error>> {
        let value = self.controls.get(id);
        match id {
            ControlId::AnalogueGain => self.bus.write_reg(regs::ANALOGUE_GAIN, value as u16),
            ControlId::Gain | ControlId::RedBalance | ControlId::BlueBalance => self
                .bus
                .write_burst(regs::COLOR_GAIN_BASE, &self.controls.color_gains()),
            ControlId::HBlank | ControlId::VBlank => self.write_geometry(),
            ControlId::Exposure => self.bus.write_reg(regs::EXPOSURE, value as u16),
            ControlId::TestPattern => {
                let pattern = regs::TEST_PATTERNS
                    .get(value as usize)
                    .copied()
                    .unwrap_or_default();
                self.bus.write_reg(regs::TEST_PATTERN_MODE, pattern)
            }
            ControlId::HFlip => self
                .bus
                .update_bits(regs::READ_MODE, regs::READ_MODE_HFLIP, value != 0),
            ControlId::VFlip => self
                .bus
                .update_bits(regs::READ_MODE, regs::READ_MODE_VFLIP, value != 0),
            ControlId::HdrMode => {
                let hdr = if value != 0 {
                    &tables::HDR_ON
                } else {
                    &tables::HDR_OFF
                };
                table::apply(&mut self.bus, &mut self.delay, hdr, None)
            }
            ControlId::DefectCorrection => {
                if value != 0 {
                    table::apply(&mut self.bus, &mut self.delay, &tables::DEFECT_CORRECTION, None)
                } else {
                    self.bus.write_reg(regs::DEFECT_CORRECTION, 0)
                }
            }
            ControlId::LineLengthPck => self.bus.write_reg(regs::LINE_LENGTH_PCK, value as u16),
            ControlId::CoarseIntegrationTime => {
                self.bus.write_reg(regs::COARSE_INTEGRATION_TIME, value as u16)
            }
            ControlId::PixelRate | ControlId::LinkFreq => Ok(()),
        }
    }

    fn window(&self) -> GeometryWindow {
        geometry::compute_window(
            &self.format,
            self.controls.get(ControlId::HBlank) as u32,
            self.controls.get(ControlId::VBlank) as u32,
        )
    }

    fn write_geometry(&mut self) -> Result<(), SensorError<I2C::Error>> {
        let window = self.window();
        debug!(
            "ar1335: window ({}, {})..({}, {}) fll {} llp {}",
            window.x_start,
            window.y_start,
            window.x_end,
            window.y_end,
            window.frame_length_lines,
            window.line_length_pck
        );
        self.bus
            .write_burst(regs::FRAME_LENGTH_LINES, &window.burst())
    }

    fn set_fmt(&mut self, request: &Format, which: Which) -> Result<Format, SensorError<I2C::Error>> {
        let bpp = request
            .code
            .bits_per_pixel()
            .ok_or(SensorError::UnsupportedFormat(request.code.0))?;

        let index = modes::negotiate(&MODES, request.width, request.height);
        let mode = &MODES[index];
        if (mode.width, mode.height) != (request.width, request.height) {
            debug!(
                "ar1335: {}x{} negotiated to {}x{}",
                request.width, request.height, mode.width, mode.height
            );
        }
        let format = Format {
            width: mode.width,
            height: mode.height,
            code: request.code,
            field: FieldOrder::None,
            colorspace: Colorspace::Srgb,
        };

        if which == Which::Try {
            return Ok(format);
        }
        if self.state == StreamState::Streaming {
            return Err(SensorError::Busy);
        }

        let extclk_hz = self.config.extclk_hz;
        let pll = PllConfig::for_depth(extclk_hz, bpp).ok_or(SensorError::NoPllSolution {
            extclk_hz,
            target_hz: PllConfig::target_hz(bpp),
        })?;

        self.format = format;
        self.mode = index;
        self.pll = pll;
        self.reset_mode_controls();
        if self.state == StreamState::ModeConfigured {
            self.state = StreamState::InitialConfig;
        }

        info!(
            "ar1335: format {}x{} code {:#06x}",
            format.width, format.height, format.code.0
        );
        Ok(format)
    }

    /// Redefines the mode-dependent control ranges and derived rates.
    fn reset_mode_controls(&mut self) {
        let mode = self.mode();
        let width = mode.width as i32;
        let height = mode.height as i32;
        let frame_length = i32::from(mode.frame_length_lines);

        self.controls.reset_range(
            ControlId::HBlank,
            HBLANK_MIN as i32,
            0xFFFF - width,
            mode.hblank() as i32,
        );
        self.controls.reset_range(
            ControlId::VBlank,
            VBLANK_MIN as i32,
            0xFFFF - height,
            mode.vblank() as i32,
        );
        self.controls.reset_range(
            ControlId::Exposure,
            0,
            frame_length - EXPOSURE_MARGIN as i32,
            i32::from(mode.coarse_integration_time),
        );

        let bpp = self.bpp();
        let pixel_rate = self.pll.pixel_rate(self.config.lanes, bpp);
        let link_freq = self.pll.link_freq();
        self.controls.store(
            ControlId::PixelRate,
            i32::try_from(pixel_rate).unwrap_or(i32::MAX),
        );
        self.controls.store(
            ControlId::LinkFreq,
            i32::try_from(link_freq).unwrap_or(i32::MAX),
        );

        self.frame_interval = FrameInterval::from_fps(mode.fps);
    }

    fn update_exposure_limit(&mut self) {
        let frame_length = self.format.height as i32 + self.controls.get(ControlId::VBlank);
        self.controls
            .set_max(ControlId::Exposure, frame_length - EXPOSURE_MARGIN as i32);
    }

    fn set_control(&mut self, id: ControlId, value: i32) -> Result<(), SensorError<I2C::Error>> {
        let exposure = self.controls.get(ControlId::Exposure);
        self.controls.set(id, value)?;
        if id == ControlId::VBlank {
            self.update_exposure_limit();
        }
        if self.state.is_configured() {
            self.apply_control(id)?;
            // A shorter frame may have pulled the exposure down with it.
            if id != ControlId::Exposure && self.controls.get(ControlId::Exposure) != exposure {
                self.apply_control(ControlId::Exposure)?;
            }
        }
        Ok(())
    }

    fn set_frame_interval(
        &mut self,
        requested: FrameInterval,
    ) -> Result<FrameInterval, SensorError<I2C::Error>> {
        let height = self.format.height as i32;
        let fits_60 = i32::from(TIMING_60FPS.0) - height >= VBLANK_MIN as i32;
        let fps = match requested.fps() {
            60 if fits_60 => 60,
            60 => {
                warn!(
                    "ar1335: 60 fps needs at most {} lines, {} active; using 30",
                    i32::from(TIMING_60FPS.0) - VBLANK_MIN as i32,
                    height
                );
                30
            }
            30 => 30,
            other => {
                warn!("ar1335: {other} fps not supported, using 30");
                30
            }
        };
        let (frame_length, coarse) = if fps == 60 {
            TIMING_60FPS
        } else {
            TIMING_30FPS
        };

        self.controls
            .store(ControlId::VBlank, i32::from(frame_length) - height);
        self.update_exposure_limit();
        self.controls.store(ControlId::Exposure, i32::from(coarse));
        self.frame_interval = FrameInterval::from_fps(fps);

        if self.state.is_configured() {
            let frame_length = height + self.controls.get(ControlId::VBlank);
            self.bus
                .write_reg(regs::FRAME_LENGTH_LINES, frame_length as u16)?;
            self.bus.write_reg(
                regs::COARSE_INTEGRATION_TIME,
                self.controls.get(ControlId::Exposure) as u16,
            )?;
        }
        Ok(self.frame_interval)
    }
}
