/// Power and streaming state of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    /// Supplies off, reset asserted.
    #[default]
    Off,
    /// Out of reset, chip id being checked.
    Identifying,
    /// Manufacturer table applied; no mode programmed yet.
    InitialConfig,
    /// Mode table, geometry and PLL programmed; standby.
    ModeConfigured,
    Streaming,
}

impl StreamState {
    pub fn is_powered(self) -> bool {
        !matches!(self, StreamState::Off | StreamState::Identifying)
    }

    /// Controls take effect immediately in these states.
    pub fn is_configured(self) -> bool {
        matches!(self, StreamState::ModeConfigured | StreamState::Streaming)
    }
}
