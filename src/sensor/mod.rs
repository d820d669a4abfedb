pub mod builder;
pub mod bus;
pub mod config;
pub mod controls;
pub mod device;
pub mod error;
pub mod geometry;
pub mod modes;
pub mod pll;
pub mod power;
pub mod regs;
pub mod state;
pub mod table;
pub mod tables;
pub mod types;

#[cfg(test)]
mod test_support;

pub use builder::Ar1335Builder;
pub use bus::RegisterBus;
pub use config::SensorConfig;
pub use controls::{ControlId, ControlInfo, ControlSet};
pub use device::Ar1335;
pub use error::{SensorError, TableError};
pub use geometry::GeometryWindow;
pub use modes::SensorMode;
pub use pll::PllConfig;
pub use power::{NoPower, PowerControl, Supply};
pub use state::StreamState;
pub use table::{OverrideList, RegisterEntry, RegisterTable};
pub use types::{
    Colorspace, FieldOrder, Format, FrameInterval, FrameSize, MediaBusCode, Which,
};

pub mod prelude {
    pub use super::{
        Ar1335, Ar1335Builder, ControlId, ControlInfo, Format, FrameInterval, FrameSize,
        MediaBusCode, NoPower, PowerControl, SensorConfig, SensorError, StreamState, Supply,
        Which,
    };
}
