//! A `no_std`, no-alloc driver for the onsemi AR1335 13MP CMOS image sensor.
//!
//! The sensor is configured over I2C with 16-bit big-endian registers and
//! streams RAW Bayer frames over 1, 2 or 4 MIPI CSI-2 lanes. This crate
//! owns the register sequencing: power-up and identification, the
//! manufacturer configuration tables, mode selection, PLL and readout
//! window programming, and the user controls layered on top.
//!
//! # Features
//!
//! - **Zero heap allocation** - tables are static, bursts use fixed buffers
//! - **embedded-hal 1.0** - any `I2c`, `DelayNs` and `OutputPin` implementation
//! - **Typestate builder** - every hardware handle is supplied exactly once
//! - **Control cache** - controls set while unpowered are replayed on stream start
//! - **No global locking** - bus access is serialized through `&mut self`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  power_on   ┌──────────────────────────┐
//! │     Off      │────────────▶│ reset, chip id, INITIAL  │
//! └──────────────┘             └────────────┬─────────────┘
//!        ▲                                  │
//!        │ power_off                        ▼
//!        │                     ┌──────────────────────────┐
//!        ├─────────────────────│      InitialConfig       │◀──┐
//!        │                     └────────────┬─────────────┘   │ set_fmt
//!        │                      stream on   │                 │
//!        │                                  ▼                 │
//!        │                     ┌──────────────────────────┐   │
//!        │                     │ mode table + overrides   │   │
//!        │                     │ geometry burst (0x0340)  │   │
//!        │                     │ PLL burst (0x0300)       │   │
//!        │                     │ user controls            │───┘
//!        │                     └────────────┬─────────────┘
//!        │                                  │ LP-11, start
//!        │                                  ▼
//!        └─────────────────────   Streaming ⇄ ModeConfigured
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ar1335::prelude::*;
//!
//! let mut sensor = Ar1335Builder::new(SensorConfig::new(24_000_000, 4))
//!     .bus(i2c)
//!     .delay(delay)
//!     .reset_pin(reset)
//!     .no_power()
//!     .build()?;
//!
//! sensor.power_on()?;
//! sensor.set_fmt(
//!     &Format::new(1920, 1080, MediaBusCode::SRGGB10_1X10),
//!     Which::Active,
//! )?;
//! sensor.set_control(ControlId::Exposure, 2000)?;
//! sensor.set_stream(true)?;
//! ```

#![deny(unsafe_code)]
#![no_std]

#[cfg(test)]
extern crate std;

pub mod sensor;

pub mod prelude {
    pub use crate::sensor::prelude::*;
}
