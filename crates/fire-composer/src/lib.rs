#![no_std]

//! Fire Composer - frame rendering for a single LED strip
//!
//! Architecture layers:
//! - `driver` - Hardware abstraction ([`LedDriver`], [`ThrottleIndicator`])
//! - `effect` - Effect implementations ([`FireEffect`])
//! - `color` - Palettes and wire color ordering
//! - `processor` - Output processing (brightness clamp, power governor)
//! - `engine` - The frame loop that ties everything together
//!
//! The engine is generic over `LedDriver`, allowing different hardware backends
//! and a recording driver on the host.

pub mod color;
pub mod driver;
pub mod effect;
pub mod engine;
pub mod math8;
pub mod processor;

pub use color::{ColorOrder, Rgb, heat_color};
pub use driver::{DriverError, LedDriver, NoIndicator, ThrottleIndicator};
pub use effect::{EffectImpl, FireConfig, FireEffect};
pub use engine::{FRAME_INTERVAL, FrameLoop, FrameState};
pub use processor::{PowerConfig, PowerGovernor, clamp_brightness};
