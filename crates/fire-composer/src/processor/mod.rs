//! Output processing pipeline
//!
//! Applies post-processing to rendered frames before sending to hardware:
//! - Brightness clamp for configuration values
//! - Power governor that dims frames exceeding the power ceiling

mod brightness;
mod power;

pub use brightness::{apply_brightness, clamp_brightness};
pub use power::{PowerConfig, PowerGovernor, frame_power_mw};
