//! LED Driver abstraction layer
//!
//! Provides a trait-based abstraction for LED strip drivers,
//! allowing the frame loop to be hardware-agnostic.

use crate::color::Rgb;

/// Errors reported by LED hardware backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The output peripheral could not be configured
    Init,
    /// The frame could not be transmitted
    Write,
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
pub trait LedDriver<const N: usize> {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb; N]) -> Result<(), DriverError>;
}

/// Output that reports whether the power governor is currently dimming the strip
pub trait ThrottleIndicator {
    fn set_throttled(&mut self, throttled: bool);
}

/// Indicator for boards without a spare output
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl ThrottleIndicator for NoIndicator {
    fn set_throttled(&mut self, _throttled: bool) {}
}
