//! Power governor
//!
//! Estimates the draw of a frame and picks the highest brightness, up to the
//! configured one, that keeps the strip under the power ceiling.
//! Per-channel figures are for 5 V WS2812B parts at full duty.

use super::brightness::clamp_brightness;
use crate::color::Rgb;

const RED_MW: u32 = 16 * 5;
const GREEN_MW: u32 = 11 * 5;
const BLUE_MW: u32 = 15 * 5;
/// Idle draw of a single LED
const DARK_MW: u32 = 5;
/// Controller overhead included in every estimate
const MCU_MW: u32 = 25 * 5;

/// Brightness and power ceiling, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerConfig {
    /// Brightness applied to every frame (0-255)
    pub brightness: u8,
    /// Power ceiling in milliwatts, `0` disables limiting
    pub max_power_mw: u32,
}

impl PowerConfig {
    /// Build a configuration from a requested brightness.
    ///
    /// The request goes through [`clamp_brightness`]; values below zero
    /// cannot be represented and become 0.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn new(brightness: i32, max_power_mw: u32) -> Self {
        let clamped = clamp_brightness(brightness);
        let brightness = if clamped < 0 { 0 } else { clamped as u8 };
        Self {
            brightness,
            max_power_mw,
        }
    }
}

/// Estimated draw of a frame at full brightness, in milliwatts
pub fn frame_power_mw(frame: &[Rgb]) -> u32 {
    let (red, green, blue) = frame.iter().fold((0u32, 0u32, 0u32), |(r, g, b), pixel| {
        (
            r + u32::from(pixel.r),
            g + u32::from(pixel.g),
            b + u32::from(pixel.b),
        )
    });
    let leds = u32::try_from(frame.len()).unwrap_or(u32::MAX);

    // Each channel is scaled down on its own before summing
    ((red * RED_MW) >> 8) + ((green * GREEN_MW) >> 8) + ((blue * BLUE_MW) >> 8) + DARK_MW * leds
}

/// Dims frames that would exceed the power ceiling
#[derive(Debug, Clone)]
pub struct PowerGovernor {
    max_power_mw: u32,
    throttled: bool,
}

impl PowerGovernor {
    pub const fn new(max_power_mw: u32) -> Self {
        Self {
            max_power_mw,
            throttled: false,
        }
    }

    /// Whether the last frame was dimmed below the requested brightness
    pub const fn is_throttled(&self) -> bool {
        self.throttled
    }

    /// Get the highest brightness not above `brightness` that keeps `frame`
    /// under the ceiling.
    #[allow(clippy::cast_possible_truncation)]
    pub fn limit(&mut self, frame: &[Rgb], brightness: u8) -> u8 {
        if self.max_power_mw == 0 {
            self.set_throttled(false);
            return brightness;
        }

        let total = u64::from(MCU_MW + frame_power_mw(frame));
        let requested = total * u64::from(brightness) / 256;
        if requested <= u64::from(self.max_power_mw) {
            self.set_throttled(false);
            return brightness;
        }

        let recommended = u64::from(brightness) * u64::from(self.max_power_mw) / requested;
        // requested > max, so recommended < brightness
        let recommended = recommended as u8;
        self.set_throttled(recommended < brightness);
        recommended
    }

    fn set_throttled(&mut self, throttled: bool) {
        if throttled != self.throttled {
            if throttled {
                log::info!("power: throttling, ceiling {} mW", self.max_power_mw);
            } else {
                log::info!("power: back under ceiling");
            }
        }
        self.throttled = throttled;
    }
}
