//! Frame loop
//!
//! Runs the fixed cycle that drives the strip:
//! clear the buffer, let the effect compute the next frame, present it
//! through the power governor, then sleep until the next frame.

use embassy_time::{Duration, Timer};

use crate::{
    color::Rgb,
    driver::{LedDriver, ThrottleIndicator},
    effect::EffectImpl,
    processor::{PowerConfig, PowerGovernor, apply_brightness},
};

/// Pause between frames (~30 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Frame loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Zeroing the frame buffer
    Clearing,
    /// Effect is writing the next frame
    Computing,
    /// Frame is being pushed to the strip
    Presenting,
    /// Waiting for the next frame
    Sleeping,
}

/// The frame loop
///
/// Generic over the driver, the throttle indicator and the effect so the
/// same loop runs on hardware and against a recording driver in tests.
pub struct FrameLoop<D, I, E, const N: usize>
where
    D: LedDriver<N>,
    I: ThrottleIndicator,
    E: EffectImpl<N>,
{
    driver: D,
    indicator: I,
    effect: E,
    governor: PowerGovernor,
    /// The one brightness applied to every frame
    brightness: u8,
    frame: [Rgb; N],
    frame_interval: Duration,
    state: FrameState,
    frames: u32,
}

impl<D, I, E, const N: usize> FrameLoop<D, I, E, N>
where
    D: LedDriver<N>,
    I: ThrottleIndicator,
    E: EffectImpl<N>,
{
    /// Create a new frame loop
    pub fn new(driver: D, indicator: I, effect: E, power: &PowerConfig) -> Self {
        let mut indicator = indicator;
        indicator.set_throttled(false);
        Self {
            driver,
            indicator,
            effect,
            governor: PowerGovernor::new(power.max_power_mw),
            brightness: power.brightness,
            frame: [Rgb::default(); N],
            frame_interval: FRAME_INTERVAL,
            state: FrameState::Sleeping,
            frames: 0,
        }
    }

    /// Override the pause between frames
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Get current loop state
    pub const fn state(&self) -> FrameState {
        self.state
    }

    /// Number of frames presented so far
    pub const fn frames(&self) -> u32 {
        self.frames
    }

    /// Brightness every frame is presented at, before power limiting
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Whether the last frame was dimmed by the power governor
    pub const fn is_throttled(&self) -> bool {
        self.governor.is_throttled()
    }

    pub const fn driver(&self) -> &D {
        &self.driver
    }

    pub const fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Clear, compute and present one frame
    pub fn render_frame(&mut self) {
        self.state = FrameState::Clearing;
        self.frame = [Rgb::default(); N];

        self.state = FrameState::Computing;
        self.effect.render(&mut self.frame);

        self.state = FrameState::Presenting;
        let brightness = self.governor.limit(&self.frame, self.brightness);
        apply_brightness(&mut self.frame, brightness);
        if let Err(e) = self.driver.write(&self.frame) {
            log::warn!("frame {}: write failed: {:?}", self.frames, e);
        }
        self.indicator.set_throttled(self.governor.is_throttled());
        self.frames = self.frames.wrapping_add(1);
    }

    /// Process one full cycle, including the pause
    pub async fn tick(&mut self) {
        self.render_frame();

        self.state = FrameState::Sleeping;
        Timer::after(self.frame_interval).await;
    }

    /// Run the loop indefinitely
    pub async fn run(&mut self) -> ! {
        loop {
            self.tick().await;
        }
    }
}
