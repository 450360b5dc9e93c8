//! Effect system
//!
//! Effects render into a caller-owned frame buffer so the frame loop can
//! clear it, hand it over, and push it to hardware without extra copies.

mod fire;

pub use fire::{FireConfig, FireEffect};

use crate::color::Rgb;

/// Trait for effect implementations
///
/// Effects are stateful and advance their internal state once per call.
pub trait EffectImpl<const N: usize> {
    /// Render the next frame on top of `frame`
    fn render(&mut self, frame: &mut [Rgb; N]);

    /// Reset effect state
    fn reset(&mut self) {}
}
