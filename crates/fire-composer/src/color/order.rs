//! Wire channel ordering
//!
//! The WS2812 encoder always shifts out the green byte first, then red,
//! then blue. Strips that expect another order get their pixels permuted
//! before encoding so the bytes land on the right channels.

use super::Rgb;

/// Channel order expected by the physical strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    Rbg,
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Rearrange a logical color so that a GRB encoder emits it in `self` order.
    pub const fn to_grb_wire(self, color: Rgb) -> Rgb {
        // The encoder emits (g, r, b) of the returned pixel.
        let (first, second, third) = match self {
            Self::Rgb => (color.r, color.g, color.b),
            Self::Rbg => (color.r, color.b, color.g),
            Self::Grb => (color.g, color.r, color.b),
            Self::Gbr => (color.g, color.b, color.r),
            Self::Brg => (color.b, color.r, color.g),
            Self::Bgr => (color.b, color.g, color.r),
        };
        Rgb {
            r: second,
            g: first,
            b: third,
        }
    }
}
