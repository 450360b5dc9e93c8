mod heat;
mod order;

use smart_leds::RGB8;

use crate::math8::qadd8;

pub use heat::heat_color;
pub use order::ColorOrder;

pub type Rgb = RGB8;

/// Add `b` onto `a` channel by channel, saturating at 255
#[inline]
pub fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}
