use crate::{color::Rgb, math8::scale8};

/// Largest brightness the driver accepts
pub const MAX_BRIGHTNESS: i32 = 255;

/// Bound a requested brightness to at most 255.
///
/// Values above the ceiling saturate; everything else, negatives included,
/// passes through unchanged.
pub const fn clamp_brightness(value: i32) -> i32 {
    if value > MAX_BRIGHTNESS {
        MAX_BRIGHTNESS
    } else {
        value
    }
}

/// Scale every pixel of a frame by `brightness`
pub fn apply_brightness(frame: &mut [Rgb], brightness: u8) {
    if brightness == 255 {
        return;
    }

    if brightness == 0 {
        for pixel in frame.iter_mut() {
            *pixel = Rgb::default();
        }
        return;
    }

    for pixel in frame.iter_mut() {
        pixel.r = scale8(pixel.r, brightness);
        pixel.g = scale8(pixel.g, brightness);
        pixel.b = scale8(pixel.b, brightness);
    }
}
