use super::Rgb;
use crate::math8::scale8_video;

/// Map a heat value (0-255) onto a black-red-yellow-white ramp.
///
/// The heat range is split into three bands of 64 steps each:
/// red rises in the coolest band, then green, then blue.
pub const fn heat_color(temperature: u8) -> Rgb {
    let t192 = scale8_video(temperature, 191);
    let heatramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: heatramp,
        }
    } else if t192 & 0x40 != 0 {
        Rgb {
            r: 255,
            g: heatramp,
            b: 0,
        }
    } else {
        Rgb {
            r: heatramp,
            g: 0,
            b: 0,
        }
    }
}
