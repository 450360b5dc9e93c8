//! Power estimate and governor.

use fire_composer::{PowerGovernor, Rgb, processor::frame_power_mw};

const WHITE: Rgb = Rgb::new(255, 255, 255);
const BLACK: Rgb = Rgb::new(0, 0, 0);

#[test]
fn dark_strip_draws_idle_power_only() {
    assert_eq!(frame_power_mw(&[BLACK; 20]), 100);
}

#[test]
fn white_strip_estimate() {
    // 5100 per channel: 1593 + 1095 + 1494 = 4182, plus 20 * 5 idle
    assert_eq!(frame_power_mw(&[WHITE; 20]), 4282);
}

#[test]
fn channels_round_down_separately() {
    // 40 + 27 + 37, where shifting the combined 26880 would give 105
    assert_eq!(frame_power_mw(&[Rgb::new(128, 128, 128)]), 104 + 5);
}

#[test]
fn no_ceiling_never_throttles() {
    let mut governor = PowerGovernor::new(0);
    assert_eq!(governor.limit(&[WHITE; 100], 255), 255);
    assert!(!governor.is_throttled());
}

#[test]
fn frame_under_ceiling_keeps_brightness() {
    let mut governor = PowerGovernor::new(3000);
    assert_eq!(governor.limit(&[BLACK; 20], 255), 255);
    assert!(!governor.is_throttled());
}

#[test]
fn frame_over_ceiling_is_dimmed() {
    let mut governor = PowerGovernor::new(3000);
    // (125 + 4282) * 255 / 256 = 4389 mW requested, 255 * 3000 / 4389 = 174
    assert_eq!(governor.limit(&[WHITE; 20], 255), 174);
    assert!(governor.is_throttled());
}

#[test]
fn throttle_clears_when_the_frame_cools_down() {
    let mut governor = PowerGovernor::new(3000);
    governor.limit(&[WHITE; 20], 255);
    assert!(governor.is_throttled());

    governor.limit(&[BLACK; 20], 255);
    assert!(!governor.is_throttled());
}

#[test]
fn zero_brightness_is_never_throttled() {
    let mut governor = PowerGovernor::new(1);
    assert_eq!(governor.limit(&[WHITE; 20], 0), 0);
    assert!(!governor.is_throttled());
}

#[test]
fn governor_never_raises_brightness() {
    let frames = [[BLACK; 20], [WHITE; 20], [Rgb::new(255, 40, 0); 20]];
    for ceiling in [0, 200, 1000, 3000, 100_000] {
        let mut governor = PowerGovernor::new(ceiling);
        for frame in &frames {
            for brightness in 0..=255u8 {
                let limited = governor.limit(frame, brightness);
                assert!(limited <= brightness);
                assert_eq!(governor.is_throttled(), limited < brightness);
            }
        }
    }
}
