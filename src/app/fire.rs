use fire_composer::{FireEffect, FrameLoop};
use log::info;

use crate::{
    config::{AppConfig, LED_COUNT},
    infrastructure::{
        drivers::{EspLedDriver, PinIndicator},
        types::FireLoop,
    },
};

/// Assemble the frame loop that renders the fire
///
/// `seed` feeds the spark generator; the firmware takes it from the
/// hardware RNG.
pub fn init_fire_loop(
    config: &AppConfig,
    driver: EspLedDriver<'static>,
    indicator: PinIndicator<'static>,
    seed: u64,
) -> FireLoop {
    let effect = FireEffect::<LED_COUNT>::new(config.fire, seed);
    info!(
        "fire: {} leds, {} simulated cells, brightness {}, limit {} mW",
        LED_COUNT,
        effect.size(),
        config.power.brightness,
        config.power.max_power_mw
    );
    FrameLoop::new(driver, indicator, effect, &config.power)
}
