use esp_hal::{
    delay::Delay,
    gpio::{Input, InputConfig, InputPin, Pull},
};

/// Time for the pull-up to charge the line before sampling
const SETTLE_MICROS: u32 = 100;

/// Whether the button on `pin` is held down right now (active low)
pub fn is_held(pin: impl InputPin) -> bool {
    let button = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    Delay::new().delay_micros(SETTLE_MICROS);
    button.is_low()
}
