use esp_hal::gpio::{Level, Output, OutputConfig, OutputPin};

use fire_composer::ThrottleIndicator;

/// Status LED lit while the strip is power throttled
pub struct PinIndicator<'a> {
    pin: Output<'a>,
}

impl<'a> PinIndicator<'a> {
    pub fn new(pin: impl OutputPin + 'a) -> Self {
        Self {
            pin: Output::new(pin, Level::Low, OutputConfig::default()),
        }
    }
}

impl ThrottleIndicator for PinIndicator<'_> {
    fn set_throttled(&mut self, throttled: bool) {
        self.pin.set_level(Level::from(throttled));
    }
}
