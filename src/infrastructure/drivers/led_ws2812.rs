use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::SmartLedsWrite;
use static_cell::make_static;

use fire_composer::{ColorOrder, DriverError, LedDriver, Rgb};

use crate::config::LED_COUNT;

/// WS2812B strip driven by the RMT peripheral
///
/// The RMT (Remote Control) peripheral generates the precise timing
/// signals required by WS2812B LEDs.
pub struct EspLedDriver<'a> {
    adapter: SmartLedsAdapter<'a, { buffer_size(LED_COUNT) }>,
    color_order: ColorOrder,
}

impl<'a> EspLedDriver<'a> {
    /// Create a new ESP LED driver
    ///
    /// # Arguments
    /// * `rmt` - RMT peripheral
    /// * `pin` - GPIO pin connected to the LED data line
    /// * `color_order` - Channel order of the strip
    pub fn new<O>(rmt: RMT<'a>, pin: O, color_order: ColorOrder) -> Result<Self, DriverError>
    where
        O: PeripheralOutput<'a>,
    {
        let rmt = Rmt::new(rmt, Rate::from_mhz(80)).map_err(|_| DriverError::Init)?;

        let rmt_buffer = make_static!(smart_led_buffer!(LED_COUNT));
        let adapter = SmartLedsAdapter::new(rmt.channel0, pin, rmt_buffer);

        Ok(Self {
            adapter,
            color_order,
        })
    }
}

impl LedDriver<LED_COUNT> for EspLedDriver<'static> {
    fn write(&mut self, colors: &[Rgb; LED_COUNT]) -> Result<(), DriverError> {
        let order = self.color_order;
        let pixels = colors.iter().map(|&color| order.to_grb_wire(color));
        // Wi-Fi interrupts would stretch the pulse train
        interrupt::free(|| self.adapter.write(pixels)).map_err(|_| DriverError::Write)
    }
}
