use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{Config, Interfaces, WifiController, WifiError};
use static_cell::make_static;

/// Radio bring-up failures
#[derive(Debug)]
pub enum RadioError {
    /// The radio driver did not start
    Init,
    /// The Wi-Fi driver rejected a request
    Wifi(WifiError),
}

impl From<WifiError> for RadioError {
    fn from(err: WifiError) -> Self {
        RadioError::Wifi(err)
    }
}

/// Start the radio and split it into the controller and its interfaces
pub fn init_radio(
    wifi_device: WIFI<'static>,
) -> Result<(WifiController<'static>, Interfaces<'static>), RadioError> {
    let radio = esp_radio::init().map_err(|_| RadioError::Init)?;
    let esp_radio_ctrl = &*make_static!(radio);
    let (controller, interfaces) = esp_radio::wifi::new(esp_radio_ctrl, wifi_device, Config::default())?;
    Ok((controller, interfaces))
}
