mod flash_storage;
mod led_ws2812;
mod random;
mod reset_button;
mod throttle_indicator;
mod wifi;
mod wifi_ap;
mod wifi_sta;

pub use flash_storage::EspNorFlashStorageDriver;
pub use led_ws2812::EspLedDriver;
pub use random::get_seed;
pub use reset_button::is_held;
pub use throttle_indicator::PinIndicator;
pub use wifi::{RadioError, init_radio};
pub use wifi_ap::start_wifi_ap;
pub(crate) use wifi_sta::client_mode;
pub use wifi_sta::start_wifi_sta;
