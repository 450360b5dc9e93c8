//! Compile-time device configuration
//!
//! Everything here is fixed at build time and handed out by reference as
//! [`APP`]. Pins live in the `led_gpio!` / `indicator_gpio!` macros because
//! peripherals are moved out of `esp_hal::init` by name.

use embassy_net::Ipv4Address;
use embassy_time::Duration;
use fire_composer::{ColorOrder, FireConfig, PowerConfig};

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Number of LEDs on the strip
pub const LED_COUNT: usize = 20;

/// Base address of the `wifi_creds` partition (see partitions.csv)
pub const CREDENTIALS_PARTITION_OFFSET: u32 = 0x31_0000;

#[derive(Debug, Clone, Copy)]
pub struct StripConfig {
    pub color_order: ColorOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct PortalConfig {
    /// Name of the provisioning access point
    pub ap_name: &'static str,
    pub ip_address: Ipv4Address,
    pub prefix_len: u8,
    /// How long to try stored credentials before opening the portal
    pub connect_timeout: Duration,
    /// Reboot if nobody configures the device in time, `None` waits forever
    pub portal_timeout: Option<Duration>,
    /// Hostname announced over DHCP in station mode
    pub hostname: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub strip: StripConfig,
    pub power: PowerConfig,
    pub fire: FireConfig,
    pub portal: PortalConfig,
}

pub static APP: AppConfig = AppConfig {
    strip: StripConfig {
        color_order: ColorOrder::Grb,
    },
    power: PowerConfig::new(255, 3000),
    // Inwards toward the middle
    fire: FireConfig {
        cooling: 30,
        sparking: 100,
        sparks: 3,
        spark_height: 2,
        reversed: true,
        mirrored: true,
    },
    portal: PortalConfig {
        ap_name: "BackFire",
        ip_address: Ipv4Address::new(192, 168, 4, 1),
        prefix_len: 24,
        connect_timeout: Duration::from_secs(20),
        portal_timeout: None,
        hostname: "backfire",
    },
};

/// LED strip data line
#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO13
    };
}

/// Lit while the power governor dims the strip
#[macro_export]
macro_rules! indicator_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}

/// Held low at power-on to forget stored credentials
#[macro_export]
macro_rules! reset_gpio {
    ($p:expr) => {
        $p.GPIO0
    };
}
