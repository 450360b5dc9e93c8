#![no_std]
#![no_main]

use embassy_executor::Spawner;

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_storage::FlashStorage;
use log::{info, warn};

use backfire::app::{auto_connect, clear_credentials, init_fire_loop};
use backfire::config::{APP, BUILD_VERSION, CREDENTIALS_PARTITION_OFFSET};
use backfire::infrastructure::drivers::{
    EspLedDriver, EspNorFlashStorageDriver, PinIndicator, get_seed, is_held,
};
use backfire::infrastructure::types::CredentialStore;
use backfire::mk_static;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    #[cfg(feature = "diagnostics")]
    {
        esp_println::logger::init_logger_from_env();
        esp_println::println!("Serial is working");
    }
    info!("backfire {}", BUILD_VERSION);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // The radio driver allocates from the heap
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Throttle indicator and strip first, so the strip is dark during provisioning
    let indicator = PinIndicator::new(backfire::indicator_gpio!(peripherals));
    let driver = match EspLedDriver::new(
        peripherals.RMT,
        backfire::led_gpio!(peripherals),
        APP.strip.color_order,
    ) {
        Ok(driver) => driver,
        Err(e) => panic!("led driver init failed: {:?}", e),
    };

    let flash = FlashStorage::new(peripherals.FLASH);
    let store = mk_static!(
        CredentialStore,
        CredentialStore::new(EspNorFlashStorageDriver::new(flash, CREDENTIALS_PARTITION_OFFSET))
    );
    if is_held(backfire::reset_gpio!(peripherals)) {
        info!("reset button held");
        clear_credentials(store).await;
    }

    match auto_connect(spawner, peripherals.WIFI, &APP, store).await {
        Ok(stack) => {
            if let Some(lease) = stack.config_v4() {
                info!("network: online at {}", lease.address);
            }
        }
        Err(e) => warn!("network: provisioning unavailable: {:?}", e),
    }

    let mut fire = init_fire_loop(&APP, driver, indicator, get_seed());
    fire.run().await
}
