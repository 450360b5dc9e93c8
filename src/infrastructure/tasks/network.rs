use embassy_net::Runner;
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{WifiController, WifiDevice, WifiEvent, WifiStaState};
use log::{info, warn};

use backfire_core::WifiCredentials;

use crate::infrastructure::drivers::client_mode;

/// Keeps the station associated once provisioning has succeeded
///
/// Waits for a disconnect and then retries until the network is back.
#[embassy_executor::task]
pub async fn wifi_connection_task(
    mut controller: WifiController<'static>,
    credentials: WifiCredentials,
) {
    loop {
        if esp_radio::wifi::sta_state() == WifiStaState::Connected {
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("network: disconnected");
            Timer::after(Duration::from_millis(2000)).await;
        }
        if !matches!(controller.is_started(), Ok(true)) {
            if let Err(e) = controller.set_config(&client_mode(&credentials)) {
                warn!("network: bad station config: {:?}", e);
                Timer::after(Duration::from_millis(5000)).await;
                continue;
            }
            if let Err(e) = controller.start_async().await {
                warn!("network: failed to start station: {:?}", e);
                Timer::after(Duration::from_millis(5000)).await;
                continue;
            }
        }

        info!("network: reconnecting");
        if let Err(e) = controller.connect_async().await {
            warn!("network: error connecting: {:?}", e);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

/// Owns the controller while the provisioning access point is up
#[embassy_executor::task]
pub async fn access_point_task(mut controller: WifiController<'static>) {
    loop {
        controller.wait_for_event(WifiEvent::ApStop).await;
        warn!("network: access point stopped, restarting");
        if let Err(e) = controller.start_async().await {
            warn!("network: failed to restart access point: {:?}", e);
            Timer::after(Duration::from_millis(5000)).await;
        }
    }
}

/// Background task for running the network stack
#[embassy_executor::task]
pub async fn network_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}
