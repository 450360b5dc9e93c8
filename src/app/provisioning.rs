//! Wi-Fi provisioning
//!
//! Join the stored network if there is one. Otherwise open the `BackFire`
//! access point, serve the credential form, and restart once the user
//! has saved a network.

use embassy_executor::Spawner;
use embassy_net::Stack;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer, with_timeout};
use esp_hal::peripherals::WIFI;
use esp_radio::wifi::{WifiController, WifiDevice};
use log::{info, warn};

use backfire_core::{CREDENTIALS_RECORD_SIZE, StorageError, WifiCredentials};

use crate::{
    config::AppConfig,
    controllers::{PortalHttpController, PortalSignal},
    infrastructure::{
        drivers::{RadioError, init_radio, start_wifi_ap, start_wifi_sta},
        tasks::{dhcp_server_task, dns_server_task, http_server_task},
        types::CredentialStore,
    },
    mk_static,
};

/// Time for the confirmation page to reach the browser before restarting
const RESTART_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum ProvisioningError {
    Radio(RadioError),
}

impl From<RadioError> for ProvisioningError {
    fn from(err: RadioError) -> Self {
        ProvisioningError::Radio(err)
    }
}

/// Connect to Wi-Fi, falling back to the captive portal
///
/// Returns the station network stack. The portal path never returns:
/// it restarts the device once credentials are saved or the portal
/// times out.
pub async fn auto_connect(
    spawner: Spawner,
    wifi: WIFI<'static>,
    config: &'static AppConfig,
    store: &'static CredentialStore,
) -> Result<Stack<'static>, ProvisioningError> {
    let (controller, interfaces) = init_radio(wifi)?;

    let controller = match load_credentials(store).await {
        Some(credentials) => {
            match start_wifi_sta(
                spawner,
                controller,
                interfaces.sta,
                credentials,
                config.portal.hostname,
                config.portal.connect_timeout,
            )
            .await
            {
                Ok(stack) => return Ok(stack),
                Err(controller) => controller,
            }
        }
        None => controller,
    };

    run_portal(spawner, controller, interfaces.ap, config, store).await
}

/// Erase stored credentials so the next boot opens the portal
pub async fn clear_credentials(store: &CredentialStore) {
    match store.clear().await {
        Ok(()) => info!("provisioning: stored credentials erased"),
        Err(e) => warn!("provisioning: failed to erase credentials: {:?}", e),
    }
}

async fn load_credentials(store: &CredentialStore) -> Option<WifiCredentials> {
    match store.load::<CREDENTIALS_RECORD_SIZE, WifiCredentials>().await {
        Ok(credentials) => Some(credentials),
        Err(StorageError::InvalidMagicHeader) => {
            info!("provisioning: no stored credentials");
            None
        }
        Err(e) => {
            warn!("provisioning: stored credentials unusable: {:?}", e);
            None
        }
    }
}

async fn run_portal(
    spawner: Spawner,
    controller: WifiController<'static>,
    device: WifiDevice<'static>,
    config: &'static AppConfig,
    store: &'static CredentialStore,
) -> Result<Stack<'static>, ProvisioningError> {
    let portal = &config.portal;
    let stack = start_wifi_ap(spawner, controller, device, portal).await?;

    spawner.spawn(dhcp_server_task(stack, portal.ip_address)).ok();
    spawner.spawn(dns_server_task(stack, portal.ip_address)).ok();

    let saved = mk_static!(PortalSignal, Signal::new());
    let handler = mk_static!(
        PortalHttpController,
        PortalHttpController::new(config, store, saved)
    );
    spawner.spawn(http_server_task(stack, handler)).ok();

    info!(
        "provisioning: portal open, join '{}' and browse to http://{}/",
        portal.ap_name, portal.ip_address
    );

    match portal.portal_timeout {
        Some(timeout) => {
            if with_timeout(timeout, saved.wait()).await.is_err() {
                info!("provisioning: portal timed out");
            }
        }
        None => {
            saved.wait().await;
        }
    }

    Timer::after(RESTART_DELAY).await;
    info!("provisioning: restarting");
    esp_hal::system::software_reset()
}
