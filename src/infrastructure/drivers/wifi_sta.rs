use core::str::FromStr;

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Stack, StackResources};
use embassy_time::{Duration, Timer, with_timeout};
use esp_radio::wifi::{AuthMethod, ClientConfig, ModeConfig, WifiController, WifiDevice};
use heapless::String;
use log::{info, warn};
use static_cell::make_static;

use backfire_core::{
    WifiCredentials,
    net::{wait_for_connection, wait_for_connection_within},
};

use super::random::get_seed;
use crate::infrastructure::tasks::{network_runner_task, wifi_connection_task};

const MAX_NETWORK_CONNECTIONS: usize = 6;

/// Pause between association attempts while the network is not found
const RETRY_DELAY: Duration = Duration::from_millis(1000);

/// Build the station configuration for `credentials`
pub(crate) fn client_mode(credentials: &WifiCredentials) -> ModeConfig {
    let client_config = ClientConfig::default().with_ssid(credentials.ssid.as_str().into());
    let client_config = if credentials.is_open() {
        client_config.with_auth_method(AuthMethod::None)
    } else {
        client_config.with_password(credentials.password.as_str().into())
    };
    ModeConfig::Client(client_config)
}

/// Join the network described by `credentials`
///
/// Keeps retrying association until `timeout` elapses. On success the
/// network stack is brought up, a background task takes over reconnects,
/// and the stack is returned once DHCP has produced an address.
/// On failure the controller is handed back so the caller can switch modes.
pub async fn start_wifi_sta(
    spawner: Spawner,
    mut controller: WifiController<'static>,
    device: WifiDevice<'static>,
    credentials: WifiCredentials,
    hostname: &str,
    timeout: Duration,
) -> Result<Stack<'static>, WifiController<'static>> {
    if let Err(e) = controller.set_config(&client_mode(&credentials)) {
        warn!("wifi: bad station config: {:?}", e);
        return Err(controller);
    }
    if let Err(e) = controller.start_async().await {
        warn!("wifi: failed to start station: {:?}", e);
        return Err(controller);
    }

    info!("wifi: connecting to '{}'", credentials.ssid.as_str());
    let associated = with_timeout(timeout, async {
        loop {
            match controller.connect_async().await {
                Ok(()) => break,
                Err(e) => {
                    warn!("wifi: connect failed: {:?}", e);
                    Timer::after(RETRY_DELAY).await;
                }
            }
        }
    })
    .await;
    if associated.is_err() {
        warn!("wifi: no connection within {} s", timeout.as_secs());
        return Err(controller);
    }

    let mut dhcp_config = DhcpConfig::default();
    dhcp_config.hostname = String::from_str(hostname).ok();
    let net_config = embassy_net::Config::dhcpv4(dhcp_config);

    let network_resources =
        make_static!(StackResources::<{ MAX_NETWORK_CONNECTIONS }>::new());
    let (stack, runner) = embassy_net::new(device, net_config, network_resources, get_seed());

    spawner.spawn(network_runner_task(runner)).ok();
    spawner
        .spawn(wifi_connection_task(controller, credentials))
        .ok();

    let lease = match wait_for_connection_within(stack, timeout).await {
        Some(lease) => lease,
        None => {
            warn!("wifi: associated but no DHCP lease yet");
            wait_for_connection(stack).await
        }
    };
    info!("wifi: got address {}", lease.address);

    Ok(stack)
}
