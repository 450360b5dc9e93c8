use embassy_executor::Spawner;
use embassy_net::{Ipv4Cidr, Stack, StackResources, StaticConfigV4};
use esp_radio::wifi::{AccessPointConfig, AuthMethod, ModeConfig, WifiController, WifiDevice};
use log::info;
use static_cell::make_static;

use backfire_core::net::wait_for_link;

use super::{random::get_seed, wifi::RadioError};
use crate::{
    config::PortalConfig,
    infrastructure::tasks::{access_point_task, network_runner_task},
};

/// DHCP, DNS and HTTP plus slack for half-open browser connections
const MAX_CONNECTIONS: usize = 8;

/// Bring up an open access point named after the portal
///
/// The controller is handed to a background task that keeps the AP alive.
/// Returns the AP network stack once the link is up.
pub async fn start_wifi_ap(
    spawner: Spawner,
    mut controller: WifiController<'static>,
    device: WifiDevice<'static>,
    portal: &PortalConfig,
) -> Result<Stack<'static>, RadioError> {
    if matches!(controller.is_started(), Ok(true)) {
        controller.stop_async().await?;
    }

    let ap_config = AccessPointConfig::default()
        .with_ssid(portal.ap_name.into())
        .with_auth_method(AuthMethod::None);
    controller.set_config(&ModeConfig::AccessPoint(ap_config))?;
    controller.start_async().await?;
    spawner.spawn(access_point_task(controller)).ok();
    info!("wifi: access point '{}' started", portal.ap_name);

    let static_config = StaticConfigV4 {
        address: Ipv4Cidr::new(portal.ip_address, portal.prefix_len),
        gateway: Some(portal.ip_address),
        dns_servers: heapless::Vec::default(),
    };
    let net_config = embassy_net::Config::ipv4_static(static_config);

    let network_resources = make_static!(StackResources::<MAX_CONNECTIONS>::new());
    let (stack, runner) = embassy_net::new(device, net_config, network_resources, get_seed());
    spawner.spawn(network_runner_task(runner)).ok();

    wait_for_link(stack).await;

    Ok(stack)
}
