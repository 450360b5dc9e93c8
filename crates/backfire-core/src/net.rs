use embassy_net::{Stack, StaticConfigV4};
use embassy_time::{Duration, Timer, with_timeout};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait for the network link to become active
pub async fn wait_for_link(stack: Stack<'_>) {
    while !stack.is_link_up() {
        Timer::after(POLL_INTERVAL).await;
    }
}

/// Wait for the link and a DHCP lease
/// Returns the leased IPv4 configuration
pub async fn wait_for_connection(stack: Stack<'_>) -> StaticConfigV4 {
    wait_for_link(stack).await;
    loop {
        if let Some(config) = stack.config_v4() {
            return config;
        }
        Timer::after(POLL_INTERVAL).await;
    }
}

/// Like [`wait_for_connection`], giving up after `timeout`
pub async fn wait_for_connection_within(
    stack: Stack<'_>,
    timeout: Duration,
) -> Option<StaticConfigV4> {
    with_timeout(timeout, wait_for_connection(stack)).await.ok()
}
