mod network;
mod portal;

pub use network::{access_point_task, network_runner_task, wifi_connection_task};
pub use portal::{dhcp_server_task, dns_server_task, http_server_task};
