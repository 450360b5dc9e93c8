//! Servers of the provisioning access point

use embassy_net::{
    Ipv4Address,
    Stack,
    udp::{PacketMetadata, UdpSocket},
};
use log::{debug, info, warn};

use backfire_core::{
    dhcp::{DHCP_CLIENT_PORT, DHCP_SERVER_PORT, allocate_ip, build_dhcp_response, parse_dhcp_request},
    dns::{DNS_PORT, build_dns_response},
};

use crate::{controllers::PortalHttpController, net::http::HttpServer};

const HTTP_PORT: u16 = 80;
const HTTP_RX_BUFFER_SIZE: usize = 2048;
const HTTP_TX_BUFFER_SIZE: usize = 2048;

/// DHCP server task
///
/// Answers DISCOVER with OFFER and REQUEST with ACK. Addresses are derived
/// from the client MAC, so no lease table is kept.
#[embassy_executor::task]
pub async fn dhcp_server_task(stack: Stack<'static>, server_ip: Ipv4Address) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buffer, &mut tx_meta, &mut tx_buffer);

    if let Err(e) = socket.bind(DHCP_SERVER_PORT) {
        warn!("dhcp_server: failed to bind port {}: {:?}", DHCP_SERVER_PORT, e);
        return;
    }
    info!("dhcp_server: listening on port {}", DHCP_SERVER_PORT);

    let mut packet = [0u8; 576];

    loop {
        let len = match socket.recv_from(&mut packet).await {
            Ok((len, _remote)) => len,
            Err(e) => {
                warn!("dhcp_server: recv error: {:?}", e);
                continue;
            }
        };

        let Some(request) = parse_dhcp_request(&packet[..len]) else {
            continue;
        };
        let Some(response_type) = request.response_type() else {
            debug!("dhcp_server: ignoring message type {}", request.message_type);
            continue;
        };

        let offered_ip = allocate_ip(server_ip, &request.client_mac);
        let Some(response_len) =
            build_dhcp_response(server_ip, &mut packet, &request, offered_ip, response_type)
        else {
            continue;
        };
        debug!("dhcp_server: type {} -> {}", request.message_type, offered_ip);

        let dest = (Ipv4Address::BROADCAST, DHCP_CLIENT_PORT);
        if let Err(e) = socket.send_to(&packet[..response_len], dest).await {
            warn!("dhcp_server: send error: {:?}", e);
        }
    }
}

/// DNS server task
///
/// Resolves every name to the portal address.
#[embassy_executor::task]
pub async fn dns_server_task(stack: Stack<'static>, server_ip: Ipv4Address) {
    let mut rx_meta = [PacketMetadata::EMPTY; 8];
    let mut rx_buffer = [0u8; 1024];
    let mut tx_meta = [PacketMetadata::EMPTY; 8];
    let mut tx_buffer = [0u8; 1024];

    let mut socket = UdpSocket::new(stack, &mut rx_meta, &mut rx_buffer, &mut tx_meta, &mut tx_buffer);

    if let Err(e) = socket.bind(DNS_PORT) {
        warn!("dns_server: failed to bind port {}: {:?}", DNS_PORT, e);
        return;
    }
    info!("dns_server: listening on port {}", DNS_PORT);

    let mut query = [0u8; 512];
    let mut reply = [0u8; 512];

    loop {
        let (len, remote) = match socket.recv_from(&mut query).await {
            Ok(received) => received,
            Err(e) => {
                warn!("dns_server: recv error: {:?}", e);
                continue;
            }
        };

        let Some(reply_len) = build_dns_response(&query[..len], server_ip, &mut reply) else {
            continue;
        };
        if let Err(e) = socket.send_to(&reply[..reply_len], remote).await {
            warn!("dns_server: send error: {:?}", e);
        }
    }
}

#[embassy_executor::task]
pub async fn http_server_task(stack: Stack<'static>, handler: &'static PortalHttpController) {
    let mut rx_buffer = [0u8; HTTP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; HTTP_TX_BUFFER_SIZE];

    info!("http_server: listening on port {}", HTTP_PORT);
    HttpServer::new(handler)
        .listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await
}
