//! DHCP server messages of the provisioning access point.

use backfire_core::dhcp::{
    DHCP_ACK,
    DHCP_DISCOVER,
    DHCP_OFFER,
    DHCP_REQUEST,
    MAX_DHCP_RESPONSE_SIZE,
    MIN_DHCP_PACKET_SIZE,
    allocate_ip,
    build_dhcp_response,
    parse_dhcp_request,
};
use embassy_net::Ipv4Address;

const SERVER: Ipv4Address = Ipv4Address::new(192, 168, 4, 1);
const MAC: [u8; 6] = [0x02, 0x11, 0x22, 0x33, 0x44, 0x10];
const XID: [u8; 4] = [0xDE, 0xAD, 0xBE, 0xEF];

fn client_packet(message_type: u8) -> Vec<u8> {
    let mut packet = vec![0u8; MIN_DHCP_PACKET_SIZE];
    packet[0] = 1; // BOOTREQUEST
    packet[1] = 1;
    packet[2] = 6;
    packet[4..8].copy_from_slice(&XID);
    packet[28..34].copy_from_slice(&MAC);
    packet[236..240].copy_from_slice(&[99, 130, 83, 99]);
    // pad, hostname, message type, end
    packet.extend_from_slice(&[0, 12, 3, b'p', b'h', b'n', 53, 1, message_type, 255]);
    packet
}

/// Options of a reply as (code, data) pairs
fn options(reply: &[u8]) -> Vec<(u8, Vec<u8>)> {
    let mut found = Vec::new();
    let mut i = MIN_DHCP_PACKET_SIZE;
    while reply[i] != 255 {
        let len = usize::from(reply[i + 1]);
        found.push((reply[i], reply[i + 2..i + 2 + len].to_vec()));
        i += 2 + len;
    }
    found
}

// -----------------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------------

#[test]
fn discover_is_parsed() {
    let request = parse_dhcp_request(&client_packet(DHCP_DISCOVER)).unwrap();
    assert_eq!(request.xid, XID);
    assert_eq!(request.client_mac, MAC);
    assert_eq!(request.message_type, DHCP_DISCOVER);
    assert_eq!(request.response_type(), Some(DHCP_OFFER));
}

#[test]
fn request_is_acked() {
    let request = parse_dhcp_request(&client_packet(DHCP_REQUEST)).unwrap();
    assert_eq!(request.response_type(), Some(DHCP_ACK));
}

#[test]
fn release_is_ignored() {
    let request = parse_dhcp_request(&client_packet(7)).unwrap();
    assert_eq!(request.response_type(), None);
}

#[test]
fn malformed_packets_are_rejected() {
    let packet = client_packet(DHCP_DISCOVER);
    assert!(parse_dhcp_request(&packet[..MIN_DHCP_PACKET_SIZE - 1]).is_none());

    let mut reply = packet.clone();
    reply[0] = 2;
    assert!(parse_dhcp_request(&reply).is_none());

    let mut no_cookie = packet.clone();
    no_cookie[236] = 0;
    assert!(parse_dhcp_request(&no_cookie).is_none());

    // message type option cut short
    let truncated = &packet[..packet.len() - 2];
    assert!(parse_dhcp_request(truncated).is_none());
}

#[test]
fn packet_without_message_type_is_rejected() {
    let mut packet = client_packet(DHCP_DISCOVER);
    packet.truncate(MIN_DHCP_PACKET_SIZE);
    packet.push(255);
    assert!(parse_dhcp_request(&packet).is_none());
}

// -----------------------------------------------------------------------------
// Allocation
// -----------------------------------------------------------------------------

#[test]
fn address_follows_the_mac() {
    assert_eq!(allocate_ip(SERVER, &MAC), Ipv4Address::new(192, 168, 4, 18));
    assert_eq!(allocate_ip(SERVER, &MAC), allocate_ip(SERVER, &MAC));
}

#[test]
fn addresses_stay_in_pool() {
    for last in 0..=255u8 {
        let mac = [0, 0, 0, 0, 0, last];
        let [a, b, c, d] = allocate_ip(SERVER, &mac).octets();
        assert_eq!([a, b, c], [192, 168, 4]);
        assert!((2..=50).contains(&d), "{last} -> {d}");
    }
}

// -----------------------------------------------------------------------------
// Replies
// -----------------------------------------------------------------------------

#[test]
fn offer_carries_lease_and_portal_address() {
    let request = parse_dhcp_request(&client_packet(DHCP_DISCOVER)).unwrap();
    let offered = allocate_ip(SERVER, &request.client_mac);
    let mut buffer = [0u8; 576];

    let len = build_dhcp_response(SERVER, &mut buffer, &request, offered, DHCP_OFFER).unwrap();
    let reply = &buffer[..len];

    assert_eq!(len, MAX_DHCP_RESPONSE_SIZE);
    assert_eq!(reply[0], 2);
    assert_eq!(&reply[4..8], &XID);
    assert_eq!(&reply[16..20], &offered.octets());
    assert_eq!(&reply[20..24], &SERVER.octets());
    assert_eq!(&reply[28..34], &MAC);
    assert_eq!(&reply[236..240], &[99, 130, 83, 99]);

    let server = SERVER.octets().to_vec();
    assert_eq!(
        options(reply),
        vec![
            (53, vec![DHCP_OFFER]),
            (54, server.clone()),
            (51, 3600u32.to_be_bytes().to_vec()),
            (1, vec![255, 255, 255, 0]),
            (3, server.clone()),
            (6, server),
        ]
    );
}

#[test]
fn reply_needs_room() {
    let request = parse_dhcp_request(&client_packet(DHCP_REQUEST)).unwrap();
    let mut buffer = [0u8; MAX_DHCP_RESPONSE_SIZE - 1];
    assert!(build_dhcp_response(SERVER, &mut buffer, &request, SERVER, DHCP_ACK).is_none());
}
