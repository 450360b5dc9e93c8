//! Minimal stateless DHCP server messages
//!
//! Enough of DHCP to hand out addresses on the provisioning access point:
//! DISCOVER is answered with OFFER, REQUEST with ACK, and the address is
//! derived from the client MAC so repeated requests get the same lease.

use embassy_net::Ipv4Address;

/// DHCP message types
pub const DHCP_DISCOVER: u8 = 1;
pub const DHCP_OFFER: u8 = 2;
pub const DHCP_REQUEST: u8 = 3;
pub const DHCP_ACK: u8 = 5;

/// Ports
pub const DHCP_SERVER_PORT: u16 = 67;
pub const DHCP_CLIENT_PORT: u16 = 68;

/// DHCP options
const DHCP_OPTION_SUBNET_MASK: u8 = 1;
const DHCP_OPTION_ROUTER: u8 = 3;
const DHCP_OPTION_DNS: u8 = 6;
const DHCP_OPTION_LEASE_TIME: u8 = 51;
const DHCP_OPTION_MESSAGE_TYPE: u8 = 53;
const DHCP_OPTION_SERVER_ID: u8 = 54;
const DHCP_OPTION_PAD: u8 = 0;
const DHCP_OPTION_END: u8 = 255;

const BOOTREQUEST: u8 = 1;
const BOOTREPLY: u8 = 2;
const HTYPE_ETHERNET: u8 = 1;

const DHCP_MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];

const LEASE_TIME_SECS: u32 = 3600;

/// BOOTP header + magic cookie
pub const MIN_DHCP_PACKET_SIZE: usize = 240;
/// Largest reply [`build_dhcp_response`] produces
pub const MAX_DHCP_RESPONSE_SIZE: usize = MIN_DHCP_PACKET_SIZE + 3 + 5 * 6 + 1;

/// First and last host number handed out
const POOL_FIRST: u8 = 2;
const POOL_SIZE: u8 = 49;

/// Parsed DHCP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpRequest {
    /// Transaction ID
    pub xid: [u8; 4],
    /// Client MAC address
    pub client_mac: [u8; 6],
    /// Message type (DISCOVER, REQUEST, etc.)
    pub message_type: u8,
}

impl DhcpRequest {
    /// Message type to answer with, `None` for messages this server ignores
    pub const fn response_type(&self) -> Option<u8> {
        match self.message_type {
            DHCP_DISCOVER => Some(DHCP_OFFER),
            DHCP_REQUEST => Some(DHCP_ACK),
            _ => None,
        }
    }
}

/// Parse a DHCP request from a raw packet
///
/// Returns `None` if the packet is invalid or not a BOOTREQUEST
pub fn parse_dhcp_request(packet: &[u8]) -> Option<DhcpRequest> {
    if packet.len() < MIN_DHCP_PACKET_SIZE || packet[0] != BOOTREQUEST {
        return None;
    }
    if packet[236..240] != DHCP_MAGIC_COOKIE {
        return None;
    }

    let mut xid = [0u8; 4];
    xid.copy_from_slice(&packet[4..8]);
    let mut client_mac = [0u8; 6];
    client_mac.copy_from_slice(&packet[28..34]);

    let message_type = find_dhcp_option(&packet[240..], DHCP_OPTION_MESSAGE_TYPE)
        .and_then(|data| data.first().copied())?;

    Some(DhcpRequest {
        xid,
        client_mac,
        message_type,
    })
}

/// Derive a client address in the server's /24 from the client MAC.
///
/// Host numbers range from 2 to 50.
pub fn allocate_ip(server: Ipv4Address, mac: &[u8; 6]) -> Ipv4Address {
    let [a, b, c, _] = server.octets();
    Ipv4Address::new(a, b, c, mac[5] % POOL_SIZE + POOL_FIRST)
}

/// Build a DHCP response (OFFER or ACK) into `buffer`
///
/// The server advertises itself as router and DNS server, which is what
/// makes clients send their captive-portal probes to it.
/// Returns the length of the response, or `None` if `buffer` is too small.
pub fn build_dhcp_response(
    server: Ipv4Address,
    buffer: &mut [u8],
    request: &DhcpRequest,
    offered_ip: Ipv4Address,
    response_type: u8,
) -> Option<usize> {
    let buffer = buffer.get_mut(..MAX_DHCP_RESPONSE_SIZE)?;
    buffer.fill(0);

    buffer[0] = BOOTREPLY;
    buffer[1] = HTYPE_ETHERNET;
    buffer[2] = 6; // hlen
    buffer[4..8].copy_from_slice(&request.xid);
    buffer[10..12].copy_from_slice(&[0x80, 0x00]); // broadcast flag
    buffer[16..20].copy_from_slice(&offered_ip.octets()); // yiaddr
    buffer[20..24].copy_from_slice(&server.octets()); // siaddr
    buffer[28..34].copy_from_slice(&request.client_mac);
    buffer[236..240].copy_from_slice(&DHCP_MAGIC_COOKIE);

    let mut options = OptionWriter {
        buffer: &mut buffer[240..],
        position: 0,
    };
    options.put(DHCP_OPTION_MESSAGE_TYPE, &[response_type]);
    options.put(DHCP_OPTION_SERVER_ID, &server.octets());
    options.put(DHCP_OPTION_LEASE_TIME, &LEASE_TIME_SECS.to_be_bytes());
    options.put(DHCP_OPTION_SUBNET_MASK, &[255, 255, 255, 0]);
    options.put(DHCP_OPTION_ROUTER, &server.octets());
    options.put(DHCP_OPTION_DNS, &server.octets());
    options.buffer[options.position] = DHCP_OPTION_END;

    Some(240 + options.position + 1)
}

struct OptionWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl OptionWriter<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn put(&mut self, code: u8, data: &[u8]) {
        let start = self.position;
        self.buffer[start] = code;
        self.buffer[start + 1] = data.len() as u8;
        self.buffer[start + 2..start + 2 + data.len()].copy_from_slice(data);
        self.position += 2 + data.len();
    }
}

/// Find a DHCP option in the options section (after the magic cookie)
fn find_dhcp_option(options: &[u8], option_code: u8) -> Option<&[u8]> {
    let mut i = 0;
    while let Some(&code) = options.get(i) {
        match code {
            DHCP_OPTION_END => break,
            DHCP_OPTION_PAD => i += 1,
            _ => {
                let len = usize::from(*options.get(i + 1)?);
                let data = options.get(i + 2..i + 2 + len)?;
                if code == option_code {
                    return Some(data);
                }
                i += 2 + len;
            }
        }
    }
    None
}
