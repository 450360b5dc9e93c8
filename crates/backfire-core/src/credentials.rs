//! Wi-Fi station credentials and their flash record

use bytemuck::{Pod, Zeroable};
use heapless::String;

use crate::storage::Encodable;

/// IEEE 802.11 SSID limit
pub const SSID_MAX_LEN: usize = 32;
/// WPA2 passphrase limit
pub const PASSWORD_MAX_LEN: usize = 64;

/// Credentials for joining a Wi-Fi network
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiCredentials {
    pub ssid: String<SSID_MAX_LEN>,
    pub password: String<PASSWORD_MAX_LEN>,
}

impl WifiCredentials {
    /// Build credentials, returning `None` when a field is too long
    pub fn new(ssid: &str, password: &str) -> Option<Self> {
        Some(Self {
            ssid: String::try_from(ssid).ok()?,
            password: String::try_from(password).ok()?,
        })
    }

    /// Open networks are joined without authentication
    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

#[derive(Clone, Copy, Zeroable, Pod)]
#[repr(C)]
struct CredentialsRecord {
    ssid_len: u8,
    password_len: u8,
    ssid: [u8; SSID_MAX_LEN],
    password: [u8; PASSWORD_MAX_LEN],
}

pub const CREDENTIALS_RECORD_SIZE: usize = size_of::<CredentialsRecord>();

#[allow(clippy::cast_possible_truncation)]
impl Encodable<CREDENTIALS_RECORD_SIZE> for WifiCredentials {
    fn encode(&self) -> [u8; CREDENTIALS_RECORD_SIZE] {
        let mut record = CredentialsRecord::zeroed();
        record.ssid_len = self.ssid.len() as u8;
        record.password_len = self.password.len() as u8;
        record.ssid[..self.ssid.len()].copy_from_slice(self.ssid.as_bytes());
        record.password[..self.password.len()].copy_from_slice(self.password.as_bytes());

        bytemuck::cast(record)
    }

    fn decode(data: &[u8]) -> Option<Self> {
        let record: CredentialsRecord =
            bytemuck::try_pod_read_unaligned(data.get(..CREDENTIALS_RECORD_SIZE)?).ok()?;
        let ssid = record.ssid.get(..usize::from(record.ssid_len))?;
        let password = record.password.get(..usize::from(record.password_len))?;
        if ssid.is_empty() {
            return None;
        }

        Self::new(
            core::str::from_utf8(ssid).ok()?,
            core::str::from_utf8(password).ok()?,
        )
    }
}
