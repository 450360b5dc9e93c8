//! `application/x-www-form-urlencoded` decoding for the credential form

use heapless::String;

use crate::credentials::{PASSWORD_MAX_LEN, SSID_MAX_LEN, WifiCredentials};

/// Form field carrying the network name
pub const SSID_FIELD: &str = "s";
/// Form field carrying the passphrase
pub const PASSWORD_FIELD: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// No SSID, or an empty one
    MissingSsid,
    /// A decoded value does not fit its field
    ValueTooLong,
    /// Broken percent escape or non UTF-8 text
    InvalidEncoding,
}

/// Parse the body posted by the credential form
///
/// Unknown fields are ignored. A missing password means an open network.
pub fn parse_credentials_form(body: &[u8]) -> Result<WifiCredentials, FormError> {
    let body = core::str::from_utf8(body).map_err(|_| FormError::InvalidEncoding)?;

    let mut credentials = WifiCredentials::default();
    let mut has_ssid = false;
    for pair in body.trim_end_matches(['\r', '\n']).split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            SSID_FIELD => {
                credentials.ssid = decode_component::<SSID_MAX_LEN>(value)?;
                has_ssid = !credentials.ssid.is_empty();
            }
            PASSWORD_FIELD => {
                credentials.password = decode_component::<PASSWORD_MAX_LEN>(value)?;
            }
            _ => {}
        }
    }

    if !has_ssid {
        return Err(FormError::MissingSsid);
    }
    Ok(credentials)
}

/// Percent-decode one form value, mapping `+` to a space
pub fn decode_component<const N: usize>(value: &str) -> Result<String<N>, FormError> {
    let mut bytes = heapless::Vec::<u8, N>::new();
    let mut input = value.bytes();
    while let Some(byte) = input.next() {
        let decoded = match byte {
            b'+' => b' ',
            b'%' => {
                let high = input.next().and_then(hex_value);
                let low = input.next().and_then(hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => (high << 4) | low,
                    _ => return Err(FormError::InvalidEncoding),
                }
            }
            other => other,
        };
        bytes.push(decoded).map_err(|_| FormError::ValueTooLong)?;
    }

    String::from_utf8(bytes).map_err(|_| FormError::InvalidEncoding)
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
