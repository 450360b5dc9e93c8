#![no_std]

//! Hardware-independent pieces of the provisioning flow:
//! credential records and their flash framing, form decoding, handing saved
//! credentials to the boot flow, the DHCP and DNS messages of the captive
//! portal, and network waits.

pub mod credentials;
pub mod dhcp;
pub mod dns;
pub mod form;
pub mod net;
pub mod portal;
pub mod storage;

pub use credentials::{CREDENTIALS_RECORD_SIZE, PASSWORD_MAX_LEN, SSID_MAX_LEN, WifiCredentials};
pub use form::{FormError, parse_credentials_form};
pub use portal::commit_credentials;
pub use storage::{Encodable, PersistentStorage, StorageDriver, StorageError};
