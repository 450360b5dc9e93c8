use backfire_core::{CREDENTIALS_RECORD_SIZE, PersistentStorage, storage::MAGIC_HEADER_SIZE};
use fire_composer::{FireEffect, FrameLoop};

use crate::{
    config::LED_COUNT,
    infrastructure::drivers::{EspLedDriver, EspNorFlashStorageDriver, PinIndicator},
};

/// Bytes read and written per credential record, a multiple of the flash word
pub const CREDENTIALS_STORAGE_SIZE: usize = 128;

const _: () = assert!(MAGIC_HEADER_SIZE + CREDENTIALS_RECORD_SIZE <= CREDENTIALS_STORAGE_SIZE);

pub type CredentialStorageDriver = EspNorFlashStorageDriver<CREDENTIALS_STORAGE_SIZE>;
pub type CredentialStore = PersistentStorage<CredentialStorageDriver, CREDENTIALS_STORAGE_SIZE>;

pub type FireLoop =
    FrameLoop<EspLedDriver<'static>, PinIndicator<'static>, FireEffect<LED_COUNT>, LED_COUNT>;
