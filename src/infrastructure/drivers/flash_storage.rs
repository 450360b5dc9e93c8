//! Flash storage driver for the credential partition.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embedded_storage::nor_flash::{NorFlash, ReadNorFlash};
use esp_storage::FlashStorage;

use backfire_core::{StorageDriver, StorageError};

/// Flash erase granularity
pub(crate) const SECTOR_SIZE: u32 = 4096;

/// Storage driver confined to one flash sector at `offset`
pub struct EspNorFlashStorageDriver<const SIZE: usize> {
    flash: Mutex<CriticalSectionRawMutex, RefCell<FlashStorage<'static>>>,
    offset: u32,
}

impl<const SIZE: usize> EspNorFlashStorageDriver<SIZE> {
    pub fn new(flash: FlashStorage<'static>, offset: u32) -> Self {
        Self {
            flash: Mutex::new(RefCell::new(flash)),
            offset,
        }
    }
}

impl<const SIZE: usize> StorageDriver<SIZE> for EspNorFlashStorageDriver<SIZE> {
    async fn read(&self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.flash.lock(|flash| {
            flash
                .borrow_mut()
                .read(self.offset, buffer)
                .map_err(|_| StorageError::DriverError)
        })
    }

    async fn write(&self, buffer: &[u8]) -> Result<(), StorageError> {
        self.flash.lock(|flash| {
            let mut flash = flash.borrow_mut();
            flash
                .erase(self.offset, self.offset + SECTOR_SIZE)
                .map_err(|_| StorageError::DriverError)?;
            flash
                .write(self.offset, buffer)
                .map_err(|_| StorageError::DriverError)
        })
    }

    async fn erase(&self) -> Result<(), StorageError> {
        self.flash.lock(|flash| {
            flash
                .borrow_mut()
                .erase(self.offset, self.offset + SECTOR_SIZE)
                .map_err(|_| StorageError::DriverError)
        })
    }
}
