//! Framed records on a raw storage region
//!
//! A record is stored as a little-endian magic header followed by the
//! encoded payload. Anything without the header (erased flash reads as
//! `0xFF`) is reported as [`StorageError::InvalidMagicHeader`].

use log::warn;

const MAGIC_HEADER: u16 = 0xF1AE;
pub const MAGIC_HEADER_SIZE: usize = MAGIC_HEADER.to_le_bytes().len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The underlying driver failed
    DriverError,
    /// No record has been written yet
    InvalidMagicHeader,
    /// A record exists but does not decode
    InvalidData,
}

/// Fixed-size binary encoding of a stored value
pub trait Encodable<const SIZE: usize>
where
    Self: Sized,
{
    fn encode(&self) -> [u8; SIZE];
    fn decode(data: &[u8]) -> Option<Self>;
}

/// Raw access to one storage region of `STORAGE_SIZE` bytes
#[allow(async_fn_in_trait)]
pub trait StorageDriver<const STORAGE_SIZE: usize> {
    async fn read(&self, buffer: &mut [u8]) -> Result<(), StorageError>;
    async fn write(&self, buffer: &[u8]) -> Result<(), StorageError>;
    async fn erase(&self) -> Result<(), StorageError>;
}

/// Persistent storage implementation using a storage driver.
pub struct PersistentStorage<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize> {
    driver: DRIVER,
}

impl<DRIVER: StorageDriver<STORAGE_SIZE>, const STORAGE_SIZE: usize>
    PersistentStorage<DRIVER, STORAGE_SIZE>
{
    pub const fn new(driver: DRIVER) -> Self {
        Self { driver }
    }

    /// Load a record
    pub async fn load<const SIZE: usize, T: Encodable<SIZE>>(&self) -> Result<T, StorageError> {
        let mut buffer = [0u8; STORAGE_SIZE];
        self.driver.read(&mut buffer).await?;

        let (header, payload) = buffer.split_at(MAGIC_HEADER_SIZE);
        if header != MAGIC_HEADER.to_le_bytes() {
            return Err(StorageError::InvalidMagicHeader);
        }
        payload.get(..SIZE).and_then(T::decode).ok_or_else(|| {
            warn!("storage: stored record does not decode");
            StorageError::InvalidData
        })
    }

    /// Save a record, replacing the previous one
    pub async fn save<const SIZE: usize, T: Encodable<SIZE>>(
        &self,
        value: &T,
    ) -> Result<(), StorageError> {
        let mut data = [0u8; STORAGE_SIZE];
        let (header, payload) = data.split_at_mut(MAGIC_HEADER_SIZE);
        header.copy_from_slice(&MAGIC_HEADER.to_le_bytes());
        payload
            .get_mut(..SIZE)
            .ok_or(StorageError::InvalidData)?
            .copy_from_slice(&value.encode());

        self.driver.write(&data).await
    }

    /// Forget the stored record
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.driver.erase().await
    }
}
