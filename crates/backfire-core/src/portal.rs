//! Hand-off between the portal's form handler and the provisioning flow.

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

use crate::{
    credentials::{CREDENTIALS_RECORD_SIZE, WifiCredentials},
    storage::{PersistentStorage, StorageDriver, StorageError},
};

/// Store submitted credentials and wake the provisioning flow.
///
/// The waiter is signalled as soon as the record is written, before the
/// client has been answered. Nothing is signalled if the write fails.
pub async fn commit_credentials<D, M, const STORAGE_SIZE: usize>(
    store: &PersistentStorage<D, STORAGE_SIZE>,
    saved: &Signal<M, WifiCredentials>,
    credentials: WifiCredentials,
) -> Result<(), StorageError>
where
    D: StorageDriver<STORAGE_SIZE>,
    M: RawMutex,
{
    store
        .save::<CREDENTIALS_RECORD_SIZE, WifiCredentials>(&credentials)
        .await?;
    saved.signal(credentials);
    Ok(())
}
