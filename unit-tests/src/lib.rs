//! Host-side doubles for the hardware traits of `fire-composer` and
//! `backfire-core`, shared by the integration tests in `tests/`.

use std::cell::RefCell;

use backfire_core::{StorageDriver, StorageError};
use fire_composer::{DriverError, LedDriver, Rgb, ThrottleIndicator};

/// Driver that keeps a copy of every frame it is given
#[derive(Debug, Default)]
pub struct RecordingDriver<const N: usize> {
    pub frames: Vec<[Rgb; N]>,
}

impl<const N: usize> LedDriver<N> for RecordingDriver<N> {
    fn write(&mut self, colors: &[Rgb; N]) -> Result<(), DriverError> {
        self.frames.push(*colors);
        Ok(())
    }
}

/// Driver whose every write fails
#[derive(Debug, Default)]
pub struct FailingDriver {
    pub attempts: usize,
}

impl<const N: usize> LedDriver<N> for FailingDriver {
    fn write(&mut self, _colors: &[Rgb; N]) -> Result<(), DriverError> {
        self.attempts += 1;
        Err(DriverError::Write)
    }
}

/// Indicator that remembers each level it was set to
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub levels: Vec<bool>,
}

impl RecordingIndicator {
    pub fn current(&self) -> Option<bool> {
        self.levels.last().copied()
    }
}

impl ThrottleIndicator for RecordingIndicator {
    fn set_throttled(&mut self, throttled: bool) {
        self.levels.push(throttled);
    }
}

/// RAM-backed storage region that starts out erased
pub struct MemoryStorage<const SIZE: usize> {
    pub data: RefCell<[u8; SIZE]>,
    pub broken: bool,
}

impl<const SIZE: usize> MemoryStorage<SIZE> {
    pub fn erased() -> Self {
        Self {
            data: RefCell::new([0xFF; SIZE]),
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::erased()
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.broken {
            Err(StorageError::DriverError)
        } else {
            Ok(())
        }
    }
}

impl<const SIZE: usize> StorageDriver<SIZE> for MemoryStorage<SIZE> {
    async fn read(&self, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check()?;
        let data = self.data.borrow();
        buffer.copy_from_slice(&data[..buffer.len()]);
        Ok(())
    }

    async fn write(&self, buffer: &[u8]) -> Result<(), StorageError> {
        self.check()?;
        let mut data = self.data.borrow_mut();
        data.fill(0xFF);
        data[..buffer.len()].copy_from_slice(buffer);
        Ok(())
    }

    async fn erase(&self) -> Result<(), StorageError> {
        self.check()?;
        self.data.borrow_mut().fill(0xFF);
        Ok(())
    }
}
