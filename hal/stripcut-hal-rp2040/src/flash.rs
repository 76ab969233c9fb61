//! Flash storage driver for RP2040
//!
//! Emulates a small EEPROM in the last erase sector of flash. The sector
//! is mirrored in RAM; reads come from the mirror and every write that
//! changes it erases and reprograms the whole sector.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use stripcut_hal::{ByteStorage, StorageError};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on Pico-class boards

/// Offset of the storage sector from the start of flash
pub const SECTOR_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// RP2040 flash-sector storage
pub struct FlashStorage<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    mirror: [u8; ERASE_SIZE],
}

impl<'d> FlashStorage<'d> {
    /// Take the flash peripheral and load the storage sector
    pub fn new(flash: Peri<'d, FLASH>) -> Result<Self, StorageError> {
        let mut storage = Self {
            flash: Flash::new_blocking(flash),
            mirror: [0xFF; ERASE_SIZE],
        };
        storage
            .flash
            .blocking_read(SECTOR_OFFSET, &mut storage.mirror)
            .map_err(|_| StorageError::Device)?;
        Ok(storage)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        let end = SECTOR_OFFSET + ERASE_SIZE as u32;
        self.flash
            .blocking_erase(SECTOR_OFFSET, end)
            .map_err(|_| StorageError::Device)?;
        self.flash
            .blocking_write(SECTOR_OFFSET, &self.mirror)
            .map_err(|_| StorageError::Device)
    }
}

impl<'d> ByteStorage for FlashStorage<'d> {
    fn capacity(&self) -> usize {
        ERASE_SIZE
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, buffer.len())?;
        buffer.copy_from_slice(&self.mirror[offset..offset + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        self.check_bounds(offset, data.len())?;
        let target = &mut self.mirror[offset..offset + data.len()];
        if target == data {
            return Ok(());
        }
        target.copy_from_slice(data);
        self.commit()
    }
}
