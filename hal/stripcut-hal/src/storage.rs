//! Persistent storage abstractions
//!
//! The machine keeps its records at fixed byte offsets, the way an
//! EEPROM is used on small controllers. Implementations map those offsets
//! onto whatever non-volatile memory the chip has.

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access outside the storage window
    OutOfBounds,
    /// Underlying device operation failed
    Device,
}

/// Byte-addressable persistent storage
///
/// No transactional guarantees: a power loss during [`write`](Self::write)
/// leaves the affected bytes undefined.
pub trait ByteStorage {
    /// Size of the addressable window in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError>;

    /// Check that `len` bytes starting at `offset` fit in the window
    fn check_bounds(&self, offset: usize, len: usize) -> Result<(), StorageError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.capacity() => Ok(()),
            _ => Err(StorageError::OutOfBounds),
        }
    }
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        (**self).read(offset, buffer)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(offset, data)
    }
}
