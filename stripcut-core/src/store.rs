//! Persistent store
//!
//! Typed records at fixed byte offsets on top of [`ByteStorage`]:
//!
//! ```text
//! offset  0   format marker (u16, little endian)
//! offset 10   primary record: job A + motion profile
//! offset 20   job B
//! offset 30   job C
//! offset 40   job D
//! ```
//!
//! Records are postcard-encoded into fixed 10-byte slots. Nothing guards
//! against a power loss mid-write; the marker only tells a seeded store
//! from a blank one.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stripcut_hal::{ByteStorage, StorageError};

use crate::model::{JobSet, Model, MotionProfile, StripJob, MAX_JOBS};

/// Format marker for the job + shared-profile layout
pub const FORMAT_MARKER: u16 = 0xBCD8;

/// Offset of the format marker
pub const MARKER_OFFSET: usize = 0;

/// Offset of the primary record
pub const PRIMARY_OFFSET: usize = 10;

/// Bytes reserved per record
pub const SLOT_SIZE: usize = 10;

/// Bytes of storage the layout occupies
pub const STORE_SIZE: usize = PRIMARY_OFFSET + MAX_JOBS * SLOT_SIZE;

/// Offset of the record holding job `slot`
///
/// Slot 0 lives in the primary record together with the profile.
pub const fn job_offset(slot: usize) -> usize {
    PRIMARY_OFFSET + slot * SLOT_SIZE
}

/// Store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying storage failed
    Storage(StorageError),
    /// Encoded record does not fit in a slot
    RecordTooLarge,
    /// Slot bytes do not decode as the requested record
    Decode,
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

/// Record kept at [`PRIMARY_OFFSET`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PrimaryRecord {
    /// Job in slot A
    pub job: StripJob,
    /// Shared motion profile
    pub profile: MotionProfile,
}

/// Typed view over fixed-offset persistent storage
pub struct PersistentStore<S> {
    storage: S,
}

impl<S: ByteStorage> PersistentStore<S> {
    /// Wrap a storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Return the underlying storage
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Borrow the underlying storage
    pub fn storage(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Decode the record at `offset`
    pub fn get<T: DeserializeOwned>(&mut self, offset: usize) -> Result<T, StoreError> {
        let mut buffer = [0u8; SLOT_SIZE];
        self.storage.read(offset, &mut buffer)?;
        postcard::from_bytes(&buffer).map_err(|_| StoreError::Decode)
    }

    /// Encode `record` into the slot at `offset`
    ///
    /// The whole slot is rewritten, zero-padded after the record.
    pub fn put<T: Serialize>(&mut self, offset: usize, record: &T) -> Result<(), StoreError> {
        let mut buffer = [0u8; SLOT_SIZE];
        postcard::to_slice(record, &mut buffer).map_err(|_| StoreError::RecordTooLarge)?;
        self.storage.write(offset, &buffer)?;
        Ok(())
    }

    /// Check the format marker
    pub fn is_formatted(&mut self) -> Result<bool, StoreError> {
        let mut marker = [0u8; 2];
        self.storage.read(MARKER_OFFSET, &mut marker)?;
        Ok(u16::from_le_bytes(marker) == FORMAT_MARKER)
    }

    /// Seed every slot with defaults, then write the marker
    pub fn format(&mut self) -> Result<(), StoreError> {
        self.put(
            PRIMARY_OFFSET,
            &PrimaryRecord {
                job: StripJob::empty(0),
                profile: MotionProfile::default(),
            },
        )?;
        for slot in 1..MAX_JOBS {
            self.put(job_offset(slot), &StripJob::empty(slot))?;
        }
        self.storage
            .write(MARKER_OFFSET, &FORMAT_MARKER.to_le_bytes())?;
        Ok(())
    }

    /// Format the store unless the marker is already present
    ///
    /// Returns `true` if a format took place.
    pub fn ensure_formatted(&mut self) -> Result<bool, StoreError> {
        if self.is_formatted()? {
            return Ok(false);
        }
        info!("store marker missing, seeding defaults");
        self.format()?;
        Ok(true)
    }

    /// Load the model for `slots` job slots
    pub fn load(&mut self, slots: usize) -> Result<Model, StoreError> {
        let primary: PrimaryRecord = self.get(PRIMARY_OFFSET)?;

        let mut jobs = JobSet::new(slots);
        jobs.set(0, primary.job);
        for slot in 1..jobs.len() {
            let job: StripJob = self.get(job_offset(slot))?;
            jobs.set(slot, job);
        }

        debug!("loaded {} job slots from store", jobs.len());
        Ok(Model {
            jobs,
            profile: primary.profile,
        })
    }

    /// Persist the model
    ///
    /// Only the model's slots are written; slots beyond them keep their
    /// stored contents.
    pub fn save(&mut self, model: &Model) -> Result<(), StoreError> {
        let mut jobs = model.jobs.iter();
        let primary = PrimaryRecord {
            job: jobs.next().copied().unwrap_or(StripJob::empty(0)),
            profile: model.profile,
        };
        self.put(PRIMARY_OFFSET, &primary)?;

        for (slot, job) in jobs.enumerate() {
            self.put(job_offset(slot + 1), job)?;
        }
        debug!("saved {} job slots to store", model.jobs.len());
        Ok(())
    }
}
