//! Strip jobs

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::MAX_JOBS;

/// Single-character job label
///
/// Assigned by slot position: slot 0 is `A`, slot 1 is `B`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobId(u8);

impl JobId {
    /// Label for a slot index
    pub const fn for_slot(slot: usize) -> Self {
        JobId(b'A' + (slot % 26) as u8)
    }

    /// Label as a character
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

/// One configured cut request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StripJob {
    /// Slot label
    pub id: JobId,
    /// Number of strips to cut (0-255)
    pub strip_count: u8,
    /// Length of each strip in mm (0-10000)
    pub length_mm: u16,
}

impl StripJob {
    /// Create an empty job for a slot
    pub const fn empty(slot: usize) -> Self {
        Self {
            id: JobId::for_slot(slot),
            strip_count: 0,
            length_mm: 0,
        }
    }

    /// A job runs only when both fields are nonzero
    pub const fn is_runnable(&self) -> bool {
        self.strip_count != 0 && self.length_mm != 0
    }

    /// Zero both fields, keeping the label
    pub fn clear(&mut self) {
        self.strip_count = 0;
        self.length_mm = 0;
    }
}

/// Fixed-capacity ordered set of jobs
///
/// The slot count is chosen at construction and never grows past
/// [`MAX_JOBS`]. Slot `i` always carries [`JobId::for_slot(i)`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobSet {
    jobs: Vec<StripJob, MAX_JOBS>,
}

impl JobSet {
    /// Create `slots` empty jobs (clamped to 1..=MAX_JOBS)
    pub fn new(slots: usize) -> Self {
        let mut jobs = Vec::new();
        for slot in 0..slots.clamp(1, MAX_JOBS) {
            // Cannot fail: the range is bounded by the capacity
            let _ = jobs.push(StripJob::empty(slot));
        }
        Self { jobs }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Always false; a job set has at least one slot
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Job in a slot
    pub fn get(&self, slot: usize) -> Option<&StripJob> {
        self.jobs.get(slot)
    }

    /// Mutable job in a slot
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut StripJob> {
        self.jobs.get_mut(slot)
    }

    /// Replace the job in a slot, restoring the slot's label
    pub fn set(&mut self, slot: usize, job: StripJob) {
        if let Some(existing) = self.jobs.get_mut(slot) {
            *existing = StripJob {
                id: JobId::for_slot(slot),
                ..job
            };
        }
    }

    /// Iterate jobs in slot order
    pub fn iter(&self) -> impl Iterator<Item = &StripJob> {
        self.jobs.iter()
    }

    /// Number of jobs that will actually run
    pub fn runnable_count(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_runnable()).count()
    }
}
