//! Job and motion-profile model
//!
//! One [`Model`] exists per machine: a fixed-capacity set of strip jobs
//! plus a single motion profile shared by every job.

pub mod job;
pub mod profile;

pub use job::{JobId, JobSet, StripJob};
pub use profile::MotionProfile;

/// Number of job slots the persistent layout reserves
pub const MAX_JOBS: usize = 4;

/// Largest strip count per job
pub const MAX_STRIPS: u16 = 255;

/// Largest strip length (mm)
pub const MAX_LENGTH_MM: u16 = 10_000;

/// Largest stepper speed (steps/s)
pub const MAX_SPEED: u16 = 5_000;

/// Largest stepper acceleration (steps/s²)
pub const MAX_ACCELERATION: u16 = 2_000;

/// Editable model fields
///
/// The closed set of things an operator can type a number into. Editing,
/// resetting and rendering all dispatch on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// Job strip count
    Count,
    /// Job strip length
    Length,
    /// Profile max speed
    Speed,
    /// Profile acceleration
    Acceleration,
    /// Profile direction (0 = forward, 1 = reversed)
    Direction,
}

impl FieldKind {
    /// Inclusive upper bound for numeric entry
    pub const fn max(self) -> u16 {
        match self {
            FieldKind::Count => MAX_STRIPS,
            FieldKind::Length => MAX_LENGTH_MM,
            FieldKind::Speed => MAX_SPEED,
            FieldKind::Acceleration => MAX_ACCELERATION,
            FieldKind::Direction => 1,
        }
    }

    /// Whether the field belongs to a job rather than the shared profile
    pub const fn is_job_field(self) -> bool {
        matches!(self, FieldKind::Count | FieldKind::Length)
    }
}

/// The complete operator-editable state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Model {
    /// Configured jobs, in execution order
    pub jobs: JobSet,
    /// Motion profile applied to every job
    pub profile: MotionProfile,
}

impl Model {
    /// Create a model with `slots` empty jobs and the default profile
    pub fn new(slots: usize) -> Self {
        Self {
            jobs: JobSet::new(slots),
            profile: MotionProfile::default(),
        }
    }

    /// Read a field as an entry value
    ///
    /// Job fields address the job in `slot`; profile fields ignore it.
    /// A missing slot reads as 0.
    pub fn field(&self, slot: usize, kind: FieldKind) -> u16 {
        match kind {
            FieldKind::Count => self
                .jobs
                .get(slot)
                .map_or(0, |job| u16::from(job.strip_count)),
            FieldKind::Length => self.jobs.get(slot).map_or(0, |job| job.length_mm),
            FieldKind::Speed => self.profile.max_speed,
            FieldKind::Acceleration => self.profile.acceleration,
            FieldKind::Direction => u16::from(self.profile.reversed),
        }
    }

    /// Store an entry value into a field, clamped to the field's bound
    pub fn set_field(&mut self, slot: usize, kind: FieldKind, value: u16) {
        let value = value.min(kind.max());
        match kind {
            FieldKind::Count | FieldKind::Length => {
                if let Some(job) = self.jobs.get_mut(slot) {
                    if kind == FieldKind::Count {
                        job.strip_count = value as u8;
                    } else {
                        job.length_mm = value;
                    }
                }
            }
            FieldKind::Speed => self.profile.max_speed = value,
            FieldKind::Acceleration => self.profile.acceleration = value,
            FieldKind::Direction => self.profile.reversed = value != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model() {
        let model = Model::new(2);
        assert_eq!(model.jobs.len(), 2);
        assert_eq!(model.profile, MotionProfile::default());
        assert_eq!(model.field(0, FieldKind::Count), 0);
        assert_eq!(model.field(1, FieldKind::Length), 0);
    }

    #[test]
    fn test_set_job_fields() {
        let mut model = Model::new(2);
        model.set_field(1, FieldKind::Count, 12);
        model.set_field(1, FieldKind::Length, 350);

        assert_eq!(model.jobs.get(1).map(|j| j.strip_count), Some(12));
        assert_eq!(model.jobs.get(1).map(|j| j.length_mm), Some(350));
        assert_eq!(model.field(0, FieldKind::Count), 0);
    }

    #[test]
    fn test_set_field_clamps() {
        let mut model = Model::new(1);
        model.set_field(0, FieldKind::Count, 999);
        model.set_field(0, FieldKind::Speed, 9_999);

        assert_eq!(model.field(0, FieldKind::Count), MAX_STRIPS);
        assert_eq!(model.field(0, FieldKind::Speed), MAX_SPEED);
    }

    #[test]
    fn test_profile_fields_ignore_slot() {
        let mut model = Model::new(1);
        model.set_field(3, FieldKind::Acceleration, 750);
        model.set_field(3, FieldKind::Direction, 1);

        assert_eq!(model.profile.acceleration, 750);
        assert!(model.profile.reversed);
        assert_eq!(model.field(0, FieldKind::Direction), 1);
    }

    #[test]
    fn test_missing_slot_is_ignored() {
        let mut model = Model::new(1);
        model.set_field(2, FieldKind::Count, 5);
        assert_eq!(model.field(2, FieldKind::Count), 0);
        assert_eq!(model.jobs.len(), 1);
    }

    #[test]
    fn test_field_bounds() {
        assert_eq!(FieldKind::Count.max(), 255);
        assert_eq!(FieldKind::Length.max(), 10_000);
        assert_eq!(FieldKind::Direction.max(), 1);
        assert!(FieldKind::Length.is_job_field());
        assert!(!FieldKind::Speed.is_job_field());
    }
}
