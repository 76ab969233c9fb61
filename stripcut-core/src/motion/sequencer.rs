//! Execution sequencer
//!
//! Turns confirmed jobs into stepper and cutter commands. Per strip:
//!
//! 1. Show progress (`<len>mm`, job label top right, `i/count` below)
//! 2. Queue a relative move of the strip length in steps
//! 3. Run the stepper until no distance is left
//! 4. Cut
//! 5. Settle
//!
//! Every wait is a `Poll::Pending`; the caller re-polls with the current
//! time. Jobs with a zero field are skipped.

use core::task::{ready, Poll};

use crate::config::MachineConfig;
use crate::model::{FieldKind, JobSet, Model, MotionProfile, StripJob};
use crate::motion::cut::CutCycle;
use crate::motion::{elapsed_ms, timed_out, Converter};
use crate::traits::display::{CharDisplay, DisplayExt};
use crate::traits::{CutActuator, StepperActuator};
use crate::ui::field::{write_value, ID_COL};

/// Execution errors
///
/// Only raised when a stall timeout is configured; without one the
/// sequencer waits forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExecutionError {
    /// Stepper did not reach its target in time
    MotionStall,
    /// Cutter endstop stayed asserted after the sweep
    EndstopStall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Stage {
    NextStrip,
    Moving { since_ms: u32 },
    Cutting(CutCycle),
    Settling { since_ms: u32 },
    Done,
}

/// Runs every strip of one job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JobSequencer {
    job: StripJob,
    steps: i32,
    strip: u8,
    stage: Stage,
    config: MachineConfig,
}

impl JobSequencer {
    /// Prepare a job, applying the motion profile to the stepper
    ///
    /// A job that is not runnable touches nothing and finishes on its
    /// first poll.
    pub fn start<M: StepperActuator + ?Sized>(
        job: StripJob,
        profile: &MotionProfile,
        config: &MachineConfig,
        stepper: &mut M,
    ) -> Self {
        let stage = if job.is_runnable() {
            stepper.set_max_speed(profile.signed_max_speed());
            stepper.set_acceleration(profile.acceleration);
            info!(
                "job {}: {} x {} mm",
                job.id.as_char(),
                job.strip_count,
                job.length_mm
            );
            Stage::NextStrip
        } else {
            debug!("job {} skipped", job.id.as_char());
            Stage::Done
        };

        Self {
            job,
            steps: Converter::from_config(config).steps(job.length_mm),
            strip: 0,
            stage,
            config: *config,
        }
    }

    /// Strip being cut (1-based, 0 before the first)
    pub fn strip(&self) -> u8 {
        self.strip
    }

    /// Steps fed per strip
    pub fn steps_per_strip(&self) -> i32 {
        self.steps
    }

    /// Advance the job
    pub fn poll<D, M, C>(
        &mut self,
        now_ms: u32,
        display: &mut D,
        stepper: &mut M,
        cutter: &mut C,
    ) -> Poll<Result<(), ExecutionError>>
    where
        D: CharDisplay + ?Sized,
        M: StepperActuator + ?Sized,
        C: CutActuator + ?Sized,
    {
        loop {
            match &mut self.stage {
                Stage::NextStrip => {
                    if self.strip >= self.job.strip_count {
                        self.stage = Stage::Done;
                        continue;
                    }
                    self.strip += 1;
                    self.show_progress(display);
                    stepper.move_by(self.steps);
                    self.stage = Stage::Moving { since_ms: now_ms };
                }
                Stage::Moving { since_ms } => {
                    stepper.run();
                    if stepper.distance_to_go() != 0 {
                        if timed_out(self.config.stall_timeout_ms, now_ms, *since_ms) {
                            warn!("feed stalled on strip {}", self.strip);
                            self.stage = Stage::Done;
                            return Poll::Ready(Err(ExecutionError::MotionStall));
                        }
                        return Poll::Pending;
                    }
                    self.stage = Stage::Cutting(CutCycle::start(cutter, now_ms, &self.config));
                }
                Stage::Cutting(cut) => {
                    let result = ready!(cut.poll(cutter, now_ms));
                    if let Err(e) = result {
                        self.stage = Stage::Done;
                        return Poll::Ready(Err(e));
                    }
                    self.stage = Stage::Settling { since_ms: now_ms };
                }
                Stage::Settling { since_ms } => {
                    if elapsed_ms(now_ms, *since_ms) < u32::from(self.config.settle_delay_ms) {
                        return Poll::Pending;
                    }
                    self.stage = Stage::NextStrip;
                }
                Stage::Done => return Poll::Ready(Ok(())),
            }
        }
    }

    fn show_progress<D: CharDisplay + ?Sized>(&self, display: &mut D) {
        display.clear();
        display.set_cursor(0, 0);
        write_value(display, FieldKind::Length, self.job.length_mm);
        display.set_cursor(ID_COL, 0);
        display.write_char(self.job.id.as_char());

        display.number_at(0, 1, u32::from(self.strip));
        display.write_char('/');
        display.write_number(u32::from(self.job.strip_count));
    }
}

/// Runs every job of a model in slot order
pub struct ExecutionRun {
    jobs: JobSet,
    profile: MotionProfile,
    config: MachineConfig,
    slot: usize,
    current: Option<JobSequencer>,
}

impl ExecutionRun {
    /// Snapshot the model's jobs and profile
    pub fn new(model: &Model, config: &MachineConfig) -> Self {
        info!("executing {} runnable jobs", model.jobs.runnable_count());
        Self {
            jobs: model.jobs.clone(),
            profile: model.profile,
            config: *config,
            slot: 0,
            current: None,
        }
    }

    /// Slot of the job currently running
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Advance the run
    ///
    /// Stops at the first error; later jobs do not run.
    pub fn poll<D, M, C>(
        &mut self,
        now_ms: u32,
        display: &mut D,
        stepper: &mut M,
        cutter: &mut C,
    ) -> Poll<Result<(), ExecutionError>>
    where
        D: CharDisplay + ?Sized,
        M: StepperActuator + ?Sized,
        C: CutActuator + ?Sized,
    {
        loop {
            if let Some(job) = &mut self.current {
                ready!(job.poll(now_ms, display, stepper, cutter))?;
                self.current = None;
                self.slot += 1;
            }

            let Some(job) = self.jobs.get(self.slot).copied() else {
                return Poll::Ready(Ok(()));
            };
            self.current = Some(JobSequencer::start(job, &self.profile, &self.config, stepper));
        }
    }
}
