//! Cut cycle
//!
//! One cut: sweep the cutter from 0° to the configured end angle one
//! degree per `cut_step_delay_ms`, wait for the endstop to release, then
//! return to 0°.

use core::task::Poll;

use crate::config::MachineConfig;
use crate::motion::sequencer::ExecutionError;
use crate::motion::{elapsed_ms, timed_out};
use crate::traits::CutActuator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum CutStage {
    Sweep { angle: u8, since_ms: u32 },
    AwaitEndstop { since_ms: u32 },
    Done,
}

/// A single cut in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CutCycle {
    stage: CutStage,
    sweep_deg: u8,
    step_delay_ms: u16,
    stall_timeout_ms: Option<u32>,
}

impl CutCycle {
    /// Put the cutter at 0° and start sweeping
    pub fn start<C: CutActuator + ?Sized>(cutter: &mut C, now_ms: u32, config: &MachineConfig) -> Self {
        cutter.set_angle(0);
        Self {
            stage: CutStage::Sweep {
                angle: 0,
                since_ms: now_ms,
            },
            sweep_deg: config.cut_sweep_deg.min(180),
            step_delay_ms: config.cut_step_delay_ms,
            stall_timeout_ms: config.stall_timeout_ms,
        }
    }

    /// Whether the cut has finished
    pub fn is_done(&self) -> bool {
        self.stage == CutStage::Done
    }

    /// Advance the cut
    ///
    /// At most one degree is stepped per call, so the sweep never runs
    /// faster than the step delay even when polled late.
    pub fn poll<C: CutActuator + ?Sized>(
        &mut self,
        cutter: &mut C,
        now_ms: u32,
    ) -> Poll<Result<(), ExecutionError>> {
        loop {
            match self.stage {
                CutStage::Sweep { angle, since_ms } => {
                    if elapsed_ms(now_ms, since_ms) < u32::from(self.step_delay_ms) {
                        return Poll::Pending;
                    }
                    if angle < self.sweep_deg {
                        cutter.set_angle(angle + 1);
                        self.stage = CutStage::Sweep {
                            angle: angle + 1,
                            since_ms: now_ms,
                        };
                        return Poll::Pending;
                    }
                    self.stage = CutStage::AwaitEndstop { since_ms: now_ms };
                }
                CutStage::AwaitEndstop { since_ms } => {
                    if cutter.endstop_asserted() {
                        if timed_out(self.stall_timeout_ms, now_ms, since_ms) {
                            warn!("endstop still asserted after cut");
                            cutter.set_angle(0);
                            self.stage = CutStage::Done;
                            return Poll::Ready(Err(ExecutionError::EndstopStall));
                        }
                        return Poll::Pending;
                    }
                    cutter.set_angle(0);
                    self.stage = CutStage::Done;
                    return Poll::Ready(Ok(()));
                }
                CutStage::Done => return Poll::Ready(Ok(())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::SimCutter;

    fn run_cut(cutter: &mut SimCutter, config: &MachineConfig) -> (Result<(), ExecutionError>, u32) {
        let mut now = 0;
        let mut cut = CutCycle::start(cutter, now, config);
        loop {
            if let Poll::Ready(result) = cut.poll(cutter, now) {
                return (result, now);
            }
            now += 1;
        }
    }

    #[test]
    fn test_full_sweep_then_return() {
        let mut cutter = SimCutter::new();
        let (result, elapsed) = run_cut(&mut cutter, &MachineConfig::default());

        assert_eq!(result, Ok(()));
        let angles = cutter.angles();
        assert_eq!(angles.len(), 182);
        assert_eq!(angles[0], 0);
        assert_eq!(angles[180], 180);
        assert_eq!(angles[181], 0);
        assert!(angles[..=180].windows(2).all(|w| w[1] == w[0] + 1));

        // 180 increments, plus the hold at the end angle
        assert_eq!(elapsed, 181 * 15);
    }

    #[test]
    fn test_waits_for_endstop_release() {
        let mut cutter = SimCutter::new();
        cutter.hold_endstop(40);
        let (result, _) = run_cut(&mut cutter, &MachineConfig::default());

        assert_eq!(result, Ok(()));
        assert_eq!(cutter.endstop_reads(), 41);
        assert_eq!(cutter.angles().last(), Some(&0));
    }

    #[test]
    fn test_endstop_stall() {
        let mut cutter = SimCutter::new();
        cutter.hold_endstop(u32::MAX);
        let config = MachineConfig {
            stall_timeout_ms: Some(200),
            ..Default::default()
        };
        let (result, _) = run_cut(&mut cutter, &config);

        assert_eq!(result, Err(ExecutionError::EndstopStall));
        assert_eq!(cutter.angles().last(), Some(&0));
    }

    #[test]
    fn test_short_sweep() {
        let mut cutter = SimCutter::new();
        let config = MachineConfig {
            cut_sweep_deg: 90,
            cut_step_delay_ms: 0,
            ..Default::default()
        };
        let (result, _) = run_cut(&mut cutter, &config);

        assert_eq!(result, Ok(()));
        assert_eq!(cutter.angles().iter().max(), Some(&90));
    }
}
