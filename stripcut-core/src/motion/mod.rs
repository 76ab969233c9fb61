//! Motion and execution
//!
//! Unit conversion, the cut cycle, and the sequencer that turns confirmed
//! jobs into stepper and cutter commands.

pub mod convert;
pub mod cut;
pub mod sequencer;

pub use convert::{mm_to_steps, Converter};
pub use cut::CutCycle;
pub use sequencer::{ExecutionError, ExecutionRun, JobSequencer};

/// Milliseconds elapsed since `since_ms`, tolerant of clock wrap
pub(crate) fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    now_ms.wrapping_sub(since_ms)
}

/// Whether an optional timeout has run out
pub(crate) fn timed_out(timeout_ms: Option<u32>, now_ms: u32, since_ms: u32) -> bool {
    timeout_ms.is_some_and(|limit| elapsed_ms(now_ms, since_ms) >= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_across_wrap() {
        assert_eq!(elapsed_ms(5, u32::MAX - 4), 10);
        assert_eq!(elapsed_ms(100, 40), 60);
    }

    #[test]
    fn test_timeout() {
        assert!(!timed_out(None, 1_000_000, 0));
        assert!(!timed_out(Some(50), 49, 0));
        assert!(timed_out(Some(50), 50, 0));
    }
}
