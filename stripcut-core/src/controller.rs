//! Session controller
//!
//! Top-level state machine owned by the firmware. One session is:
//!
//! ```text
//! Boot ──► Configuring ──► Reviewing ──► Executing ──► Done ──┐
//!              ▲               │                               │
//!              └── jump key ───┘                               │
//!              ▲                                               │
//!              └───────────────── next session ────────────────┘
//! ```
//!
//! The model is loaded when a session starts and saved when execution
//! ends, whether or not any job ran. Storage failures never stop the
//! machine: a failed load falls back to defaults, a failed save is logged.

use core::task::Poll;

use stripcut_hal::ByteStorage;

use crate::config::{ConfigError, MachineConfig};
use crate::model::Model;
use crate::motion::ExecutionRun;
use crate::store::PersistentStore;
use crate::traits::display::{CharDisplay, DisplayExt};
use crate::traits::{CutActuator, Keypad, StepperActuator};
use crate::ui::{NavContext, Navigator, ReviewLoop, ReviewOutcome};

/// Firmware version shown on the boot banner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Observable controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseKind {
    /// Store check and boot banner
    Boot,
    /// Editing configuration screens
    Configuring,
    /// Paging through the review
    Reviewing,
    /// Cutting
    Executing,
    /// "Done." banner before the next session
    Done,
}

enum Phase {
    PowerOn,
    Boot { since_ms: u32 },
    Configuring(Navigator),
    Reviewing(ReviewLoop),
    Executing(ExecutionRun),
    Done { since_ms: u32 },
}

/// Strip cutter controller
///
/// Generic over the collaborators so the same logic runs on the board
/// and against mocks.
pub struct Controller<S, D, K, M, C> {
    config: MachineConfig,
    store: PersistentStore<S>,
    display: D,
    keypad: K,
    stepper: M,
    cutter: C,
    model: Model,
    phase: Phase,
    sessions: u32,
}

impl<S, D, K, M, C> Controller<S, D, K, M, C>
where
    S: ByteStorage,
    D: CharDisplay,
    K: Keypad,
    M: StepperActuator,
    C: CutActuator,
{
    /// Create a controller
    ///
    /// Nothing is touched until [`boot`](Self::boot) or the first
    /// [`poll`](Self::poll).
    pub fn new(
        config: MachineConfig,
        store: PersistentStore<S>,
        display: D,
        keypad: K,
        stepper: M,
        cutter: C,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            model: Model::new(usize::from(config.job_slots)),
            config,
            store,
            display,
            keypad,
            stepper,
            cutter,
            phase: Phase::PowerOn,
            sessions: 0,
        })
    }

    /// Seed the store if needed and show the boot banner
    pub fn boot(&mut self, now_ms: u32) {
        match self.store.ensure_formatted() {
            Ok(true) => info!("store seeded with defaults"),
            Ok(false) => {}
            Err(e) => warn!("store check failed: {}", e),
        }

        self.display.clear();
        self.display.set_blink(false);
        self.display.text_at(0, 0, "STRIPCUT ");
        self.display.write_str(VERSION);
        self.display.text_at(0, 1, "Starting...");
        self.phase = Phase::Boot { since_ms: now_ms };
    }

    /// Advance by one tick
    ///
    /// Reads at most one key and feeds it to the current phase. Phases
    /// that take no input drop it.
    pub fn poll(&mut self, now_ms: u32) {
        let key = self.keypad.poll_key(now_ms);

        match &mut self.phase {
            Phase::PowerOn => self.boot(now_ms),
            Phase::Boot { since_ms } => {
                if now_ms.wrapping_sub(*since_ms) >= u32::from(self.config.boot_banner_ms) {
                    self.start_session();
                }
            }
            Phase::Configuring(navigator) => {
                if navigator
                    .poll(key, &mut self.display, &mut self.model)
                    .is_ready()
                {
                    debug!("configuration complete");
                    self.phase = Phase::Reviewing(ReviewLoop::start(&mut self.display, &self.model));
                }
            }
            Phase::Reviewing(review) => match review.poll(key, &mut self.display, &self.model) {
                Poll::Ready(ReviewOutcome::Confirmed) => {
                    self.phase = Phase::Executing(ExecutionRun::new(&self.model, &self.config));
                }
                Poll::Ready(ReviewOutcome::Edit(screen)) => {
                    let ctx = NavContext::at(self.model.jobs.len(), screen);
                    self.phase =
                        Phase::Configuring(Navigator::start(&mut self.display, &self.model, ctx));
                }
                Poll::Pending => {}
            },
            Phase::Executing(run) => {
                let poll = run.poll(
                    now_ms,
                    &mut self.display,
                    &mut self.stepper,
                    &mut self.cutter,
                );
                if let Poll::Ready(result) = poll {
                    if let Err(e) = result {
                        warn!("execution aborted: {}", e);
                    }
                    self.finish_session(now_ms);
                }
            }
            Phase::Done { since_ms } => {
                if now_ms.wrapping_sub(*since_ms) >= u32::from(self.config.done_banner_ms) {
                    self.start_session();
                }
            }
        }
    }

    fn start_session(&mut self) {
        let slots = usize::from(self.config.job_slots);
        self.model = match self.store.load(slots) {
            Ok(model) => model,
            Err(e) => {
                warn!("load failed, using defaults: {}", e);
                Model::new(slots)
            }
        };

        info!("session {} started", self.sessions + 1);
        let navigator = Navigator::start(&mut self.display, &self.model, NavContext::new(slots));
        self.phase = Phase::Configuring(navigator);
    }

    fn finish_session(&mut self, now_ms: u32) {
        if let Err(e) = self.store.save(&self.model) {
            warn!("save failed: {}", e);
        }
        self.sessions += 1;

        self.display.clear();
        self.display.set_blink(false);
        self.display.text_at(0, 0, "Done.");
        self.phase = Phase::Done { since_ms: now_ms };
    }

    /// Current phase
    pub fn phase_kind(&self) -> PhaseKind {
        match self.phase {
            Phase::PowerOn | Phase::Boot { .. } => PhaseKind::Boot,
            Phase::Configuring(_) => PhaseKind::Configuring,
            Phase::Reviewing(_) => PhaseKind::Reviewing,
            Phase::Executing(_) => PhaseKind::Executing,
            Phase::Done { .. } => PhaseKind::Done,
        }
    }

    /// Working model of the current session
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Completed sessions
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Machine configuration
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Persistent store
    pub fn store(&mut self) -> &mut PersistentStore<S> {
        &mut self.store
    }

    /// Display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Keypad
    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }

    /// Feed stepper
    pub fn stepper(&self) -> &M {
        &self.stepper
    }

    /// Mutable feed stepper, for drivers that need servicing between polls
    pub fn stepper_mut(&mut self) -> &mut M {
        &mut self.stepper
    }

    /// Cut actuator
    pub fn cutter(&self) -> &C {
        &self.cutter
    }
}
