//! Screen navigator
//!
//! Walks the configuration screens in order, editing the model in place.
//! Screen 0 is visited once per job slot; screens 1-3 edit the shared
//! motion profile.
//!
//! Where the operator is lives in an explicit [`NavContext`] threaded
//! through every call. A finished screen reports a [`ScreenOutcome`]:
//!
//! - `Advance`: the screen was confirmed; go to the next slot or screen.
//! - `Navigate`: a jump or cancel arrived. The request is parked in
//!   [`NavContext::pending`] and resolved on the next poll, when the
//!   target screen starts, replacing the sequential step.
//!
//! A screen left through a jump resets what it was editing: both job
//! fields on screen 0, the single profile field otherwise. A cancel resets
//! only the field whose entry was cancelled.

use core::task::{ready, Poll};

use crate::input::{EntryField, Key, NavigationSignal};
use crate::model::{FieldKind, Model, MAX_JOBS};
use crate::traits::display::{CharDisplay, DisplayExt};
use crate::ui::field::{write_field, write_hint, ID_COL, VALUE_COL};
use crate::ui::Screen;

/// Navigation requested by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavRequest {
    /// Go straight to a screen (job slot A for screen 0)
    Jump(Screen),
    /// Go back one step
    Back,
}

/// How a screen finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenOutcome {
    /// Confirmed; continue in order
    Advance,
    /// Leave for somewhere else
    Navigate(NavRequest),
}

/// Position of the operator within the configuration screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavContext {
    /// Active screen
    pub screen: Screen,
    /// Job slot edited on screen 0
    pub job_slot: usize,
    /// Number of editable job slots (1..=MAX_JOBS)
    pub job_slots: usize,
    /// Navigation waiting to be applied
    pub pending: Option<NavRequest>,
}

impl NavContext {
    /// Start at screen 0, job slot A
    pub fn new(job_slots: usize) -> Self {
        Self::at(job_slots, Screen::JobFields)
    }

    /// Start at `screen` (job slot A for screen 0)
    pub fn at(job_slots: usize, screen: Screen) -> Self {
        Self {
            screen,
            job_slot: 0,
            job_slots: job_slots.clamp(1, MAX_JOBS),
            pending: None,
        }
    }

    /// Step forward in order
    ///
    /// Returns `false` when stepping past the last screen; the context is
    /// left unchanged in that case.
    pub fn advance(&mut self) -> bool {
        if self.screen == Screen::JobFields && self.job_slot + 1 < self.job_slots {
            self.job_slot += 1;
            return true;
        }
        match self.screen.next() {
            Some(next) => {
                self.screen = next;
                self.job_slot = 0;
                true
            }
            None => false,
        }
    }

    /// Apply a navigation request
    ///
    /// `Back` moves to the previous job slot on screen 0, otherwise to the
    /// previous screen (its last job slot when that is screen 0). It
    /// saturates at screen 0, slot A.
    pub fn apply(&mut self, request: NavRequest) {
        match request {
            NavRequest::Jump(screen) => {
                self.screen = screen;
                self.job_slot = 0;
            }
            NavRequest::Back => match self.screen.previous() {
                None => self.job_slot = self.job_slot.saturating_sub(1),
                Some(previous) => {
                    self.screen = previous;
                    self.job_slot = if previous == Screen::JobFields {
                        self.job_slots - 1
                    } else {
                        0
                    };
                }
            },
        }
    }

    /// Apply the parked request, if any
    ///
    /// Returns whether one was applied.
    pub fn resolve_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(request) => {
                self.apply(request);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Count,
    Length,
    Profile(FieldKind),
}

/// Editor for one configuration screen
pub struct ScreenEditor {
    slot: usize,
    stage: Stage,
    field: EntryField,
}

impl ScreenEditor {
    /// Draw the screen for `ctx` and start its first entry field
    ///
    /// Fields start pre-filled with the model's current values.
    pub fn begin<D: CharDisplay + ?Sized>(display: &mut D, model: &Model, ctx: &NavContext) -> Self {
        let slot = ctx.job_slot;
        display.clear();
        display.set_blink(true);

        match ctx.screen.profile_field() {
            None => {
                write_field(display, 0, FieldKind::Count, None);
                write_field(display, 1, FieldKind::Length, None);
                if let Some(job) = model.jobs.get(slot) {
                    display.set_cursor(ID_COL, 0);
                    display.write_char(job.id.as_char());
                }
                display.number_at(VALUE_COL, 1, u32::from(model.field(slot, FieldKind::Length)));

                let field = EntryField::begin(
                    display,
                    VALUE_COL,
                    0,
                    model.field(slot, FieldKind::Count),
                    FieldKind::Count.max(),
                );
                Self {
                    slot,
                    stage: Stage::Count,
                    field,
                }
            }
            Some(kind) => {
                write_field(display, 0, kind, None);
                write_hint(display, 1, kind);

                let field =
                    EntryField::begin(display, VALUE_COL, 0, model.field(slot, kind), kind.max());
                Self {
                    slot,
                    stage: Stage::Profile(kind),
                    field,
                }
            }
        }
    }

    /// Feed one polling tick
    pub fn poll<D: CharDisplay + ?Sized>(
        &mut self,
        key: Option<Key>,
        display: &mut D,
        model: &mut Model,
    ) -> Poll<ScreenOutcome> {
        let request = match ready!(self.field.poll(key, display)) {
            NavigationSignal::Value(value) => match self.stage {
                Stage::Count => {
                    model.set_field(self.slot, FieldKind::Count, value);
                    self.stage = Stage::Length;
                    self.field = EntryField::begin(
                        display,
                        VALUE_COL,
                        1,
                        model.field(self.slot, FieldKind::Length),
                        FieldKind::Length.max(),
                    );
                    return Poll::Pending;
                }
                Stage::Length => {
                    model.set_field(self.slot, FieldKind::Length, value);
                    return Poll::Ready(ScreenOutcome::Advance);
                }
                Stage::Profile(kind) => {
                    model.set_field(self.slot, kind, value);
                    return Poll::Ready(ScreenOutcome::Advance);
                }
            },
            NavigationSignal::JumpToScreen(screen) => NavRequest::Jump(screen),
            NavigationSignal::Cancel => NavRequest::Back,
        };

        self.abandon(request, model);
        Poll::Ready(ScreenOutcome::Navigate(request))
    }

    /// Reset what this screen was editing when it is left early
    ///
    /// A jump drops the whole job on screen 0; a cancel drops only the
    /// sub-field being entered.
    fn abandon(&self, request: NavRequest, model: &mut Model) {
        match (self.stage, request) {
            (Stage::Count | Stage::Length, NavRequest::Jump(_)) => {
                if let Some(job) = model.jobs.get_mut(self.slot) {
                    job.clear();
                }
            }
            (Stage::Count, NavRequest::Back) => model.set_field(self.slot, FieldKind::Count, 0),
            (Stage::Length, NavRequest::Back) => model.set_field(self.slot, FieldKind::Length, 0),
            (Stage::Profile(kind), _) => model.set_field(self.slot, kind, 0),
        }
        debug!("screen abandoned, fields reset");
    }
}

/// The configuration phase: screens from the context's start to the end
pub struct Navigator {
    ctx: NavContext,
    editor: ScreenEditor,
}

impl Navigator {
    /// Enter the navigator at `ctx`
    pub fn start<D: CharDisplay + ?Sized>(display: &mut D, model: &Model, ctx: NavContext) -> Self {
        debug!("navigator at screen {}, slot {}", ctx.screen.index(), ctx.job_slot);
        let editor = ScreenEditor::begin(display, model, &ctx);
        Self { ctx, editor }
    }

    /// Current position
    pub fn context(&self) -> &NavContext {
        &self.ctx
    }

    /// Feed one polling tick
    ///
    /// A parked request is resolved first and its target screen started,
    /// then the key goes to the active screen. Ready once the last screen
    /// is confirmed.
    pub fn poll<D: CharDisplay + ?Sized>(
        &mut self,
        key: Option<Key>,
        display: &mut D,
        model: &mut Model,
    ) -> Poll<()> {
        if self.ctx.resolve_pending() {
            self.begin_screen(display, model);
        }

        match ready!(self.editor.poll(key, display, model)) {
            ScreenOutcome::Advance => {
                if !self.ctx.advance() {
                    display.set_blink(false);
                    return Poll::Ready(());
                }
                self.begin_screen(display, model);
            }
            ScreenOutcome::Navigate(request) => self.ctx.pending = Some(request),
        }
        Poll::Pending
    }

    fn begin_screen<D: CharDisplay + ?Sized>(&mut self, display: &mut D, model: &Model) {
        trace!("screen {}, slot {}", self.ctx.screen.index(), self.ctx.job_slot);
        self.editor = ScreenEditor::begin(display, model, &self.ctx);
    }
}
