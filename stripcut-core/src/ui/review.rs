//! Confirmation review
//!
//! Read-only summary shown before a run, two lines per page. The lines
//! are every job followed by the three profile fields:
//!
//! ```text
//! page 1   A: 3x100mm      page 2   Accel: 100/s2
//!          Speed: 500/s             Dir:   fwd
//! ```
//!
//! `#` pages forward and confirms on the last page, `*` pages back, and
//! `A`-`D` leave for the matching configuration screen. Digits do
//! nothing.

use core::task::{ready, Poll};

use heapless::Vec;

use crate::input::{EntryField, Key, NavigationSignal};
use crate::model::{FieldKind, Model, MAX_JOBS};
use crate::traits::display::{CharDisplay, DISPLAY_ROWS};
use crate::ui::field::{write_field, write_job};
use crate::ui::Screen;

/// Most lines a review can hold
pub const MAX_REVIEW_LINES: usize = MAX_JOBS + 3;

const LINES_PER_PAGE: usize = DISPLAY_ROWS as usize;

/// One summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReviewLine {
    /// Job in a slot
    Job(u8),
    /// Shared profile field
    Field(FieldKind),
}

/// How the review ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReviewOutcome {
    /// Every page confirmed
    Confirmed,
    /// Operator asked to change something on this screen
    Edit(Screen),
}

/// Paginated confirmation of the whole model
pub struct ReviewLoop {
    lines: Vec<ReviewLine, MAX_REVIEW_LINES>,
    page: usize,
    prompt: EntryField,
}

impl ReviewLoop {
    /// Summary lines for `model`, in display order
    pub fn lines_for(model: &Model) -> Vec<ReviewLine, MAX_REVIEW_LINES> {
        let mut lines = Vec::new();
        for slot in 0..model.jobs.len() {
            let _ = lines.push(ReviewLine::Job(slot as u8));
        }
        for kind in [FieldKind::Speed, FieldKind::Acceleration, FieldKind::Direction] {
            let _ = lines.push(ReviewLine::Field(kind));
        }
        lines
    }

    /// Show the first page
    pub fn start<D: CharDisplay + ?Sized>(display: &mut D, model: &Model) -> Self {
        let review = Self {
            lines: Self::lines_for(model),
            page: 0,
            prompt: EntryField::prompt(),
        };
        review.render(display, model);
        review
    }

    /// Current page (0-based)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.lines.len().div_ceil(LINES_PER_PAGE)
    }

    /// Feed one polling tick
    pub fn poll<D: CharDisplay + ?Sized>(
        &mut self,
        key: Option<Key>,
        display: &mut D,
        model: &Model,
    ) -> Poll<ReviewOutcome> {
        match ready!(self.prompt.poll(key, display)) {
            NavigationSignal::Value(_) => {
                if self.page + 1 >= self.page_count() {
                    info!("review confirmed");
                    return Poll::Ready(ReviewOutcome::Confirmed);
                }
                self.page += 1;
            }
            NavigationSignal::JumpToScreen(screen) => {
                return Poll::Ready(ReviewOutcome::Edit(screen));
            }
            NavigationSignal::Cancel => {
                if self.page == 0 {
                    return Poll::Pending;
                }
                self.page -= 1;
            }
        }

        self.prompt = EntryField::prompt();
        self.render(display, model);
        Poll::Pending
    }

    fn render<D: CharDisplay + ?Sized>(&self, display: &mut D, model: &Model) {
        display.clear();
        display.set_blink(false);

        let first = self.page * LINES_PER_PAGE;
        let page = self.lines.iter().skip(first).take(LINES_PER_PAGE);
        for (row, line) in page.enumerate() {
            let row = row as u8;
            match *line {
                ReviewLine::Job(slot) => {
                    if let Some(job) = model.jobs.get(usize::from(slot)) {
                        write_job(display, row, job);
                    }
                }
                ReviewLine::Field(kind) => write_field(display, row, kind, Some(model.field(0, kind))),
            }
        }
    }
}
