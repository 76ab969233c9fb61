//! Configuration screens

use crate::model::FieldKind;

/// Number of configuration screens
pub const SCREEN_COUNT: usize = 4;

/// Configuration screens, in visiting order
///
/// The jump keys `A`-`D` select these directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Strip count and length of one job
    JobFields = 0,
    /// Profile max speed
    MaxSpeed = 1,
    /// Profile acceleration
    Acceleration = 2,
    /// Profile direction
    Direction = 3,
}

impl Screen {
    /// All screens in order
    pub const ALL: [Screen; SCREEN_COUNT] = [
        Screen::JobFields,
        Screen::MaxSpeed,
        Screen::Acceleration,
        Screen::Direction,
    ];

    /// Screen index (0-3)
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Screen for an index, `None` past the last screen
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Screen::JobFields),
            1 => Some(Screen::MaxSpeed),
            2 => Some(Screen::Acceleration),
            3 => Some(Screen::Direction),
            _ => None,
        }
    }

    /// The following screen, `None` after the last one
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding screen, `None` before the first one
    pub const fn previous(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(index) => Self::from_index(index),
            None => None,
        }
    }

    /// Profile field edited on this screen
    ///
    /// `None` for the job screen, which edits two job fields.
    pub const fn profile_field(self) -> Option<FieldKind> {
        match self {
            Screen::JobFields => None,
            Screen::MaxSpeed => Some(FieldKind::Speed),
            Screen::Acceleration => Some(FieldKind::Acceleration),
            Screen::Direction => Some(FieldKind::Direction),
        }
    }
}
