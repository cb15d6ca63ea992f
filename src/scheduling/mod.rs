//! Hall availability.
//!
//! A show occupies its hall over the half-open interval
//! `[start_time, start_time + duration)`. Two shows in the same hall conflict
//! exactly when their intervals intersect, so a show ending at 13:00 and one
//! starting at 13:00 can share a hall.

mod locks;

pub use locks::HallLocks;

use chrono::{NaiveDateTime, TimeDelta};

use crate::domain::ShowId;

/// Half-open `[start, end)` interval a show holds its hall for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Window starting at `start` and lasting `minutes`.
    ///
    /// Saturates at the largest representable datetime instead of overflowing.
    #[must_use]
    pub fn from_duration(start: NaiveDateTime, minutes: i32) -> Self {
        let end = start
            .checked_add_signed(TimeDelta::minutes(i64::from(minutes)))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// An existing show as seen by the availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booking {
    pub show_id: ShowId,
    pub start: NaiveDateTime,
    pub duration_minutes: i32,
}

impl Booking {
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::from_duration(self.start, self.duration_minutes)
    }
}

/// Returns the first booking that collides with `candidate`, skipping `exclude`.
///
/// `exclude` is the show being rescheduled, which must not conflict with its
/// own previous slot.
#[must_use]
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    candidate: &TimeWindow,
    exclude: Option<ShowId>,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|b| Some(b.show_id) != exclude)
        .find(|b| b.window().overlaps(candidate))
}
