use std::fmt;

use serde::{Serialize, Serializer};

/// Minutes — the only time unit.
pub type Minutes = i32;

pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// A canonical time of day, minutes since midnight in `[0, 1440)`.
///
/// Only the canonicalizer produces instants from raw input; everything else
/// treats them as opaque values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeOfDay(Minutes);

impl TimeOfDay {
    pub(crate) fn from_minutes(total: Minutes) -> Option<Self> {
        (0..MINUTES_PER_DAY).contains(&total).then_some(Self(total))
    }

    pub fn minutes(self) -> Minutes {
        self.0
    }

    /// Canonical `HH:MM` rendering; parsing it back yields the same instant.
    pub fn hhmm(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hhmm())
    }
}

const DAY_ABBR: [&str; 7] = ["LU", "MA", "MI", "JU", "VI", "SA", "DO"];
const DAY_NAMES: [&str; 7] = [
    "LUNES",
    "MARTES",
    "MIÉRCOLES",
    "JUEVES",
    "VIERNES",
    "SÁBADO",
    "DOMINGO",
];

/// Canonical weekday, 1 = Monday … 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Day(u8);

impl Day {
    pub fn from_number(n: i64) -> Option<Self> {
        (1..=7).contains(&n).then_some(Self(n as u8))
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < 7, "day index out of range");
        Self(idx as u8 + 1)
    }

    /// Monday through Sunday, in canonical order.
    pub fn all() -> impl Iterator<Item = Day> {
        (0..7).map(Day::from_index)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Two-letter export abbreviation.
    pub fn abbr(self) -> &'static str {
        DAY_ABBR[self.index()]
    }

    /// Full accented name.
    pub fn name(self) -> &'static str {
        DAY_NAMES[self.index()]
    }
}

/// A start/end pair within one day. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl Slot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        debug_assert!(start < end, "Slot start must be before end");
        Self { start, end }
    }

    /// Margin rule: two slots do not conflict only when one ends at least
    /// `margin` minutes before the other starts.
    pub fn conflicts_with(&self, other: &Slot, margin: Minutes) -> bool {
        !(self.end.minutes() + margin <= other.start.minutes()
            || self.start.minutes() >= other.end.minutes() + margin)
    }
}

/// One canonical scheduled occurrence. Immutable after canonicalization.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// 1-based input row — the session's identity in the result.
    pub row: usize,
    pub teacher: String,
    pub day: Day,
    pub slot: Slot,
    /// Columns the core does not interpret, passed through in input order.
    pub extra: Vec<(String, String)>,
}

/// A shared license: stable identifier plus per-day bookings.
///
/// Bookings are appended in acceptance order (not chronological order) and
/// never removed within a run.
#[derive(Debug, Clone)]
pub struct License {
    pub name: String,
    bookings: [Vec<Slot>; 7],
}

impl License {
    pub fn new(name: String) -> Self {
        Self {
            name,
            bookings: std::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn bookings_on(&self, day: Day) -> &[Slot] {
        &self.bookings[day.index()]
    }

    pub fn book(&mut self, day: Day, slot: Slot) {
        self.bookings[day.index()].push(slot);
    }
}

/// Immutable outcome of one allocation run: every created license in
/// creation order, and one license index per input session in input order.
#[derive(Debug)]
pub struct Allocation {
    pub licenses: Vec<License>,
    pub assigned: Vec<usize>,
}

impl Allocation {
    pub fn license_for(&self, session_idx: usize) -> &str {
        &self.licenses[self.assigned[session_idx]].name
    }
}

/// Distinct licenses used on one canonical day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub day: Day,
    pub licenses: usize,
}
