use chrono::{NaiveDateTime, Timelike};

use crate::model::{Day, MINUTES_PER_DAY, Minutes, Slot, TimeOfDay};

/// Accent-stripped full names, index = canonical day - 1.
const DAY_NAMES_PLAIN: [&str; 7] = [
    "LUNES",
    "MARTES",
    "MIERCOLES",
    "JUEVES",
    "VIERNES",
    "SABADO",
    "DOMINGO",
];

const DAY_ABBR: [&str; 7] = ["LU", "MA", "MI", "JU", "VI", "SA", "DO"];

// ── Day canonicalization ──────────────────────────────────────────

/// Resolve a raw day cell to a canonical day.
///
/// Accepts, in this order: numeric-like values whose integer part is 1–7
/// (`"3"`, `"3.0"`), two-letter abbreviations (`LU`..`DO`) and full Spanish
/// names with or without accents, all case-insensitive.
pub fn resolve_day(raw: &str) -> Result<Day, CanonError> {
    let s = raw.trim().to_uppercase();

    if let Ok(f) = s.parse::<f64>()
        && let Some(day) = Day::from_number(f as i64) {
            return Ok(day);
        }

    if let Some(idx) = DAY_ABBR.iter().position(|a| *a == s) {
        return Ok(Day::from_index(idx));
    }

    let plain = strip_accents(&s);
    if let Some(idx) = DAY_NAMES_PLAIN.iter().position(|n| *n == plain) {
        return Ok(Day::from_index(idx));
    }

    Err(CanonError::UnrecognizedDay(raw.trim().to_string()))
}

fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            other => other,
        })
        .collect()
}

// ── Time canonicalization ─────────────────────────────────────────

/// Resolve a raw time cell to a canonical instant.
///
/// Tries, in order: structured date-time strings, bare digit forms
/// (`"9"` → 09:00, `"830"`/`"0830"` → 08:30), clock patterns (`HH:MM`,
/// `HH:MM:SS`, 12-hour with `AM`/`PM`; `.` and `H` accepted as separators),
/// and a spreadsheet day fraction in `[0, 1)`.
pub fn resolve_time(raw: &str) -> Result<TimeOfDay, CanonError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CanonError::EmptyTime);
    }

    // Structured date-time cells keep their time component.
    if let Some(t) = parse_datetime(trimmed) {
        return Ok(t);
    }

    // '.' and 'H' are both in-the-wild minute separators.
    let s = trimmed.to_uppercase().replace(['.', 'H'], ":");

    if s.bytes().all(|b| b.is_ascii_digit())
        && let Some(t) = parse_digits(&s) {
            return Ok(t);
        }

    if let Some(t) = parse_clock(&s) {
        return Ok(t);
    }

    // Spreadsheet day fraction, checked against the pre-normalization text
    // so "0.5" means noon rather than "0:5".
    if let Ok(f) = trimmed.parse::<f64>()
        && (0.0..1.0).contains(&f)
        && let Some(t) = TimeOfDay::from_minutes((f * MINUTES_PER_DAY as f64).round() as Minutes) {
            return Ok(t);
        }

    Err(CanonError::UnrecognizedTimeFormat(trimmed.to_string()))
}

/// Canonicalize a start/end pair, enforcing `start < end`.
pub fn resolve_slot(start_raw: &str, end_raw: &str) -> Result<Slot, CanonError> {
    let start = resolve_time(start_raw)?;
    let end = resolve_time(end_raw)?;
    if start >= end {
        return Err(CanonError::InvalidInterval { start, end });
    }
    Ok(Slot::new(start, end))
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime(s: &str) -> Option<TimeOfDay> {
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return TimeOfDay::from_minutes((dt.hour() * 60 + dt.minute()) as Minutes);
        }
    }
    None
}

/// `"9"` → 09:00, `"830"` → 08:30, `"0830"` → 08:30.
fn parse_digits(s: &str) -> Option<TimeOfDay> {
    match s.len() {
        1 | 2 => hm(s.parse().ok()?, 0),
        3 | 4 => {
            let padded = format!("{s:0>4}");
            hm(padded[..2].parse().ok()?, padded[2..].parse().ok()?)
        }
        _ => None,
    }
}

/// `HH:MM`, `HH:MM:SS` and their 12-hour `AM`/`PM` forms. Minutes and
/// seconds are exactly two digits — a lone digit there would shadow the
/// day-fraction rule after separator normalization.
fn parse_clock(s: &str) -> Option<TimeOfDay> {
    let (rest, meridiem) = if let Some(r) = s.strip_suffix(" PM") {
        (r, Some(true))
    } else if let Some(r) = s.strip_suffix(" AM") {
        (r, Some(false))
    } else {
        (s, None)
    };

    let mut parts = rest.split(':');
    let hour_part = parts.next()?;
    let minute_part = parts.next()?;
    let second_part = parts.next();
    if parts.next().is_some() {
        return None;
    }

    if hour_part.is_empty() || hour_part.len() > 2 || !all_digits(hour_part) {
        return None;
    }
    if minute_part.len() != 2 || !all_digits(minute_part) {
        return None;
    }
    if let Some(sec) = second_part {
        if sec.len() != 2 || !all_digits(sec) {
            return None;
        }
        let seconds: Minutes = sec.parse().ok()?;
        if seconds > 59 {
            return None;
        }
    }

    let mut hour: Minutes = hour_part.parse().ok()?;
    let minute: Minutes = minute_part.parse().ok()?;
    if minute > 59 {
        return None;
    }
    match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            if hour == 12 {
                hour = 0;
            }
            if pm {
                hour += 12;
            }
        }
        None => {
            if hour > 23 {
                return None;
            }
        }
    }
    TimeOfDay::from_minutes(hour * 60 + minute)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn hm(hour: Minutes, minute: Minutes) -> Option<TimeOfDay> {
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
        return None;
    }
    TimeOfDay::from_minutes(hour * 60 + minute)
}

// ── Errors ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    EmptyTime,
    UnrecognizedTimeFormat(String),
    UnrecognizedDay(String),
    InvalidInterval { start: TimeOfDay, end: TimeOfDay },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CanonError::EmptyTime => write!(f, "empty time value"),
            CanonError::UnrecognizedTimeFormat(raw) => {
                write!(f, "unrecognized time format: {raw}")
            }
            CanonError::UnrecognizedDay(raw) => write!(f, "unrecognized day: {raw}"),
            CanonError::InvalidInterval { start, end } => {
                write!(f, "interval start {start} is not before end {end}")
            }
        }
    }
}

impl std::error::Error for CanonError {}
