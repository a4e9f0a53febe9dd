use std::io::Read;

use crate::canon::{self, CanonError};
use crate::model::{Session, Slot};

/// Columns every timetable must carry: identity, day, start, end.
pub const REQUIRED_COLUMNS: [&str; 4] = ["DOCENTE", "DIA", "HORA INICIO", "HORA FIN"];

/// How many offending rows a batch rejection reports in full.
pub const MAX_ERROR_SAMPLE: usize = 6;

/// One raw timetable row: required fields split out, everything else held
/// untouched for pass-through.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub teacher: String,
    pub day: String,
    pub start: String,
    pub end: String,
    pub extra: Vec<(String, String)>,
}

/// Read the timetable, normalizing headers (uppercase, trimmed) and
/// splitting out the required columns. Column absence is a schema error,
/// reported before any cell is parsed.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, TableError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_uppercase())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableError::MissingRequiredColumn(missing));
    }

    // Just checked present.
    let index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .expect("required column present")
    };
    let teacher_i = index(REQUIRED_COLUMNS[0]);
    let day_i = index(REQUIRED_COLUMNS[1]);
    let start_i = index(REQUIRED_COLUMNS[2]);
    let end_i = index(REQUIRED_COLUMNS[3]);
    let required = [teacher_i, day_i, start_i, end_i];

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        // Pass-through cells keep their exact bytes.
        let extra: Vec<(String, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !required.contains(idx))
            .map(|(idx, name)| (name.clone(), record.get(idx).unwrap_or("").to_string()))
            .collect();
        rows.push(RawRow {
            row: i + 1,
            teacher: field(teacher_i),
            day: field(day_i),
            start: field(start_i),
            end: field(end_i),
            extra,
        });
    }
    Ok(rows)
}

/// The whole-batch validation gate: every row must canonicalize before any
/// allocation may start. On failure the batch is rejected as a whole, with
/// the first [`MAX_ERROR_SAMPLE`] offending rows reported in full.
pub fn canonicalize(rows: &[RawRow]) -> Result<Vec<Session>, TableError> {
    let mut sessions = Vec::with_capacity(rows.len());
    let mut sample = Vec::new();
    let mut invalid_rows = 0;

    for raw in rows {
        match canonicalize_row(raw) {
            Ok(session) => sessions.push(session),
            Err((column, error)) => {
                invalid_rows += 1;
                if sample.len() < MAX_ERROR_SAMPLE {
                    sample.push(RowError {
                        row: raw.row,
                        column,
                        error,
                    });
                }
            }
        }
    }

    if invalid_rows > 0 {
        return Err(TableError::InvalidBatch(BatchReport {
            sample,
            invalid_rows,
        }));
    }
    Ok(sessions)
}

fn canonicalize_row(raw: &RawRow) -> Result<Session, (&'static str, CanonError)> {
    let day = canon::resolve_day(&raw.day).map_err(|e| (REQUIRED_COLUMNS[1], e))?;
    let start = canon::resolve_time(&raw.start).map_err(|e| (REQUIRED_COLUMNS[2], e))?;
    let end = canon::resolve_time(&raw.end).map_err(|e| (REQUIRED_COLUMNS[3], e))?;
    if start >= end {
        return Err((REQUIRED_COLUMNS[3], CanonError::InvalidInterval { start, end }));
    }
    Ok(Session {
        row: raw.row,
        teacher: raw.teacher.clone(),
        day,
        slot: Slot::new(start, end),
        extra: raw.extra.clone(),
    })
}

// ── Errors ────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum TableError {
    MissingRequiredColumn(Vec<String>),
    Csv(csv::Error),
    InvalidBatch(BatchReport),
}

/// Why a batch was rejected: a bounded sample of row errors plus the total
/// number of invalid rows, so truncation stays visible.
#[derive(Debug)]
pub struct BatchReport {
    pub sample: Vec<RowError>,
    pub invalid_rows: usize,
}

/// One offending row: its position, the column it failed on, and the
/// canonicalization error carrying the original raw value.
#[derive(Debug)]
pub struct RowError {
    pub row: usize,
    pub column: &'static str,
    pub error: CanonError,
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        TableError::Csv(e)
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::MissingRequiredColumn(names) => {
                write!(f, "missing required column(s): {}", names.join(", "))
            }
            TableError::Csv(e) => write!(f, "csv error: {e}"),
            TableError::InvalidBatch(report) => write!(f, "invalid batch: {report}"),
        }
    }
}

impl std::fmt::Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} invalid row(s)", self.invalid_rows)?;
        for e in &self.sample {
            write!(f, "; row {} [{}]: {}", e.row, e.column, e.error)?;
        }
        if self.invalid_rows > self.sample.len() {
            write!(f, "; …")?;
        }
        Ok(())
    }
}

impl std::error::Error for TableError {}
