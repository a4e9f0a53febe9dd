use std::io::Write;

use serde::Serialize;

use crate::model::{Allocation, DaySummary, Session};

/// Schedule export: canonical day and time columns, pass-through columns in
/// input order, assigned license last.
pub fn write_schedule<W: Write>(
    writer: W,
    sessions: &[Session],
    allocation: &Allocation,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = vec!["DOCENTE", "DIA", "DIA_NUM", "HORA INICIO", "HORA FIN"];
    if let Some(first) = sessions.first() {
        header.extend(first.extra.iter().map(|(name, _)| name.as_str()));
    }
    header.push("LICENCIA");
    wtr.write_record(&header)?;

    for (idx, session) in sessions.iter().enumerate() {
        let mut record: Vec<String> = vec![
            session.teacher.clone(),
            session.day.abbr().to_string(),
            session.day.number().to_string(),
            session.slot.start.hhmm(),
            session.slot.end.hhmm(),
        ];
        record.extend(session.extra.iter().map(|(_, value)| value.clone()));
        record.push(allocation.license_for(idx).to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Per-day distinct-license counts, Monday first.
pub fn write_summary<W: Write>(writer: W, summary: &[DaySummary]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["DIA_NUM", "DIA", "LICENCIAS"])?;
    for entry in summary {
        wtr.write_record([
            entry.day.number().to_string(),
            entry.day.name().to_string(),
            entry.licenses.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// The whole run, for machine consumers.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub sessions: Vec<SessionReport<'a>>,
    pub licenses: Vec<&'a str>,
    pub summary: &'a [DaySummary],
}

#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub row: usize,
    pub teacher: &'a str,
    pub day: u8,
    pub start: String,
    pub end: String,
    pub license: &'a str,
    pub extra: &'a [(String, String)],
}

pub fn run_report<'a>(
    sessions: &'a [Session],
    allocation: &'a Allocation,
    summary: &'a [DaySummary],
) -> RunReport<'a> {
    RunReport {
        sessions: sessions
            .iter()
            .enumerate()
            .map(|(idx, session)| SessionReport {
                row: session.row,
                teacher: &session.teacher,
                day: session.day.number(),
                start: session.slot.start.hhmm(),
                end: session.slot.end.hhmm(),
                license: allocation.license_for(idx),
                extra: &session.extra,
            })
            .collect(),
        licenses: allocation.licenses.iter().map(|l| l.name.as_str()).collect(),
        summary,
    }
}
