use crate::model::{Allocation, Day, DaySummary, Session};

/// Distinct licenses per canonical day, Monday first; days without sessions
/// are omitted.
///
/// Walks the day domain explicitly — the Monday-first order is a contract,
/// not a collation accident.
pub fn summarize(sessions: &[Session], allocation: &Allocation) -> Vec<DaySummary> {
    let mut out = Vec::new();
    for day in Day::all() {
        let mut seen = vec![false; allocation.licenses.len()];
        let mut present = false;
        let mut distinct = 0;
        for (idx, session) in sessions.iter().enumerate() {
            if session.day != day {
                continue;
            }
            present = true;
            let license = allocation.assigned[idx];
            if !seen[license] {
                seen[license] = true;
                distinct += 1;
            }
        }
        if present {
            out.push(DaySummary {
                day,
                licenses: distinct,
            });
        }
    }
    out
}
