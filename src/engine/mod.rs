mod conflict;
mod summary;

pub use conflict::count_conflicts;
pub use summary::summarize;

use crate::model::{Allocation, License, Minutes, Session};

/// Builds `<prefix><4-digit counter><domain>` identifiers,
/// e.g. counter 7 with prefix `UAI` → `UAI0007@example.org`.
#[derive(Debug, Clone)]
pub struct LicenseNamer {
    prefix: String,
    domain: String,
}

impl LicenseNamer {
    pub fn new(prefix: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            domain: domain.into(),
        }
    }

    pub fn name(&self, counter: u32) -> String {
        format!("{}{:04}{}", self.prefix, counter, self.domain)
    }
}

/// The growing license pool — the only mutable state of a run. Owned by the
/// fold in [`allocate`] and consumed into the result; nothing survives the
/// call.
struct Pool<'a> {
    licenses: Vec<License>,
    counter: u32,
    namer: &'a LicenseNamer,
}

impl Pool<'_> {
    /// First existing license (creation order) whose conflict count on the
    /// session's day stays under the cap; otherwise a fresh license. Ties
    /// break purely by creation order — no load balancing.
    fn place(&mut self, session: &Session, margin: Minutes, max_simultaneous: u32) -> usize {
        for (idx, license) in self.licenses.iter_mut().enumerate() {
            let conflicts =
                count_conflicts(&session.slot, license.bookings_on(session.day), margin);
            if (conflicts as u32) < max_simultaneous {
                license.book(session.day, session.slot);
                return idx;
            }
        }

        let mut license = License::new(self.namer.name(self.counter));
        self.counter += 1;
        license.book(session.day, session.slot);
        self.licenses.push(license);
        self.licenses.len() - 1
    }
}

/// Assign every session to a license, in input order.
///
/// First-fit greedy over a day-partitioned pool: the earliest-created
/// license that can still take the session wins, and a new license is
/// created only when none can. Every session is placed — allocation itself
/// cannot fail on a canonical batch. The outcome is order-dependent by
/// contract; callers must not reorder the batch.
pub fn allocate(
    sessions: &[Session],
    margin: Minutes,
    max_simultaneous: u32,
    namer: &LicenseNamer,
) -> Allocation {
    debug_assert!(margin >= 0, "margin must be non-negative");
    debug_assert!(max_simultaneous >= 1, "cap must allow at least one booking");

    let mut pool = Pool {
        licenses: Vec::new(),
        counter: 1,
        namer,
    };
    let mut assigned = Vec::with_capacity(sessions.len());

    for session in sessions {
        assigned.push(pool.place(session, margin, max_simultaneous));
    }

    Allocation {
        licenses: pool.licenses,
        assigned,
    }
}
