use crate::model::{Minutes, Slot};

/// Count how many of `existing` conflict with `candidate` under the margin
/// rule. A count, not a boolean — one license legally hosts several
/// overlapping bookings up to its cap.
pub fn count_conflicts(candidate: &Slot, existing: &[Slot], margin: Minutes) -> usize {
    existing
        .iter()
        .filter(|booked| candidate.conflicts_with(booked, margin))
        .count()
}
