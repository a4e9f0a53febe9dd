//! Timetable → shared-license allocator: canonicalize day/time cells,
//! assign sessions first-fit onto a lazily grown license pool under a
//! margin-aware concurrency cap, and summarize license usage per day.

pub mod canon;
pub mod engine;
pub mod model;
pub mod report;
pub mod table;
