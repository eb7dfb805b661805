//! Timetable generation.
//!
//! Provides the randomized greedy placement engine and its supporting
//! types.
//!
//! # Algorithm
//!
//! `PlacementEngine` orders courses into passes (shared courses first,
//! then one pass per department), then places each course by drawing
//! random (day, slot) pairs until one is free of instructor and cohort
//! conflicts and has a free classroom of the right kind. It is a
//! constraint satisfier, not an optimizer, and does not backtrack.
//!
//! # Transactions
//!
//! A run builds its result on a copy of the store and commits it in one
//! swap. Configuration errors, validation errors and cancellation all
//! leave the store as it was.

mod passes;
mod placement;
mod report;
mod term;

pub use passes::{department_order, plan_passes, Pass, PassKind};
pub use placement::{CancelFlag, PlacementEngine};
pub use report::{FailureReason, GenerationReport, PlacementFailure};
pub use term::Term;
