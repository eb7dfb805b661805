//! Course timetabling for academic departments.
//!
//! Assigns each course of a term to a (day, time slot, classroom) triple
//! so that no instructor, classroom, or department cohort is double-booked.
//! Placement is randomized and greedy: it satisfies constraints but
//! optimizes nothing, and courses that do not fit are reported rather
//! than forced.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Department`, `Course`, `Classroom`,
//!   `Instructor`, `UnavailableTime`, `ScheduleEntry`, `Day`, `TimeWindow`
//! - **`catalog`**: Indexed reference data and instructor blackout management
//! - **`validation`**: Catalog integrity checks (duplicate ids and codes, dangling refs)
//! - **`conflict`**: Instructor, classroom and cohort conflict detection
//! - **`store`**: Schedule entry storage with checked manual edits
//! - **`scheduler`**: The placement engine, terms, passes and run reports
//! - **`export`**: Denormalized views, grade grid, statistics, CSV output
//! - **`config`**: Engine settings
//!
//! # Data flow
//!
//! A [`catalog::Catalog`] is loaded from the enclosing system, the
//! [`scheduler::PlacementEngine`] fills a [`store::ScheduleStore`] through
//! repeated [`conflict::ConflictChecker`] queries, and the `export`
//! adapters read the store for presentation.
//!
//! # Logging
//!
//! Events are emitted through `tracing`. The crate installs no subscriber.

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, TimetableError};
