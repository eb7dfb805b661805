//! Read-only projections of a schedule for reporting.
//!
//! - [`ScheduleRow`]: one entry with course, classroom, department and
//!   instructor names resolved
//! - per-department, per-instructor and per-classroom views
//! - [`GradeGrid`]: days by year of study, the printed timetable layout
//! - [`ScheduleStats`]: load counts and classroom utilization
//! - CSV writers over any `std::io::Write`

mod stats;
mod views;
mod writer;

pub use stats::ScheduleStats;
pub use views::{
    all_rows, classroom_view, department_view, instructor_view, GradeGrid, ScheduleRow,
    STUDY_YEARS,
};
pub use writer::{write_grade_grid_csv, write_instructor_csv, write_rows_csv};
