//! Timetabling domain models.
//!
//! Provides the core data types for course timetabling problems and
//! their solutions. Relationships are by identifier, never by ownership:
//! a course names its departments and instructor, an entry names its
//! course and classroom.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Department | Academic program (e.g. "BLM") |
//! | Course | One weekly block to place |
//! | Classroom | Lecture room or lab |
//! | UnavailableTime | Recurring instructor blackout |
//! | ScheduleEntry | Course x classroom x day x window |

mod calendar;
mod course;
mod ids;
mod resource;
mod schedule;

pub(crate) use calendar::hhmm;
pub use calendar::{parse_hhmm, standard_slots, Day, TimeWindow};
pub use course::{Course, Department, MAX_SEMESTER, MIN_SEMESTER};
pub use ids::{ClassroomId, CourseId, DepartmentId, EntryId, InstructorId, UnavailableTimeId};
pub use resource::{Classroom, ClassroomKind, Instructor, UnavailableTime};
pub use schedule::{NewEntry, ScheduleEntry};
