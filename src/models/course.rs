//! Course and department models.
//!
//! A course is the unit of placement: it gets exactly one weekly block.
//! Courses may serve several departments at once (shared courses), in
//! which case the block must be free for every one of those cohorts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{CourseId, DepartmentId, InstructorId};

/// Lowest valid semester number.
pub const MIN_SEMESTER: u8 = 1;
/// Highest valid semester number (four years of two terms).
pub const MAX_SEMESTER: u8 = 8;

/// An academic department (e.g. "BLM").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Unique short code.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Department {
    /// Creates a new department.
    pub fn new(id: DepartmentId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A course to be placed on the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Unique course code.
    pub code: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Weekly theory hours.
    #[serde(default)]
    pub theory_hours: u32,
    /// Weekly practice (lab) hours. Nonzero means the course prefers a lab.
    #[serde(default)]
    pub practice_hours: u32,
    /// Credit count.
    #[serde(default)]
    pub credits: u32,
    /// Assigned instructor, if any.
    #[serde(default)]
    pub instructor_id: Option<InstructorId>,
    /// Semester number (1..=8).
    pub semester: u8,
    /// Whether the course is mandatory for its cohorts.
    #[serde(default = "mandatory_by_default")]
    pub mandatory: bool,
    /// Departments the course serves. Must be non-empty.
    pub department_ids: BTreeSet<DepartmentId>,
}

fn mandatory_by_default() -> bool {
    true
}

impl Course {
    /// Creates a course with the given id, code, and semester.
    pub fn new(id: CourseId, code: impl Into<String>, semester: u8) -> Self {
        Self {
            id,
            code: code.into(),
            name: String::new(),
            theory_hours: 0,
            practice_hours: 0,
            credits: 0,
            instructor_id: None,
            semester,
            mandatory: true,
            department_ids: BTreeSet::new(),
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets theory and practice hours.
    pub fn with_hours(mut self, theory: u32, practice: u32) -> Self {
        self.theory_hours = theory;
        self.practice_hours = practice;
        self
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Assigns an instructor.
    pub fn with_instructor(mut self, instructor_id: InstructorId) -> Self {
        self.instructor_id = Some(instructor_id);
        self
    }

    /// Marks the course elective.
    pub fn elective(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Adds a department.
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_ids.insert(department_id);
        self
    }

    /// Whether the course serves more than one department.
    pub fn is_shared(&self) -> bool {
        self.department_ids.len() > 1
    }

    /// Whether the course prefers a lab classroom.
    pub fn needs_lab(&self) -> bool {
        self.practice_hours > 0
    }

    /// Whether the course serves the given department.
    pub fn belongs_to(&self, department_id: DepartmentId) -> bool {
        self.department_ids.contains(&department_id)
    }

    /// Theory plus practice hours.
    pub fn total_hours(&self) -> u32 {
        self.theory_hours.saturating_add(self.practice_hours)
    }

    /// Year of study (1..=4) derived from the semester.
    pub fn year(&self) -> u8 {
        self.semester.saturating_add(1) / 2
    }
}
