//! Catalog integrity checks.
//!
//! Run before any generation so that the placement engine can assume a
//! well-formed catalog. Detects:
//! - Duplicate IDs and duplicate codes
//! - Semesters outside 1..=8
//! - Courses that serve no department or reference unknown ones
//! - Dangling instructor references (courses and blackout windows)
//! - Classrooms with zero capacity
//!
//! All problems are collected; the first one does not short-circuit.

use crate::catalog::Catalog;
use crate::models::{MAX_SEMESTER, MIN_SEMESTER};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// Two departments, courses, or classrooms share a code.
    DuplicateCode,
    /// A course semester lies outside 1..=8.
    SemesterOutOfRange,
    /// A course serves no department.
    EmptyDepartments,
    /// A course references a department that doesn't exist.
    UnknownDepartment,
    /// A course or blackout references an instructor that doesn't exist.
    UnknownInstructor,
    /// A classroom has zero capacity.
    ZeroCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the reference data of a catalog.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let mut department_ids = HashSet::new();
    let mut department_codes = HashSet::new();
    for d in catalog.departments() {
        if !department_ids.insert(d.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate department ID: {}", d.id),
            ));
        }
        if !department_codes.insert(d.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate department code: {}", d.code),
            ));
        }
    }

    let mut instructor_ids = HashSet::new();
    for i in catalog.instructors() {
        if !instructor_ids.insert(i.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor ID: {}", i.id),
            ));
        }
    }

    let mut classroom_ids = HashSet::new();
    let mut classroom_codes = HashSet::new();
    for r in catalog.classrooms() {
        if !classroom_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate classroom ID: {}", r.id),
            ));
        }
        if !classroom_codes.insert(r.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate classroom code: {}", r.code),
            ));
        }
        if r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Classroom '{}' has zero capacity", r.code),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    let mut course_codes = HashSet::new();
    for c in catalog.courses() {
        if !course_ids.insert(c.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", c.id),
            ));
        }
        if !course_codes.insert(c.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateCode,
                format!("Duplicate course code: {}", c.code),
            ));
        }
        if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&c.semester) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SemesterOutOfRange,
                format!(
                    "Course '{}' has semester {} outside {}..={}",
                    c.code, c.semester, MIN_SEMESTER, MAX_SEMESTER
                ),
            ));
        }
        if c.department_ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDepartments,
                format!("Course '{}' serves no department", c.code),
            ));
        }
        for dept in &c.department_ids {
            if !department_ids.contains(dept) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDepartment,
                    format!("Course '{}' references unknown department {}", c.code, dept),
                ));
            }
        }
        if let Some(instructor) = c.instructor_id {
            if !instructor_ids.contains(&instructor) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownInstructor,
                    format!(
                        "Course '{}' references unknown instructor {}",
                        c.code, instructor
                    ),
                ));
            }
        }
    }

    let mut unavailable_ids = HashSet::new();
    for u in catalog.unavailable_times() {
        if !unavailable_ids.insert(u.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate unavailable time ID: {}", u.id),
            ));
        }
        if !instructor_ids.contains(&u.instructor_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownInstructor,
                format!(
                    "Unavailable time {} references unknown instructor {}",
                    u.id, u.instructor_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
