//! Outcome of a generation run.

use serde::Serialize;
use std::fmt;

use super::{PassKind, Term};
use crate::config::ClearScope;
use crate::models::{CourseId, ScheduleEntry};

/// Why a course was left unplaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Every drawn (day, slot) collided with the instructor or the cohort.
    NoConflictFreeSlot,
    /// At least one drawn slot was conflict-free but had no free classroom.
    NoFreeClassroom,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NoConflictFreeSlot => f.write_str("no conflict-free time slot"),
            FailureReason::NoFreeClassroom => f.write_str("no free classroom"),
        }
    }
}

/// A course the engine could not place within its attempt budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementFailure {
    pub course_id: CourseId,
    pub course_code: String,
    /// Pass the course was attempted in.
    pub pass: PassKind,
    /// Attempts spent.
    pub attempts: u32,
    pub reason: FailureReason,
}

impl fmt::Display for PlacementFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} after {} attempts",
            self.course_code, self.pass, self.reason, self.attempts
        )
    }
}

/// Result of [`PlacementEngine::generate`](super::PlacementEngine::generate).
///
/// A run with failures is still a successful run: the placed entries are
/// committed and the failures are reported here.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub term: Term,
    /// Semesters the run targeted.
    pub semesters: Vec<u8>,
    /// How the store was cleared before placing.
    pub clear_scope: ClearScope,
    /// Entries removed by the clear.
    pub cleared: usize,
    /// Entries created by the run, in placement order.
    pub placed: Vec<ScheduleEntry>,
    /// Courses left unplaced, in attempt order.
    pub failures: Vec<PlacementFailure>,
}

impl GenerationReport {
    /// True when every target course was placed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Ids of the courses left unplaced.
    pub fn unplaced_course_ids(&self) -> Vec<CourseId> {
        self.failures.iter().map(|f| f.course_id).collect()
    }

    /// Human-readable warnings: the clear scope notice followed by one line
    /// per unplaced course.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::with_capacity(self.failures.len() + 1);
        if self.clear_scope == ClearScope::All && self.term != Term::All && self.cleared > 0 {
            warnings.push(format!(
                "generating the {} term cleared all {} existing entries, including other semesters",
                self.term, self.cleared
            ));
        }
        warnings.extend(
            self.failures
                .iter()
                .map(|f| format!("could not place {f}")),
        );
        warnings
    }

    /// One-line summary count.
    pub fn summary(&self) -> String {
        format!(
            "{} term: {} courses placed, {} unplaced, {} entries cleared",
            self.term,
            self.placed.len(),
            self.failures.len(),
            self.cleared
        )
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())?;
        for warning in self.warnings() {
            write!(f, "\n  warning: {warning}")?;
        }
        Ok(())
    }
}
