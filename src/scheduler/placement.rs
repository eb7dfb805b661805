//! Randomized greedy placement engine.
//!
//! # Algorithm
//!
//! 1. Validate configuration and catalog; abort before any mutation.
//! 2. Copy the store and clear the copy (all entries, or only the
//!    targeted semesters).
//! 3. Walk the passes. For each course, up to `max_attempts` times:
//!    draw a day and a slot uniformly at random, reject the draw on any
//!    instructor or cohort conflict, then pick a free classroom (a LAB
//!    first when the course has practice hours, otherwise or as fallback
//!    a NORMAL room) uniformly among the free ones.
//! 4. Courses that exhaust their attempts are reported, not retried.
//! 5. Commit the copy into the store in one swap.
//!
//! There is no backtracking: an early placement may block a later course
//! even when a different order would fit both.
//!
//! # Complexity
//! O(c * a * (k + r)) where c=courses, a=attempts, k=entries sharing the
//! drawn day and resource, r=classrooms.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::passes::plan_passes;
use super::{FailureReason, GenerationReport, PlacementFailure, Term};
use crate::catalog::Catalog;
use crate::config::{ClearScope, PlacementConfig};
use crate::conflict::ConflictChecker;
use crate::error::{Result, TimetableError};
use crate::models::{ClassroomId, ClassroomKind, Course, Day, NewEntry, ScheduleEntry, TimeWindow};
use crate::store::ScheduleStore;
use crate::validation::validate_catalog;

/// Cooperative cancellation for a generation run.
///
/// Checked between courses only, so a course is never left half-placed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Visible to every clone.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Classroom ids split by kind, in catalog order.
struct RoomPools {
    labs: Vec<ClassroomId>,
    normals: Vec<ClassroomId>,
}

enum Attempted {
    Placed { entry: ScheduleEntry, attempts: u32 },
    Failed { reason: FailureReason, attempts: u32 },
}

/// Places the courses of a term into the weekly grid.
///
/// # Example
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_timetable::catalog::Catalog;
/// use u_timetable::models::{Classroom, ClassroomId, Course, CourseId, Department, DepartmentId};
/// use u_timetable::scheduler::{PlacementEngine, Term};
/// use u_timetable::store::ScheduleStore;
///
/// let catalog = Catalog::new()
///     .with_department(Department::new(DepartmentId(1), "BLM", "Computer Engineering"))
///     .with_classroom(Classroom::normal(ClassroomId(1), "D101", 60))
///     .with_course(Course::new(CourseId(1), "BLM101", 1).with_department(DepartmentId(1)));
///
/// let mut store = ScheduleStore::new();
/// let mut rng = SmallRng::seed_from_u64(42);
/// let report = PlacementEngine::default()
///     .generate(&catalog, &mut store, Term::Fall, &mut rng)
///     .unwrap();
///
/// assert!(report.is_complete());
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Regenerates the schedule for a term.
    ///
    /// On any error the store is left exactly as it was.
    ///
    /// # Errors
    /// - `Configuration` for unusable settings or missing reference data
    /// - `Validation` if the catalog fails its integrity checks
    pub fn generate<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        store: &mut ScheduleStore,
        term: Term,
        rng: &mut R,
    ) -> Result<GenerationReport> {
        self.generate_with_cancel(catalog, store, term, rng, &CancelFlag::new())
    }

    /// Like [`generate`](Self::generate), returning `Cancelled` (with the
    /// store untouched) once `cancel` is raised.
    pub fn generate_with_cancel<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        store: &mut ScheduleStore,
        term: Term,
        rng: &mut R,
        cancel: &CancelFlag,
    ) -> Result<GenerationReport> {
        self.config.validate()?;
        validate_catalog(catalog).map_err(TimetableError::Validation)?;

        let semesters = term.semesters();
        let targets: Vec<&Course> = catalog.courses_in_semesters(semesters).collect();
        let rooms = self.check_reference_data(catalog, &targets)?;
        let passes = plan_passes(
            catalog,
            &targets,
            self.config.policy,
            &self.config.department_priority,
        )?;

        info!(
            term = %term,
            courses = targets.len(),
            classrooms = catalog.classrooms().len(),
            policy = ?self.config.policy,
            "schedule generation started"
        );

        let mut working = store.clone();
        let cleared = match self.config.clear_scope {
            ClearScope::All => working.clear_all(),
            ClearScope::TargetedSemesters => working.clear_semesters(catalog, semesters),
        };

        let mut placed = Vec::new();
        let mut failures = Vec::new();
        for pass in &passes {
            debug!(pass = %pass.kind, courses = pass.courses.len(), "pass started");
            for course in &pass.courses {
                if cancel.is_cancelled() {
                    info!(term = %term, placed = placed.len(), "schedule generation cancelled");
                    return Err(TimetableError::Cancelled);
                }
                match self.place_course(catalog, &mut working, &rooms, course, rng) {
                    Attempted::Placed { entry, attempts } => {
                        debug!(
                            course = %course.code,
                            day = %entry.day,
                            window = %entry.window,
                            classroom = %entry.classroom_id,
                            attempts,
                            "course placed"
                        );
                        placed.push(entry);
                    }
                    Attempted::Failed { reason, attempts } => {
                        warn!(
                            course = %course.code,
                            pass = %pass.kind,
                            %reason,
                            attempts,
                            "course could not be placed"
                        );
                        failures.push(PlacementFailure {
                            course_id: course.id,
                            course_code: course.code.clone(),
                            pass: pass.kind.clone(),
                            attempts,
                            reason,
                        });
                    }
                }
            }
        }

        store.replace(working);

        let report = GenerationReport {
            term,
            semesters: semesters.to_vec(),
            clear_scope: self.config.clear_scope,
            cleared,
            placed,
            failures,
        };
        info!(
            term = %term,
            placed = report.placed.len(),
            unplaced = report.failures.len(),
            cleared,
            "schedule generation finished"
        );
        Ok(report)
    }

    /// Fails fast when the catalog cannot host the target courses at all.
    fn check_reference_data(&self, catalog: &Catalog, targets: &[&Course]) -> Result<RoomPools> {
        let rooms = RoomPools {
            labs: catalog
                .classrooms_of_kind(ClassroomKind::Lab)
                .iter()
                .map(|c| c.id)
                .collect(),
            normals: catalog
                .classrooms_of_kind(ClassroomKind::Normal)
                .iter()
                .map(|c| c.id)
                .collect(),
        };
        if targets.is_empty() {
            return Ok(rooms);
        }

        if catalog.departments().is_empty() {
            return Err(TimetableError::configuration(
                "courses to place but no departments defined",
            ));
        }
        if rooms.labs.is_empty() && rooms.normals.is_empty() {
            return Err(TimetableError::configuration("no classrooms defined"));
        }
        if rooms.normals.is_empty() {
            if let Some(course) = targets.iter().find(|c| !c.needs_lab()) {
                return Err(TimetableError::configuration(format!(
                    "no NORMAL classroom for theory-only course {}",
                    course.code
                )));
            }
        }
        Ok(rooms)
    }

    fn place_course<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        store: &mut ScheduleStore,
        rooms: &RoomPools,
        course: &Course,
        rng: &mut R,
    ) -> Attempted {
        let mut reason = FailureReason::NoConflictFreeSlot;

        for attempt in 1..=self.config.max_attempts {
            let (Some(&day), Some(&slot)) =
                (self.config.days.choose(rng), self.config.slots.choose(rng))
            else {
                break;
            };

            let checker = ConflictChecker::new(catalog, store);
            let conflicts = checker.time_conflicts(course, day, &slot);
            if !conflicts.is_empty() {
                debug!(
                    course = %course.code,
                    day = %day,
                    window = %slot,
                    conflicts = conflicts.len(),
                    "attempt rejected"
                );
                continue;
            }

            let Some(classroom_id) = pick_classroom(&checker, rooms, course, day, &slot, rng) else {
                debug!(course = %course.code, day = %day, window = %slot, "no free classroom");
                reason = FailureReason::NoFreeClassroom;
                continue;
            };

            let entry = store.insert_unchecked(
                catalog,
                NewEntry::new(course.id, classroom_id, day, slot),
            );
            return Attempted::Placed {
                entry,
                attempts: attempt,
            };
        }

        Attempted::Failed {
            reason,
            attempts: self.config.max_attempts,
        }
    }
}

/// A LAB when the course has practice hours and one is free, otherwise a
/// free NORMAL room.
fn pick_classroom<R: Rng + ?Sized>(
    checker: &ConflictChecker<'_>,
    rooms: &RoomPools,
    course: &Course,
    day: Day,
    slot: &TimeWindow,
    rng: &mut R,
) -> Option<ClassroomId> {
    let free = |pool: &[ClassroomId]| -> Vec<ClassroomId> {
        pool.iter()
            .copied()
            .filter(|&id| checker.is_classroom_free(id, day, slot))
            .collect()
    };

    if course.needs_lab() {
        if let Some(&id) = free(&rooms.labs).choose(rng) {
            return Some(id);
        }
    }
    let normals = free(&rooms.normals);
    normals.choose(rng).copied()
}
