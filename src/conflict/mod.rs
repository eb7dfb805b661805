//! Conflict detection for candidate placements.
//!
//! A placement is valid when it passes three checks against the stored
//! entries and the instructor blackouts in the catalog:
//!
//! | Check | Collides with | Time test |
//! |-------|---------------|-----------|
//! | Instructor | blackout windows and the instructor's other entries | overlap |
//! | Classroom | entries in the same classroom | overlap |
//! | Cohort | entries of a shared department in the same semester | identical window |
//!
//! The cohort check compares windows exactly because generated placements
//! only ever use the fixed slot set.
//!
//! The checker never mutates anything. It reports every colliding entry
//! or blackout so callers can explain a rejection.

mod index;

pub use index::OccupancyIndex;

use serde::Serialize;
use std::fmt;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{
    ClassroomId, Course, Day, DepartmentId, EntryId, InstructorId, NewEntry, ScheduleEntry, TimeWindow,
    UnavailableTime,
};
use crate::store::ScheduleStore;

/// One reason a candidate placement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Conflict {
    /// The instructor declared a blackout overlapping the window.
    InstructorUnavailable {
        instructor_id: InstructorId,
        unavailable: UnavailableTime,
    },
    /// The instructor already teaches an overlapping entry.
    InstructorBusy {
        instructor_id: InstructorId,
        entry: ScheduleEntry,
    },
    /// The classroom is already booked for an overlapping entry.
    ClassroomOccupied {
        classroom_id: ClassroomId,
        entry: ScheduleEntry,
    },
    /// A course of the same department and semester holds the same slot.
    CohortOccupied {
        department_id: DepartmentId,
        semester: u8,
        entry: ScheduleEntry,
    },
}

impl Conflict {
    /// The colliding stored entry, if the conflict is with one.
    pub fn entry(&self) -> Option<&ScheduleEntry> {
        match self {
            Conflict::InstructorUnavailable { .. } => None,
            Conflict::InstructorBusy { entry, .. }
            | Conflict::ClassroomOccupied { entry, .. }
            | Conflict::CohortOccupied { entry, .. } => Some(entry),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::InstructorUnavailable {
                instructor_id,
                unavailable,
            } => {
                write!(
                    f,
                    "instructor {} is unavailable on {} {}",
                    instructor_id, unavailable.day, unavailable.window
                )?;
                if let Some(reason) = &unavailable.reason {
                    write!(f, " ({reason})")?;
                }
                Ok(())
            }
            Conflict::InstructorBusy {
                instructor_id,
                entry,
            } => write!(
                f,
                "instructor {} already teaches course {} on {} {} (entry {})",
                instructor_id, entry.course_id, entry.day, entry.window, entry.id
            ),
            Conflict::ClassroomOccupied {
                classroom_id,
                entry,
            } => write!(
                f,
                "classroom {} is booked by course {} on {} {} (entry {})",
                classroom_id, entry.course_id, entry.day, entry.window, entry.id
            ),
            Conflict::CohortOccupied {
                department_id,
                semester,
                entry,
            } => write!(
                f,
                "department {} semester {} already has course {} on {} {} (entry {})",
                department_id, semester, entry.course_id, entry.day, entry.window, entry.id
            ),
        }
    }
}

/// Read-only conflict queries over a catalog and a store.
#[derive(Debug, Clone, Copy)]
pub struct ConflictChecker<'a> {
    catalog: &'a Catalog,
    store: &'a ScheduleStore,
}

impl<'a> ConflictChecker<'a> {
    pub fn new(catalog: &'a Catalog, store: &'a ScheduleStore) -> Self {
        Self { catalog, store }
    }

    /// Blackouts and teaching entries of the course's instructor that
    /// overlap the window. Empty when the course has no instructor.
    pub fn instructor_conflicts(
        &self,
        course: &Course,
        day: Day,
        window: &TimeWindow,
    ) -> Vec<Conflict> {
        let Some(instructor_id) = course.instructor_id else {
            return Vec::new();
        };

        let mut conflicts: Vec<Conflict> = self
            .catalog
            .unavailable_for(instructor_id, day)
            .filter(|u| u.blocks(day, window))
            .map(|u| Conflict::InstructorUnavailable {
                instructor_id,
                unavailable: u.clone(),
            })
            .collect();

        conflicts.extend(
            self.entries(self.store.index().instructor(instructor_id, day))
                .filter(|e| e.window.overlaps(window))
                .map(|e| Conflict::InstructorBusy {
                    instructor_id,
                    entry: *e,
                }),
        );
        conflicts
    }

    /// Entries in the classroom whose window overlaps.
    pub fn classroom_conflicts(
        &self,
        classroom_id: ClassroomId,
        day: Day,
        window: &TimeWindow,
    ) -> Vec<Conflict> {
        self.entries(self.store.index().classroom(classroom_id, day))
            .filter(|e| e.window.overlaps(window))
            .map(|e| Conflict::ClassroomOccupied {
                classroom_id,
                entry: *e,
            })
            .collect()
    }

    /// Whether no entry in the classroom overlaps the window.
    pub fn is_classroom_free(&self, classroom_id: ClassroomId, day: Day, window: &TimeWindow) -> bool {
        self.entries(self.store.index().classroom(classroom_id, day))
            .all(|e| !e.window.overlaps(window))
    }

    /// Entries of any department of the course, in the same semester,
    /// holding exactly the same window.
    pub fn cohort_conflicts(&self, course: &Course, day: Day, window: &TimeWindow) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for &department_id in &course.department_ids {
            conflicts.extend(
                self.entries(
                    self.store
                        .index()
                        .cohort(department_id, course.semester, day),
                )
                .filter(|e| e.window == *window)
                .map(|e| Conflict::CohortOccupied {
                    department_id,
                    semester: course.semester,
                    entry: *e,
                }),
            );
        }
        conflicts
    }

    /// Instructor and cohort conflicts: everything that does not depend
    /// on the classroom.
    pub fn time_conflicts(&self, course: &Course, day: Day, window: &TimeWindow) -> Vec<Conflict> {
        let mut conflicts = self.instructor_conflicts(course, day, window);
        conflicts.extend(self.cohort_conflicts(course, day, window));
        conflicts
    }

    /// All three checks for a candidate placement.
    ///
    /// # Errors
    /// `NotFound` when the course or classroom is not in the catalog.
    pub fn check(&self, candidate: &NewEntry) -> Result<Vec<Conflict>> {
        let course = self.catalog.course(candidate.course_id)?;
        self.catalog.classroom(candidate.classroom_id)?;

        let mut conflicts = self.time_conflicts(course, candidate.day, &candidate.window);
        conflicts.extend(self.classroom_conflicts(
            candidate.classroom_id,
            candidate.day,
            &candidate.window,
        ));
        Ok(conflicts)
    }

    fn entries(&self, ids: &'a [EntryId]) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        let store = self.store;
        ids.iter().filter_map(move |&id| store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use crate::testing;

    fn slot(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end).unwrap()
    }

    #[test]
    fn test_instructor_blackout_overlap() {
        // Blackout 09:00-12:00 rejects the 09:00-11:50 slot.
        let catalog = testing::two_department_catalog().with_unavailable_time(UnavailableTime::new(
            UnavailableTimeId(1),
            InstructorId(10),
            Day::Monday,
            slot("09:00", "12:00"),
        ));
        let store = ScheduleStore::new();
        let checker = ConflictChecker::new(&catalog, &store);
        let course = catalog.course(CourseId(1)).unwrap();

        let conflicts = checker.instructor_conflicts(course, Day::Monday, &slot("09:00", "11:50"));
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(
            conflicts[0],
            Conflict::InstructorUnavailable { .. }
        ));
        assert!(conflicts[0].entry().is_none());

        assert!(checker
            .instructor_conflicts(course, Day::Monday, &slot("13:00", "15:50"))
            .is_empty());
        assert!(checker
            .instructor_conflicts(course, Day::Tuesday, &slot("09:00", "11:50"))
            .is_empty());
    }

    #[test]
    fn test_instructor_busy() {
        let catalog = testing::two_department_catalog();
        let mut store = ScheduleStore::new();
        // MAT101 and BLM201 share instructor 10
        let existing = store
            .add_one(
                &catalog,
                NewEntry::new(CourseId(1), ClassroomId(1), Day::Monday, slot("09:00", "11:50")),
            )
            .unwrap();

        let checker = ConflictChecker::new(&catalog, &store);
        let other = catalog.course(CourseId(2)).unwrap();
        let conflicts = checker.instructor_conflicts(other, Day::Monday, &slot("11:00", "12:00"));
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].entry(), Some(&existing));

        assert!(checker
            .instructor_conflicts(other, Day::Monday, &slot("11:50", "13:00"))
            .is_empty());
    }

    #[test]
    fn test_classroom_overlap() {
        let catalog = testing::two_department_catalog();
        let mut store = ScheduleStore::new();
        store
            .add_one(
                &catalog,
                NewEntry::new(CourseId(1), ClassroomId(1), Day::Monday, slot("09:00", "11:50")),
            )
            .unwrap();
        let checker = ConflictChecker::new(&catalog, &store);

        assert_eq!(
            checker
                .classroom_conflicts(ClassroomId(1), Day::Monday, &slot("10:00", "10:30"))
                .len(),
            1
        );
        assert!(!checker.is_classroom_free(ClassroomId(1), Day::Monday, &slot("10:00", "10:30")));
        assert!(checker.is_classroom_free(ClassroomId(2), Day::Monday, &slot("10:00", "10:30")));
        assert!(checker.is_classroom_free(ClassroomId(1), Day::Monday, &slot("13:00", "15:50")));
    }

    #[test]
    fn test_cohort_requires_identical_slot() {
        let catalog = testing::two_department_catalog();
        let mut store = ScheduleStore::new();
        // BLM301 (semester 3, BLM)
        store
            .add_one(
                &catalog,
                NewEntry::new(CourseId(3), ClassroomId(1), Day::Monday, slot("09:00", "11:50")),
            )
            .unwrap();
        let checker = ConflictChecker::new(&catalog, &store);

        // ORT301 is shared by BLM and YZM, also semester 3
        let shared = catalog.course(CourseId(4)).unwrap();
        let conflicts = checker.cohort_conflicts(shared, Day::Monday, &slot("09:00", "11:50"));
        assert_eq!(conflicts.len(), 1);
        assert!(matches!(
            conflicts[0],
            Conflict::CohortOccupied {
                department_id: DepartmentId(1),
                semester: 3,
                ..
            }
        ));

        // Overlapping but not identical is not a cohort conflict
        assert!(checker
            .cohort_conflicts(shared, Day::Monday, &slot("10:00", "12:00"))
            .is_empty());

        // Different semester of the same department is fine
        let first_year = catalog.course(CourseId(1)).unwrap();
        assert!(checker
            .cohort_conflicts(first_year, Day::Monday, &slot("09:00", "11:50"))
            .is_empty());
    }

    #[test]
    fn test_check_unknown_references() {
        let catalog = testing::two_department_catalog();
        let store = ScheduleStore::new();
        let checker = ConflictChecker::new(&catalog, &store);

        let unknown_course =
            NewEntry::new(CourseId(99), ClassroomId(1), Day::Monday, slot("09:00", "11:50"));
        assert!(checker.check(&unknown_course).unwrap_err().is_not_found());

        let unknown_room =
            NewEntry::new(CourseId(1), ClassroomId(99), Day::Monday, slot("09:00", "11:50"));
        assert!(checker.check(&unknown_room).unwrap_err().is_not_found());
    }

    #[test]
    fn test_conflict_display() {
        let entry = ScheduleEntry::from_new(
            EntryId(7),
            NewEntry::new(CourseId(5), ClassroomId(2), Day::Monday, slot("09:00", "11:50")),
        );
        let conflict = Conflict::ClassroomOccupied {
            classroom_id: ClassroomId(2),
            entry,
        };
        assert_eq!(
            conflict.to_string(),
            "classroom 2 is booked by course 5 on Monday 09:00-11:50 (entry 7)"
        );
    }
}
