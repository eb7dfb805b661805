//! Occupancy index over stored entries.
//!
//! Buckets entry ids by (classroom, day), (instructor, day) and
//! (department, semester, day) so that a conflict check only visits the
//! entries that share its day and resource.

use std::collections::HashMap;

use crate::models::{ClassroomId, Course, Day, DepartmentId, EntryId, InstructorId, ScheduleEntry};

/// Keys an entry was indexed under, kept so removal needs no catalog.
#[derive(Debug, Clone)]
struct Footprint {
    classroom: (ClassroomId, Day),
    instructor: Option<(InstructorId, Day)>,
    cohorts: Vec<(DepartmentId, u8, Day)>,
}

/// Entry ids bucketed by the resources they occupy.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    by_classroom: HashMap<(ClassroomId, Day), Vec<EntryId>>,
    by_instructor: HashMap<(InstructorId, Day), Vec<EntryId>>,
    by_cohort: HashMap<(DepartmentId, u8, Day), Vec<EntryId>>,
    footprints: HashMap<EntryId, Footprint>,
}

impl OccupancyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes an entry.
    ///
    /// `course` is the catalog record of the entry's course. When it is
    /// unknown the entry is indexed by classroom only.
    pub fn insert(&mut self, entry: &ScheduleEntry, course: Option<&Course>) {
        let classroom = (entry.classroom_id, entry.day);
        self.by_classroom.entry(classroom).or_default().push(entry.id);

        let instructor = course
            .and_then(|c| c.instructor_id)
            .map(|instructor_id| (instructor_id, entry.day));
        if let Some(key) = instructor {
            self.by_instructor.entry(key).or_default().push(entry.id);
        }

        let cohorts: Vec<_> = course
            .map(|c| {
                c.department_ids
                    .iter()
                    .map(|&d| (d, c.semester, entry.day))
                    .collect()
            })
            .unwrap_or_default();
        for key in &cohorts {
            self.by_cohort.entry(*key).or_default().push(entry.id);
        }

        self.footprints.insert(
            entry.id,
            Footprint {
                classroom,
                instructor,
                cohorts,
            },
        );
    }

    /// Drops an entry from every bucket it was indexed under.
    pub fn remove(&mut self, id: EntryId) {
        let Some(footprint) = self.footprints.remove(&id) else {
            return;
        };
        detach(&mut self.by_classroom, &footprint.classroom, id);
        if let Some(key) = footprint.instructor {
            detach(&mut self.by_instructor, &key, id);
        }
        for key in &footprint.cohorts {
            detach(&mut self.by_cohort, key, id);
        }
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.by_classroom.clear();
        self.by_instructor.clear();
        self.by_cohort.clear();
        self.footprints.clear();
    }

    /// Entries booked in a classroom on a day.
    pub fn classroom(&self, classroom_id: ClassroomId, day: Day) -> &[EntryId] {
        self.by_classroom
            .get(&(classroom_id, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entries taught by an instructor on a day.
    pub fn instructor(&self, instructor_id: InstructorId, day: Day) -> &[EntryId] {
        self.by_instructor
            .get(&(instructor_id, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entries of a department cohort on a day.
    pub fn cohort(&self, department_id: DepartmentId, semester: u8, day: Day) -> &[EntryId] {
        self.by_cohort
            .get(&(department_id, semester, day))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.footprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footprints.is_empty()
    }
}

fn detach<K: std::hash::Hash + Eq>(map: &mut HashMap<K, Vec<EntryId>>, key: &K, id: EntryId) {
    if let Some(ids) = map.get_mut(key) {
        ids.retain(|&e| e != id);
        if ids.is_empty() {
            map.remove(key);
        }
    }
}
