//! Schedule entry storage.
//!
//! [`ScheduleStore`] owns the placed entries and keeps an
//! [`OccupancyIndex`] in step with them. Every mutating operation either
//! completes or leaves the store untouched:
//! - `add_one` checks for conflicts before inserting
//! - `bulk_insert` stages the whole batch on a copy first
//! - `replace` swaps in a fully built store (used to commit a generation run)
//!
//! [`SharedScheduleStore`] wraps the store for concurrent callers.

mod shared;

pub use shared::SharedScheduleStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::conflict::{ConflictChecker, OccupancyIndex};
use crate::error::{EntityKind, Result, TimetableError};
use crate::models::{ClassroomId, CourseId, Day, EntryId, InstructorId, NewEntry, ScheduleEntry};

/// Filter for [`ScheduleStore::query`]. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryQuery {
    pub day: Option<Day>,
    pub instructor_id: Option<InstructorId>,
    pub classroom_id: Option<ClassroomId>,
    pub course_id: Option<CourseId>,
}

impl EntryQuery {
    /// Matches every entry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_instructor(mut self, instructor_id: InstructorId) -> Self {
        self.instructor_id = Some(instructor_id);
        self
    }

    pub fn with_classroom(mut self, classroom_id: ClassroomId) -> Self {
        self.classroom_id = Some(classroom_id);
        self
    }

    pub fn with_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }

    fn matches(&self, catalog: &Catalog, entry: &ScheduleEntry) -> bool {
        if self.day.is_some_and(|d| d != entry.day) {
            return false;
        }
        if self.classroom_id.is_some_and(|c| c != entry.classroom_id) {
            return false;
        }
        if self.course_id.is_some_and(|c| c != entry.course_id) {
            return false;
        }
        if let Some(instructor_id) = self.instructor_id {
            let teaches = catalog
                .course(entry.course_id)
                .is_ok_and(|c| c.instructor_id == Some(instructor_id));
            if !teaches {
                return false;
            }
        }
        true
    }
}

#[derive(Deserialize)]
struct StoredEntries {
    entries: Vec<ScheduleEntry>,
}

/// In-memory set of schedule entries.
///
/// Serializes as `{"entries": [...]}`. The occupancy index is derived
/// state and is rebuilt from the catalog on load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleStore {
    #[serde(serialize_with = "serialize_entries")]
    entries: BTreeMap<EntryId, ScheduleEntry>,
    #[serde(skip)]
    next_id: u64,
    #[serde(skip)]
    index: OccupancyIndex,
}

fn serialize_entries<S: serde::Serializer>(
    entries: &BTreeMap<EntryId, ScheduleEntry>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(entries.values())
}

impl ScheduleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads entries previously written with `serde_json`, keeping their ids.
    ///
    /// Entries are indexed against `catalog`; they are not re-checked for
    /// conflicts.
    pub fn from_json_str(catalog: &Catalog, json: &str) -> Result<Self> {
        let stored: StoredEntries = serde_json::from_str(json)?;
        let mut store = Self::new();
        for entry in stored.entries {
            if store.entries.contains_key(&entry.id) {
                return Err(TimetableError::invalid_input(format!(
                    "duplicate schedule entry id {}",
                    entry.id
                )));
            }
            store.next_id = store.next_id.max(entry.id.value());
            store.entries.insert(entry.id, entry);
        }
        store.reindex(catalog);
        Ok(store)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by id.
    pub fn get(&self, id: EntryId) -> Option<&ScheduleEntry> {
        self.entries.get(&id)
    }

    /// All entries in id order.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.values()
    }

    /// Entries placing the given course.
    pub fn entries_for_course(&self, course_id: CourseId) -> Vec<&ScheduleEntry> {
        self.entries
            .values()
            .filter(|e| e.course_id == course_id)
            .collect()
    }

    pub(crate) fn index(&self) -> &OccupancyIndex {
        &self.index
    }

    /// Entries matching every set field of the query, in id order.
    pub fn query(&self, catalog: &Catalog, query: &EntryQuery) -> Vec<&ScheduleEntry> {
        self.entries
            .values()
            .filter(|e| query.matches(catalog, e))
            .collect()
    }

    /// Removes every entry. Returns how many were removed.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.index.clear();
        debug!(removed, "schedule cleared");
        removed
    }

    /// Removes the entries whose course belongs to one of the semesters.
    /// Entries whose course is not in the catalog are kept.
    pub fn clear_semesters(&mut self, catalog: &Catalog, semesters: &[u8]) -> usize {
        let doomed: Vec<EntryId> = self
            .entries
            .values()
            .filter(|e| {
                catalog
                    .course(e.course_id)
                    .is_ok_and(|c| semesters.contains(&c.semester))
            })
            .map(|e| e.id)
            .collect();
        for id in &doomed {
            self.entries.remove(id);
            self.index.remove(*id);
        }
        debug!(removed = doomed.len(), ?semesters, "semesters cleared");
        doomed.len()
    }

    /// Validates a candidate and inserts it.
    ///
    /// # Errors
    /// - `NotFound` if the course or classroom is unknown
    /// - `Conflict` listing every colliding entry or blackout
    pub fn add_one(&mut self, catalog: &Catalog, candidate: NewEntry) -> Result<ScheduleEntry> {
        let conflicts = ConflictChecker::new(catalog, self).check(&candidate)?;
        if !conflicts.is_empty() {
            debug!(
                course = %candidate.course_id,
                day = %candidate.day,
                window = %candidate.window,
                conflicts = conflicts.len(),
                "manual placement rejected"
            );
            return Err(TimetableError::Conflict { conflicts });
        }
        let entry = self.insert_unchecked(catalog, candidate);
        debug!(
            id = %entry.id,
            course = %entry.course_id,
            classroom = %entry.classroom_id,
            day = %entry.day,
            window = %entry.window,
            "entry added"
        );
        Ok(entry)
    }

    /// Inserts a batch of candidates, all or nothing.
    ///
    /// Each candidate is checked against the stored entries and against
    /// the candidates before it.
    pub fn bulk_insert(
        &mut self,
        catalog: &Catalog,
        candidates: impl IntoIterator<Item = NewEntry>,
    ) -> Result<Vec<ScheduleEntry>> {
        let mut staged = self.clone();
        let mut inserted = Vec::new();
        for candidate in candidates {
            inserted.push(staged.add_one(catalog, candidate)?);
        }
        *self = staged;
        Ok(inserted)
    }

    /// Inserts a candidate the caller has already checked.
    pub(crate) fn insert_unchecked(&mut self, catalog: &Catalog, candidate: NewEntry) -> ScheduleEntry {
        self.next_id += 1;
        let entry = ScheduleEntry::from_new(EntryId(self.next_id), candidate);
        self.index.insert(&entry, catalog.course(entry.course_id).ok());
        self.entries.insert(entry.id, entry);
        entry
    }

    /// Removes an entry.
    ///
    /// # Errors
    /// `NotFound` if no entry has this id.
    pub fn remove(&mut self, id: EntryId) -> Result<ScheduleEntry> {
        let entry = self
            .entries
            .remove(&id)
            .ok_or_else(|| TimetableError::not_found(EntityKind::Entry, id))?;
        self.index.remove(id);
        debug!(id = %id, course = %entry.course_id, "entry removed");
        Ok(entry)
    }

    /// Rebuilds the occupancy index, e.g. after course instructors or
    /// departments changed in the catalog.
    pub fn reindex(&mut self, catalog: &Catalog) {
        self.index.clear();
        for entry in self.entries.values() {
            self.index.insert(entry, catalog.course(entry.course_id).ok());
        }
    }

    /// Swaps in another store and returns the previous contents.
    pub fn replace(&mut self, other: ScheduleStore) -> ScheduleStore {
        std::mem::replace(self, other)
    }
}
