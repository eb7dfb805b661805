//! Denormalized read models of a schedule.
//!
//! Every view resolves entry references against the catalog, so a stale
//! entry (course or classroom no longer in the catalog) is reported as
//! `NotFound` instead of being silently dropped.

use chrono::NaiveTime;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{ClassroomId, Course, Day, DepartmentId, EntryId, InstructorId, ScheduleEntry};
use crate::store::ScheduleStore;

/// Number of study years covered by [`GradeGrid`].
pub const STUDY_YEARS: u8 = 4;

/// One entry with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub entry_id: EntryId,
    pub day: Day,
    #[serde(with = "crate::models::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "crate::models::hhmm")]
    pub end: NaiveTime,
    pub course_code: String,
    pub course_name: String,
    pub semester: u8,
    pub classroom_code: String,
    /// Department codes joined with `", "`.
    pub departments: String,
    /// Empty when the course has no instructor.
    pub instructor: String,
}

impl ScheduleRow {
    /// Resolves an entry against the catalog.
    pub fn resolve(catalog: &Catalog, entry: &ScheduleEntry) -> Result<Self> {
        let course = catalog.course(entry.course_id)?;
        let classroom = catalog.classroom(entry.classroom_id)?;
        let instructor = match course.instructor_id {
            Some(id) => catalog.instructor(id)?.name.clone(),
            None => String::new(),
        };

        Ok(Self {
            entry_id: entry.id,
            day: entry.day,
            start: entry.window.start(),
            end: entry.window.end(),
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            semester: course.semester,
            classroom_code: classroom.code.clone(),
            departments: department_codes(catalog, course)?.join(", "),
            instructor,
        })
    }

    /// `"HH:MM-HH:MM"` text of the entry's window.
    pub fn time_range(&self) -> String {
        format!("{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }

    /// Multi-line text used in grade grid cells.
    pub fn cell_text(&self) -> String {
        let first_department = self.departments.split(", ").next().unwrap_or_default();
        let mut text = format!(
            "{} - {} ({}, semester {})\nRoom: {}\nTime: {}",
            self.course_code,
            self.course_name,
            first_department,
            self.semester,
            self.classroom_code,
            self.time_range()
        );
        if !self.instructor.is_empty() {
            text.push_str("\nInstructor: ");
            text.push_str(&self.instructor);
        }
        text
    }
}

fn department_codes(catalog: &Catalog, course: &Course) -> Result<Vec<String>> {
    course
        .department_ids
        .iter()
        .map(|&id| catalog.department(id).map(|d| d.code.clone()))
        .collect()
}

fn resolve_all<'a>(
    catalog: &Catalog,
    entries: impl Iterator<Item = &'a ScheduleEntry>,
) -> Result<Vec<ScheduleRow>> {
    entries.map(|e| ScheduleRow::resolve(catalog, e)).collect()
}

fn by_day_and_start(rows: &mut [ScheduleRow]) {
    rows.sort_by(|a, b| {
        (a.day, a.start, &a.course_code).cmp(&(b.day, b.start, &b.course_code))
    });
}

/// Every entry, ordered by day, start time and course code.
pub fn all_rows(catalog: &Catalog, store: &ScheduleStore) -> Result<Vec<ScheduleRow>> {
    let mut rows = resolve_all(catalog, store.entries())?;
    by_day_and_start(&mut rows);
    Ok(rows)
}

/// Entries of courses serving the department, ordered by semester, day
/// and start time.
pub fn department_view(
    catalog: &Catalog,
    store: &ScheduleStore,
    department_id: DepartmentId,
) -> Result<Vec<ScheduleRow>> {
    catalog.department(department_id)?;
    let entries = store.entries().filter(|e| {
        catalog
            .course(e.course_id)
            .is_ok_and(|c| c.belongs_to(department_id))
    });
    let mut rows = resolve_all(catalog, entries)?;
    rows.sort_by(|a, b| (a.semester, a.day, a.start).cmp(&(b.semester, b.day, b.start)));
    Ok(rows)
}

/// An instructor's teaching week, ordered by day and start time.
pub fn instructor_view(
    catalog: &Catalog,
    store: &ScheduleStore,
    instructor_id: InstructorId,
) -> Result<Vec<ScheduleRow>> {
    catalog.instructor(instructor_id)?;
    let entries = store.entries().filter(|e| {
        catalog
            .course(e.course_id)
            .is_ok_and(|c| c.instructor_id == Some(instructor_id))
    });
    let mut rows = resolve_all(catalog, entries)?;
    by_day_and_start(&mut rows);
    Ok(rows)
}

/// A classroom's bookings, ordered by day and start time.
pub fn classroom_view(
    catalog: &Catalog,
    store: &ScheduleStore,
    classroom_id: ClassroomId,
) -> Result<Vec<ScheduleRow>> {
    catalog.classroom(classroom_id)?;
    let entries = store
        .entries()
        .filter(|e| e.classroom_id == classroom_id);
    let mut rows = resolve_all(catalog, entries)?;
    by_day_and_start(&mut rows);
    Ok(rows)
}

/// Weekly overview: one row per day, one column per year of study.
///
/// Year `g` holds semesters `2g-1` and `2g`. A cell lists the entries of
/// courses serving any of the selected departments, sorted by start time.
#[derive(Debug, Clone, Serialize)]
pub struct GradeGrid {
    /// Codes of the departments shown.
    pub departments: Vec<String>,
    pub days: Vec<Day>,
    /// `cells[day_index][year - 1]`.
    cells: Vec<Vec<Vec<ScheduleRow>>>,
}

impl GradeGrid {
    /// Builds the grid for the given departments and days.
    pub fn build(
        catalog: &Catalog,
        store: &ScheduleStore,
        departments: &[DepartmentId],
        days: &[Day],
    ) -> Result<Self> {
        let codes = departments
            .iter()
            .map(|&id| catalog.department(id).map(|d| d.code.clone()))
            .collect::<Result<Vec<_>>>()?;

        let mut cells = vec![vec![Vec::new(); usize::from(STUDY_YEARS)]; days.len()];
        for entry in store.entries() {
            let course = catalog.course(entry.course_id)?;
            if !departments.iter().any(|&d| course.belongs_to(d)) {
                continue;
            }
            let Some(row_index) = days.iter().position(|&d| d == entry.day) else {
                continue;
            };
            let year = course.year();
            if !(1..=STUDY_YEARS).contains(&year) {
                continue;
            }
            cells[row_index][usize::from(year - 1)].push(ScheduleRow::resolve(catalog, entry)?);
        }
        for row in &mut cells {
            for cell in row.iter_mut() {
                by_day_and_start(cell);
            }
        }

        Ok(Self {
            departments: codes,
            days: days.to_vec(),
            cells,
        })
    }

    /// Entries for a day and a year of study (1..=4). Empty when either is
    /// outside the grid.
    pub fn cell(&self, day: Day, year: u8) -> &[ScheduleRow] {
        if !(1..=STUDY_YEARS).contains(&year) {
            return &[];
        }
        self.days
            .iter()
            .position(|&d| d == day)
            .and_then(|i| self.cells.get(i))
            .and_then(|row| row.get(usize::from(year - 1)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
