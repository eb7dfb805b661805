//! Reference data snapshot.
//!
//! The catalog is the input contract of the timetabler: departments,
//! courses, classrooms, instructors, and instructor blackout windows,
//! all keyed by stable integer identifiers. It is loaded from the
//! enclosing system (or JSON) and read by the conflict checker and the
//! placement engine.
//!
//! Insertion order is preserved so that placement passes iterate courses
//! and departments deterministically.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EntityKind, Result, TimetableError};
use crate::models::{
    Classroom, ClassroomId, ClassroomKind, Course, CourseId, Day, Department, DepartmentId,
    Instructor, InstructorId, TimeWindow, UnavailableTime, UnavailableTimeId,
};

/// Serializable form of a [`Catalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSnapshot {
    pub departments: Vec<Department>,
    pub courses: Vec<Course>,
    pub classrooms: Vec<Classroom>,
    pub instructors: Vec<Instructor>,
    pub unavailable_times: Vec<UnavailableTime>,
}

/// Indexed reference data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    departments: Vec<Department>,
    courses: Vec<Course>,
    classrooms: Vec<Classroom>,
    instructors: Vec<Instructor>,
    unavailable: Vec<UnavailableTime>,
    department_index: HashMap<DepartmentId, usize>,
    course_index: HashMap<CourseId, usize>,
    classroom_index: HashMap<ClassroomId, usize>,
    instructor_index: HashMap<InstructorId, usize>,
    blackout_index: HashMap<(InstructorId, Day), Vec<usize>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from its serializable form.
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut catalog = Self::new();
        for d in snapshot.departments {
            catalog.insert_department(d);
        }
        for c in snapshot.courses {
            catalog.insert_course(c);
        }
        for r in snapshot.classrooms {
            catalog.insert_classroom(r);
        }
        for i in snapshot.instructors {
            catalog.insert_instructor(i);
        }
        for u in snapshot.unavailable_times {
            catalog.unavailable.push(u);
        }
        catalog.rebuild_blackout_index();
        catalog
    }

    /// Parses a JSON [`CatalogSnapshot`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Reads a JSON [`CatalogSnapshot`] from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serializable copy of the catalog.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            departments: self.departments.clone(),
            courses: self.courses.clone(),
            classrooms: self.classrooms.clone(),
            instructors: self.instructors.clone(),
            unavailable_times: self.unavailable.clone(),
        }
    }

    /// Adds a department.
    pub fn with_department(mut self, department: Department) -> Self {
        self.insert_department(department);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.insert_course(course);
        self
    }

    /// Adds a classroom.
    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.insert_classroom(classroom);
        self
    }

    /// Adds an instructor.
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.insert_instructor(instructor);
        self
    }

    /// Adds a blackout window as-is (no idempotency check).
    pub fn with_unavailable_time(mut self, unavailable: UnavailableTime) -> Self {
        self.push_unavailable(unavailable);
        self
    }

    // Lookup maps keep the first occurrence; duplicates are reported by validation.
    fn insert_department(&mut self, department: Department) {
        self.department_index
            .entry(department.id)
            .or_insert(self.departments.len());
        self.departments.push(department);
    }

    fn insert_course(&mut self, course: Course) {
        self.course_index.entry(course.id).or_insert(self.courses.len());
        self.courses.push(course);
    }

    fn insert_classroom(&mut self, classroom: Classroom) {
        self.classroom_index
            .entry(classroom.id)
            .or_insert(self.classrooms.len());
        self.classrooms.push(classroom);
    }

    fn insert_instructor(&mut self, instructor: Instructor) {
        self.instructor_index
            .entry(instructor.id)
            .or_insert(self.instructors.len());
        self.instructors.push(instructor);
    }

    fn push_unavailable(&mut self, unavailable: UnavailableTime) {
        self.blackout_index
            .entry((unavailable.instructor_id, unavailable.day))
            .or_default()
            .push(self.unavailable.len());
        self.unavailable.push(unavailable);
    }

    fn rebuild_blackout_index(&mut self) {
        self.blackout_index.clear();
        for (idx, u) in self.unavailable.iter().enumerate() {
            self.blackout_index
                .entry((u.instructor_id, u.day))
                .or_default()
                .push(idx);
        }
    }

    // ---- Lookups ----

    /// All departments in insertion order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All classrooms in insertion order.
    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    /// All instructors in insertion order.
    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    /// All blackout windows.
    pub fn unavailable_times(&self) -> &[UnavailableTime] {
        &self.unavailable
    }

    pub fn department(&self, id: DepartmentId) -> Result<&Department> {
        self.department_index
            .get(&id)
            .map(|&i| &self.departments[i])
            .ok_or_else(|| TimetableError::not_found(EntityKind::Department, id))
    }

    pub fn course(&self, id: CourseId) -> Result<&Course> {
        self.course_index
            .get(&id)
            .map(|&i| &self.courses[i])
            .ok_or_else(|| TimetableError::not_found(EntityKind::Course, id))
    }

    pub fn classroom(&self, id: ClassroomId) -> Result<&Classroom> {
        self.classroom_index
            .get(&id)
            .map(|&i| &self.classrooms[i])
            .ok_or_else(|| TimetableError::not_found(EntityKind::Classroom, id))
    }

    pub fn instructor(&self, id: InstructorId) -> Result<&Instructor> {
        self.instructor_index
            .get(&id)
            .map(|&i| &self.instructors[i])
            .ok_or_else(|| TimetableError::not_found(EntityKind::Instructor, id))
    }

    /// Finds a department by its code.
    pub fn department_by_code(&self, code: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.code == code)
    }

    /// Courses whose semester is in the given set, in insertion order.
    pub fn courses_in_semesters<'a>(
        &'a self,
        semesters: &'a [u8],
    ) -> impl Iterator<Item = &'a Course> + 'a {
        self.courses
            .iter()
            .filter(move |c| semesters.contains(&c.semester))
    }

    /// Courses taught by the given instructor.
    pub fn courses_for_instructor(&self, instructor_id: InstructorId) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.instructor_id == Some(instructor_id))
            .collect()
    }

    /// Classrooms of the given kind, in insertion order.
    pub fn classrooms_of_kind(&self, kind: ClassroomKind) -> Vec<&Classroom> {
        self.classrooms.iter().filter(|c| c.kind == kind).collect()
    }

    /// Blackout windows of an instructor on a day.
    pub fn unavailable_for(
        &self,
        instructor_id: InstructorId,
        day: Day,
    ) -> impl Iterator<Item = &UnavailableTime> + '_ {
        self.blackout_index
            .get(&(instructor_id, day))
            .into_iter()
            .flatten()
            .map(move |&i| &self.unavailable[i])
    }

    /// Number of blackout windows declared by an instructor across the week.
    pub fn blackout_count(&self, instructor_id: InstructorId) -> usize {
        self.unavailable
            .iter()
            .filter(|u| u.instructor_id == instructor_id)
            .count()
    }

    // ---- Instructor blackout management ----

    /// Declares a blackout window for an instructor.
    ///
    /// Declaring an identical (day, window) twice is a no-op that returns
    /// the existing id.
    pub fn add_unavailable_time(
        &mut self,
        instructor_id: InstructorId,
        day: Day,
        window: TimeWindow,
        reason: Option<String>,
    ) -> Result<UnavailableTimeId> {
        self.instructor(instructor_id)?;

        if let Some(existing) = self
            .unavailable_for(instructor_id, day)
            .find(|u| u.window == window)
        {
            debug!(
                instructor = %instructor_id,
                day = %day,
                window = %window,
                "blackout already declared"
            );
            return Ok(existing.id);
        }

        let id = match self.unavailable.iter().map(|u| u.id.value()).max() {
            None => UnavailableTimeId(1),
            Some(max) => max.checked_add(1).map(UnavailableTimeId).ok_or_else(|| {
                TimetableError::invalid_input("unavailable time ids exhausted")
            })?,
        };
        let mut unavailable = UnavailableTime::new(id, instructor_id, day, window);
        unavailable.reason = reason;
        self.push_unavailable(unavailable);
        debug!(instructor = %instructor_id, day = %day, window = %window, id = %id, "blackout declared");
        Ok(id)
    }

    /// Removes the blackout window matching (instructor, day, window) exactly.
    pub fn remove_unavailable_time(
        &mut self,
        instructor_id: InstructorId,
        day: Day,
        window: TimeWindow,
    ) -> Result<UnavailableTime> {
        let position = self
            .unavailable
            .iter()
            .position(|u| u.instructor_id == instructor_id && u.day == day && u.window == window)
            .ok_or_else(|| {
                TimetableError::not_found(
                    EntityKind::UnavailableTime,
                    format!("{day} {window} for instructor {instructor_id}"),
                )
            })?;
        Ok(self.remove_unavailable_at(position))
    }

    /// Removes a blackout window by id.
    pub fn remove_unavailable_time_by_id(&mut self, id: UnavailableTimeId) -> Result<UnavailableTime> {
        let position = self
            .unavailable
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| TimetableError::not_found(EntityKind::UnavailableTime, id))?;
        Ok(self.remove_unavailable_at(position))
    }

    fn remove_unavailable_at(&mut self, position: usize) -> UnavailableTime {
        let removed = self.unavailable.remove(position);
        self.rebuild_blackout_index();
        debug!(id = %removed.id, instructor = %removed.instructor_id, "blackout removed");
        removed
    }

    // ---- Reporting ----

    /// Entity counts, per-department course counts, and shared course count.
    pub fn summary(&self) -> CatalogSummary {
        let mut courses_by_department = BTreeMap::new();
        for dept in &self.departments {
            let count = self.courses.iter().filter(|c| c.belongs_to(dept.id)).count();
            courses_by_department.insert(dept.code.clone(), count);
        }

        CatalogSummary {
            departments: self.departments.len(),
            courses: self.courses.len(),
            shared_courses: self.courses.iter().filter(|c| c.is_shared()).count(),
            classrooms: self.classrooms.len(),
            labs: self.classrooms.iter().filter(|c| c.is_lab()).count(),
            instructors: self.instructors.len(),
            unavailable_times: self.unavailable.len(),
            courses_by_department,
        }
    }
}

/// Overview of catalog contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub departments: usize,
    pub courses: usize,
    /// Courses serving more than one department.
    pub shared_courses: usize,
    pub classrooms: usize,
    /// Classrooms of kind LAB.
    pub labs: usize,
    pub instructors: usize,
    pub unavailable_times: usize,
    /// Department code → number of courses serving it.
    pub courses_by_department: BTreeMap<String, usize>,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Departments: {}", self.departments)?;
        writeln!(
            f,
            "Courses: {} ({} shared)",
            self.courses, self.shared_courses
        )?;
        for (code, count) in &self.courses_by_department {
            writeln!(f, "  {code}: {count}")?;
        }
        writeln!(f, "Classrooms: {} ({} labs)", self.classrooms, self.labs)?;
        writeln!(f, "Instructors: {}", self.instructors)?;
        write!(f, "Unavailable times: {}", self.unavailable_times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::parse(start, end).unwrap()
    }

    #[test]
    fn test_lookups() {
        let catalog = testing::two_department_catalog();

        assert_eq!(catalog.department_by_code("BLM").unwrap().id, DepartmentId(1));
        assert!(catalog.department_by_code("XYZ").is_none());
        assert_eq!(catalog.course(CourseId(1)).unwrap().code, "MAT101");
        assert!(catalog.course(CourseId(999)).unwrap_err().is_not_found());
        assert!(catalog.classroom(ClassroomId(999)).is_err());
        assert_eq!(catalog.classrooms_of_kind(ClassroomKind::Lab).len(), 1);
    }

    #[test]
    fn test_courses_in_semesters_keeps_order() {
        let catalog = testing::two_department_catalog();
        let fall: Vec<&str> = catalog
            .courses_in_semesters(&[1, 3, 5, 7])
            .map(|c| c.code.as_str())
            .collect();
        assert!(!fall.is_empty());
        assert!(catalog
            .courses_in_semesters(&[1, 3, 5, 7])
            .all(|c| c.semester % 2 == 1));
        // Insertion order preserved
        let positions: Vec<usize> = fall
            .iter()
            .map(|code| catalog.courses().iter().position(|c| c.code == *code).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_add_unavailable_time_is_idempotent() {
        let mut catalog = testing::two_department_catalog();
        let morning = window("09:00", "12:00");

        let first = catalog
            .add_unavailable_time(InstructorId(10), Day::Monday, morning, None)
            .unwrap();
        let second = catalog
            .add_unavailable_time(InstructorId(10), Day::Monday, morning, Some("again".into()))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.unavailable_for(InstructorId(10), Day::Monday).count(), 1);
        assert_eq!(catalog.blackout_count(InstructorId(10)), 1);
    }

    #[test]
    fn test_add_unavailable_time_unknown_instructor() {
        let mut catalog = testing::two_department_catalog();
        let err = catalog
            .add_unavailable_time(InstructorId(404), Day::Monday, window("09:00", "10:00"), None)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_add_unavailable_time_id_exhausted() {
        let mut catalog = testing::two_department_catalog().with_unavailable_time(
            UnavailableTime::new(
                UnavailableTimeId(u32::MAX),
                InstructorId(10),
                Day::Friday,
                window("09:00", "10:00"),
            ),
        );
        let err = catalog
            .add_unavailable_time(InstructorId(10), Day::Monday, window("09:00", "10:00"), None)
            .unwrap_err();
        assert!(matches!(err, TimetableError::InvalidInput { .. }));
        assert_eq!(catalog.unavailable_times().len(), 1);
    }

    #[test]
    fn test_remove_unavailable_time() {
        let mut catalog = testing::two_department_catalog();
        let morning = window("09:00", "12:00");
        let afternoon = window("13:00", "16:00");
        catalog
            .add_unavailable_time(InstructorId(10), Day::Tuesday, morning, None)
            .unwrap();
        let id = catalog
            .add_unavailable_time(InstructorId(10), Day::Tuesday, afternoon, None)
            .unwrap();

        // Non-matching window
        assert!(catalog
            .remove_unavailable_time(InstructorId(10), Day::Tuesday, window("09:00", "11:00"))
            .unwrap_err()
            .is_not_found());

        let removed = catalog
            .remove_unavailable_time(InstructorId(10), Day::Tuesday, morning)
            .unwrap();
        assert_eq!(removed.window, morning);

        // Index rebuilt: the remaining window is still found
        let remaining: Vec<_> = catalog.unavailable_for(InstructorId(10), Day::Tuesday).collect();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, id);

        catalog.remove_unavailable_time_by_id(id).unwrap();
        assert!(catalog.remove_unavailable_time_by_id(id).is_err());
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let catalog = testing::two_department_catalog();
        let json = serde_json::to_string(&catalog.snapshot()).unwrap();
        let loaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(loaded.courses().len(), catalog.courses().len());
        assert_eq!(loaded.course(CourseId(1)).unwrap(), catalog.course(CourseId(1)).unwrap());
    }

    #[test]
    fn test_from_json_partial_snapshot() {
        let json = r#"{
            "departments": [{"id": 1, "code": "BLM", "name": "Computer Engineering"}],
            "classrooms": [{"id": 1, "code": "D1", "capacity": 40, "kind": "NORMAL"}]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.departments().len(), 1);
        assert!(catalog.courses().is_empty());
        assert_eq!(catalog.classroom(ClassroomId(1)).unwrap().code, "D1");
    }

    #[test]
    fn test_from_json_rejects_inverted_blackout() {
        let json = r#"{
            "instructors": [{"id": 10, "name": "Dr. Aydin"}],
            "unavailable_times": [
                {"id": 1, "instructor_id": 10, "day": "Monday", "window": {"start": "12:00", "end": "09:00"}}
            ]
        }"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, TimetableError::Json(_)));
        assert!(err.to_string().contains("must be before end"));

        let fixed = json.replace(r#""start": "12:00", "end": "09:00""#, r#""start": "09:00", "end": "12:00""#);
        let catalog = Catalog::from_json_str(&fixed).unwrap();
        assert_eq!(catalog.unavailable_for(InstructorId(10), Day::Monday).count(), 1);
    }

    #[test]
    fn test_summary() {
        let catalog = testing::two_department_catalog();
        let summary = catalog.summary();
        assert_eq!(summary.departments, 2);
        assert_eq!(summary.labs, 1);
        assert!(summary.shared_courses >= 1);
        assert!(summary.courses_by_department.contains_key("BLM"));
        assert!(summary.to_string().contains("Classrooms:"));
    }
}
