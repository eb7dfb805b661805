//! Fixture catalogs shared by unit tests.

use crate::catalog::Catalog;
use crate::models::{
    Classroom, ClassroomId, Course, CourseId, Department, DepartmentId, Instructor, InstructorId,
};

/// Two departments, three instructors, two lecture rooms and one lab.
///
/// | Id | Code | Sem | Departments | Instructor | Theory/Practice |
/// |----|------|-----|-------------|------------|-----------------|
/// | 1 | MAT101 | 1 | BLM | 10 | 3/0 |
/// | 2 | BLM201 | 2 | BLM | 10 | 3/0 |
/// | 3 | BLM301 | 3 | BLM | 12 | 2/1 |
/// | 4 | ORT301 | 3 | BLM, YZM | 10 | 2/2 |
/// | 5 | YZM101 | 1 | YZM | 11 | 3/0 |
/// | 6 | YZM202 | 4 | YZM | none | 2/0 |
///
/// Classrooms: 1 `D101` and 2 `D102` (NORMAL), 3 `LAB1` (LAB).
pub(crate) fn two_department_catalog() -> Catalog {
    Catalog::new()
        .with_department(Department::new(DepartmentId(1), "BLM", "Computer Engineering"))
        .with_department(Department::new(DepartmentId(2), "YZM", "Software Engineering"))
        .with_instructor(Instructor::new(InstructorId(10), "Dr. Aydin"))
        .with_instructor(Instructor::new(InstructorId(11), "Dr. Kaya"))
        .with_instructor(Instructor::new(InstructorId(12), "Dr. Demir"))
        .with_classroom(Classroom::normal(ClassroomId(1), "D101", 60))
        .with_classroom(Classroom::normal(ClassroomId(2), "D102", 60))
        .with_classroom(Classroom::lab(ClassroomId(3), "LAB1", 30))
        .with_course(
            Course::new(CourseId(1), "MAT101", 1)
                .with_name("Calculus I")
                .with_hours(3, 0)
                .with_credits(4)
                .with_instructor(InstructorId(10))
                .with_department(DepartmentId(1)),
        )
        .with_course(
            Course::new(CourseId(2), "BLM201", 2)
                .with_name("Discrete Mathematics")
                .with_hours(3, 0)
                .with_credits(3)
                .with_instructor(InstructorId(10))
                .with_department(DepartmentId(1)),
        )
        .with_course(
            Course::new(CourseId(3), "BLM301", 3)
                .with_name("Operating Systems")
                .with_hours(2, 1)
                .with_credits(3)
                .with_instructor(InstructorId(12))
                .with_department(DepartmentId(1)),
        )
        .with_course(
            Course::new(CourseId(4), "ORT301", 3)
                .with_name("Databases")
                .with_hours(2, 2)
                .with_credits(4)
                .with_instructor(InstructorId(10))
                .with_department(DepartmentId(1))
                .with_department(DepartmentId(2)),
        )
        .with_course(
            Course::new(CourseId(5), "YZM101", 1)
                .with_name("Introduction to Software Engineering")
                .with_hours(3, 0)
                .with_credits(3)
                .with_instructor(InstructorId(11))
                .with_department(DepartmentId(2)),
        )
        .with_course(
            Course::new(CourseId(6), "YZM202", 4)
                .with_name("Technical Writing")
                .with_hours(2, 0)
                .with_credits(2)
                .elective()
                .with_department(DepartmentId(2)),
        )
}

/// One practice course shared by BLM and YZM in semester 3, one lecture
/// room (id 1) and one lab (id 2).
pub(crate) fn shared_lab_catalog() -> Catalog {
    Catalog::new()
        .with_department(Department::new(DepartmentId(1), "BLM", "Computer Engineering"))
        .with_department(Department::new(DepartmentId(2), "YZM", "Software Engineering"))
        .with_instructor(Instructor::new(InstructorId(1), "Dr. Aydin"))
        .with_classroom(Classroom::normal(ClassroomId(1), "D101", 60))
        .with_classroom(Classroom::lab(ClassroomId(2), "LAB1", 30))
        .with_course(
            Course::new(CourseId(1), "ORT301", 3)
                .with_hours(2, 2)
                .with_instructor(InstructorId(1))
                .with_department(DepartmentId(1))
                .with_department(DepartmentId(2)),
        )
}

/// Twelve first-semester BLM courses competing for the ten weekly slots
/// of their cohort, plus a handful of YZM courses.
pub(crate) fn dense_catalog() -> Catalog {
    let mut catalog = Catalog::new()
        .with_department(Department::new(DepartmentId(1), "BLM", "Computer Engineering"))
        .with_department(Department::new(DepartmentId(2), "YZM", "Software Engineering"))
        .with_instructor(Instructor::new(InstructorId(1), "Dr. Aydin"))
        .with_instructor(Instructor::new(InstructorId(2), "Dr. Kaya"))
        .with_classroom(Classroom::normal(ClassroomId(1), "D101", 60))
        .with_classroom(Classroom::normal(ClassroomId(2), "D102", 60))
        .with_classroom(Classroom::normal(ClassroomId(3), "D103", 60))
        .with_classroom(Classroom::lab(ClassroomId(4), "LAB1", 30));

    for i in 0..12u32 {
        let mut course = Course::new(CourseId(100 + i), format!("BLM1{i:02}"), 1)
            .with_hours(3, i % 3)
            .with_department(DepartmentId(1));
        if i % 4 == 0 {
            course = course.with_instructor(InstructorId(1));
        }
        catalog = catalog.with_course(course);
    }
    for i in 0..4u32 {
        catalog = catalog.with_course(
            Course::new(CourseId(200 + i), format!("YZM3{i:02}"), 3)
                .with_hours(2, 1)
                .with_instructor(InstructorId(2))
                .with_department(DepartmentId(2)),
        );
    }
    catalog
}
