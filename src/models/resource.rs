//! Classroom and instructor models.
//!
//! Classrooms and instructors are the two resources a placement consumes.
//! A classroom holds one class at a time; an instructor teaches one class
//! at a time and may declare recurring weekly blackout windows.

use serde::{Deserialize, Serialize};

use super::{ClassroomId, Day, InstructorId, TimeWindow, UnavailableTimeId};

/// Classroom classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClassroomKind {
    /// Lecture room.
    Normal,
    /// Laboratory.
    Lab,
}

/// A bookable classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: ClassroomId,
    /// Unique classroom code.
    pub code: String,
    /// Seat count. Must be positive.
    pub capacity: u32,
    /// Lecture room or lab.
    pub kind: ClassroomKind,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(id: ClassroomId, code: impl Into<String>, capacity: u32, kind: ClassroomKind) -> Self {
        Self {
            id,
            code: code.into(),
            capacity,
            kind,
        }
    }

    /// Creates a lecture room.
    pub fn normal(id: ClassroomId, code: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, code, capacity, ClassroomKind::Normal)
    }

    /// Creates a lab.
    pub fn lab(id: ClassroomId, code: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, code, capacity, ClassroomKind::Lab)
    }

    /// Whether this classroom is a lab.
    pub fn is_lab(&self) -> bool {
        self.kind == ClassroomKind::Lab
    }
}

/// An instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique instructor identifier.
    pub id: InstructorId,
    /// Display name.
    pub name: String,
}

impl Instructor {
    /// Creates an instructor.
    pub fn new(id: InstructorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A recurring weekly window in which an instructor cannot teach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableTime {
    /// Unique identifier.
    pub id: UnavailableTimeId,
    /// Owning instructor.
    pub instructor_id: InstructorId,
    /// Day of the blackout.
    pub day: Day,
    /// Blocked interval.
    pub window: TimeWindow,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

impl UnavailableTime {
    /// Creates a blackout window.
    pub fn new(id: UnavailableTimeId, instructor_id: InstructorId, day: Day, window: TimeWindow) -> Self {
        Self {
            id,
            instructor_id,
            day,
            window,
            reason: None,
        }
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether this blackout blocks the given day and window.
    pub fn blocks(&self, day: Day, window: &TimeWindow) -> bool {
        self.day == day && self.window.overlaps(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_constructors() {
        let lab = Classroom::lab(ClassroomId(1), "LAB-1", 30);
        assert!(lab.is_lab());
        assert_eq!(lab.kind, ClassroomKind::Lab);

        let room = Classroom::normal(ClassroomId(2), "D-101", 60);
        assert!(!room.is_lab());
        assert_eq!(room.capacity, 60);
    }

    #[test]
    fn test_classroom_kind_serde() {
        assert_eq!(serde_json::to_string(&ClassroomKind::Lab).unwrap(), r#""LAB""#);
        let k: ClassroomKind = serde_json::from_str(r#""NORMAL""#).unwrap();
        assert_eq!(k, ClassroomKind::Normal);
    }

    #[test]
    fn test_unavailable_blocks() {
        let u = UnavailableTime::new(
            UnavailableTimeId(1),
            InstructorId(5),
            Day::Monday,
            TimeWindow::parse("09:00", "12:00").unwrap(),
        )
        .with_reason("Faculty board");
        let morning = TimeWindow::parse("09:00", "11:50").unwrap();
        let afternoon = TimeWindow::parse("13:00", "15:50").unwrap();

        assert!(u.blocks(Day::Monday, &morning));
        assert!(!u.blocks(Day::Monday, &afternoon));
        assert!(!u.blocks(Day::Tuesday, &morning));
        assert_eq!(u.reason.as_deref(), Some("Faculty board"));
    }
}
