//! Schedule entry model.
//!
//! A schedule entry is one concrete weekly placement of a course: a
//! classroom, a day, and a time window. Entries are the product of the
//! placement engine and of manual edits; the schedule store owns them.

use serde::{Deserialize, Serialize};

use super::{ClassroomId, CourseId, Day, EntryId, TimeWindow};

/// A placement that has not been stored yet.
///
/// Used as the candidate for conflict checks, for manual adds, and for
/// bulk inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewEntry {
    /// Placed course.
    pub course_id: CourseId,
    /// Booked classroom.
    pub classroom_id: ClassroomId,
    /// Teaching day.
    pub day: Day,
    /// Booked interval.
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl NewEntry {
    /// Creates a candidate placement.
    pub fn new(course_id: CourseId, classroom_id: ClassroomId, day: Day, window: TimeWindow) -> Self {
        Self {
            course_id,
            classroom_id,
            day,
            window,
        }
    }

    /// Whether this placement shares a day and overlaps in time with another.
    pub fn overlaps(&self, day: Day, window: &TimeWindow) -> bool {
        self.day == day && self.window.overlaps(window)
    }
}

/// A stored placement.
///
/// Serializes as `{id, course_id, classroom_id, day, start, end}` with
/// `"HH:MM"` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Store-assigned identifier.
    pub id: EntryId,
    /// Placed course.
    pub course_id: CourseId,
    /// Booked classroom.
    pub classroom_id: ClassroomId,
    /// Teaching day.
    pub day: Day,
    /// Booked interval.
    #[serde(flatten)]
    pub window: TimeWindow,
}

impl ScheduleEntry {
    /// Stores a candidate under the given id.
    pub fn from_new(id: EntryId, entry: NewEntry) -> Self {
        Self {
            id,
            course_id: entry.course_id,
            classroom_id: entry.classroom_id,
            day: entry.day,
            window: entry.window,
        }
    }

    /// The placement without its id.
    pub fn placement(&self) -> NewEntry {
        NewEntry::new(self.course_id, self.classroom_id, self.day, self.window)
    }

    /// Whether this entry shares a day and overlaps in time with the given window.
    pub fn overlaps(&self, day: Day, window: &TimeWindow) -> bool {
        self.day == day && self.window.overlaps(window)
    }

    /// Whether this entry occupies exactly the given day and window.
    pub fn occupies_slot(&self, day: Day, window: &TimeWindow) -> bool {
        self.day == day && self.window == *window
    }
}
