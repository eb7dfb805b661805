//! Stable integer identifiers.
//!
//! Every entity in the catalog is keyed by a small integer supplied by the
//! enclosing system. Newtypes keep a course id from being passed where a
//! classroom id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Raw integer value.
            #[inline]
            pub fn value(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifies a department.
    DepartmentId,
    u32
);
define_id!(
    /// Identifies a course.
    CourseId,
    u32
);
define_id!(
    /// Identifies a classroom.
    ClassroomId,
    u32
);
define_id!(
    /// Identifies an instructor.
    InstructorId,
    u32
);
define_id!(
    /// Identifies an instructor blackout window.
    UnavailableTimeId,
    u32
);
define_id!(
    /// Identifies a schedule entry. Assigned by the store.
    EntryId,
    u64
);
