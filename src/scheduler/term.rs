//! Academic term selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// Which semesters a generation run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    /// Odd semesters: 1, 3, 5, 7.
    Fall,
    /// Even semesters: 2, 4, 6, 8.
    Spring,
    /// Semesters 1 through 8.
    All,
}

impl Term {
    /// Semester numbers covered by this term.
    pub fn semesters(self) -> &'static [u8] {
        match self {
            Term::Fall => &[1, 3, 5, 7],
            Term::Spring => &[2, 4, 6, 8],
            Term::All => &[1, 2, 3, 4, 5, 6, 7, 8],
        }
    }

    pub fn includes(self, semester: u8) -> bool {
        self.semesters().contains(&semester)
    }

    pub fn name(self) -> &'static str {
        match self {
            Term::Fall => "fall",
            Term::Spring => "spring",
            Term::All => "all",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Term {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fall" => Ok(Term::Fall),
            "spring" => Ok(Term::Spring),
            "all" => Ok(Term::All),
            _ => Err(TimetableError::invalid_input(format!(
                "unknown term '{s}', expected fall, spring or all"
            ))),
        }
    }
}
