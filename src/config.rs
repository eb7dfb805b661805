//! Placement engine configuration.
//!
//! Defaults reproduce the fixed weekly grid: Monday to Friday, two
//! three-hour blocks per day, 100 random attempts per course, department
//! passes, and a full clear before each run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TimetableError};
use crate::models::{standard_slots, Day, TimeWindow};

/// Which stored entries a generation run discards before placing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearScope {
    /// Every entry, including semesters outside the requested term.
    #[default]
    All,
    /// Only entries whose course belongs to one of the term's semesters.
    TargetedSemesters,
}

/// Course ordering used by the placement engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Shared courses first, then one pass per department.
    #[default]
    DepartmentPasses,
    /// A single pass, hardest courses first: most departments, busiest
    /// instructor, most instructor blackouts, then course code.
    MostConstrainedFirst,
}

/// Tunables for [`PlacementEngine`](crate::scheduler::PlacementEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Random (day, slot) draws per course before giving up.
    pub max_attempts: u32,
    /// Teaching days to draw from.
    pub days: Vec<Day>,
    /// Time slots to draw from. Must not overlap each other.
    pub slots: Vec<TimeWindow>,
    /// What to clear before placing.
    pub clear_scope: ClearScope,
    /// Course ordering.
    pub policy: PlacementPolicy,
    /// Department codes whose passes run first, in this order. The
    /// remaining departments follow in catalog order.
    pub department_priority: Vec<String>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            days: Day::ALL.to_vec(),
            slots: standard_slots(),
            clear_scope: ClearScope::All,
            policy: PlacementPolicy::DepartmentPasses,
            department_priority: Vec::new(),
        }
    }
}

impl PlacementConfig {
    /// Parses a JSON config; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config from disk.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    pub fn with_slots(mut self, slots: Vec<TimeWindow>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_clear_scope(mut self, clear_scope: ClearScope) -> Self {
        self.clear_scope = clear_scope;
        self
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_department_priority<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.department_priority = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Bookable slots per classroom per week.
    pub fn weekly_capacity(&self) -> usize {
        self.days.len() * self.slots.len()
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(TimetableError::configuration("max_attempts must be positive"));
        }
        if self.days.is_empty() {
            return Err(TimetableError::configuration("no teaching days configured"));
        }
        if self.slots.is_empty() {
            return Err(TimetableError::configuration("no time slots configured"));
        }
        for (i, a) in self.slots.iter().enumerate() {
            if let Some(b) = self.slots[i + 1..].iter().find(|b| a.overlaps(b)) {
                return Err(TimetableError::configuration(format!(
                    "time slots {a} and {b} overlap"
                )));
            }
        }
        Ok(())
    }
}
