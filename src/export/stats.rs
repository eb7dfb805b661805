//! Schedule load metrics.
//!
//! Descriptive counts over a finished schedule. They are reported, never
//! optimized: the placement engine does not look at them.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Entries per day | Count of entries on each teaching day |
//! | Entries per department | Count of entries whose course serves the department |
//! | Classroom utilization | Entries in the room / (days x slots) |
//! | Avg Utilization | Mean classroom utilization |

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::catalog::Catalog;
use crate::config::PlacementConfig;
use crate::models::{CourseId, Day};
use crate::store::ScheduleStore;

/// Schedule load indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleStats {
    /// Stored entries.
    pub total_entries: usize,
    /// Distinct courses with at least one entry.
    pub scheduled_courses: usize,
    /// Entries per teaching day (days without entries included as 0).
    pub entries_by_day: BTreeMap<Day, usize>,
    /// Entries per department code. Shared courses count for each department.
    pub entries_by_department: BTreeMap<String, usize>,
    /// Per-classroom utilization by classroom code (0.0..=1.0).
    pub utilization_by_classroom: BTreeMap<String, f64>,
    /// Average classroom utilization (0.0..=1.0).
    pub avg_utilization: f64,
}

impl ScheduleStats {
    /// Computes stats for a store.
    ///
    /// # Arguments
    /// * `catalog` - Resolves courses to departments and classrooms to codes.
    /// * `store` - The schedule to measure.
    /// * `config` - Supplies the weekly grid used as utilization capacity.
    pub fn calculate(catalog: &Catalog, store: &ScheduleStore, config: &PlacementConfig) -> Self {
        let mut entries_by_day: BTreeMap<Day, usize> =
            config.days.iter().map(|&d| (d, 0)).collect();
        let mut entries_by_department: BTreeMap<String, usize> = catalog
            .departments()
            .iter()
            .map(|d| (d.code.clone(), 0))
            .collect();
        let mut booked: BTreeMap<String, usize> = catalog
            .classrooms()
            .iter()
            .map(|c| (c.code.clone(), 0))
            .collect();
        let mut courses: HashSet<CourseId> = HashSet::new();

        for entry in store.entries() {
            *entries_by_day.entry(entry.day).or_default() += 1;
            courses.insert(entry.course_id);

            if let Ok(course) = catalog.course(entry.course_id) {
                for &dept_id in &course.department_ids {
                    if let Ok(dept) = catalog.department(dept_id) {
                        *entries_by_department.entry(dept.code.clone()).or_default() += 1;
                    }
                }
            }
            if let Ok(classroom) = catalog.classroom(entry.classroom_id) {
                *booked.entry(classroom.code.clone()).or_default() += 1;
            }
        }

        let capacity = config.weekly_capacity();
        let utilization_by_classroom: BTreeMap<String, f64> = booked
            .into_iter()
            .map(|(code, n)| {
                let util = if capacity > 0 {
                    (n as f64 / capacity as f64).min(1.0)
                } else {
                    0.0
                };
                (code, util)
            })
            .collect();

        let avg_utilization = if utilization_by_classroom.is_empty() {
            0.0
        } else {
            utilization_by_classroom.values().sum::<f64>() / utilization_by_classroom.len() as f64
        };

        Self {
            total_entries: store.len(),
            scheduled_courses: courses.len(),
            entries_by_day,
            entries_by_department,
            utilization_by_classroom,
            avg_utilization,
        }
    }
}
