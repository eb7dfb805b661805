//! Course ordering into placement passes.
//!
//! Earlier passes lock in placements that later passes must respect, so
//! the ordering decides who wins contested slots.
//!
//! # Department passes
//!
//! 1. Shared courses (serving more than one department), catalog order.
//! 2. One pass per department: its remaining courses, catalog order.
//!
//! Departments named in `department_priority` go first in that order; the
//! rest follow in catalog order. Every target course lands in exactly one
//! pass.
//!
//! # Most constrained first
//!
//! A single pass sorted by a chain of keys, each consulted only on ties
//! of the previous one:
//! 1. number of departments (descending)
//! 2. instructor load within the run (descending)
//! 3. instructor blackout count (descending)
//! 4. course code (ascending)

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::catalog::Catalog;
use crate::config::PlacementPolicy;
use crate::error::{Result, TimetableError};
use crate::models::{Course, CourseId, Department, InstructorId};

/// Which phase of a run a course was attempted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassKind {
    /// Courses shared by several departments.
    Shared,
    /// Remaining courses of one department.
    Department { code: String },
    /// The single pass of the most-constrained-first policy.
    MostConstrained,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassKind::Shared => f.write_str("shared courses"),
            PassKind::Department { code } => write!(f, "department {code}"),
            PassKind::MostConstrained => f.write_str("most constrained first"),
        }
    }
}

/// An ordered group of courses.
#[derive(Debug, Clone)]
pub struct Pass<'c> {
    pub kind: PassKind,
    pub courses: Vec<&'c Course>,
}

/// Splits the target courses into passes according to the policy.
///
/// # Errors
/// `Configuration` if a priority code names no catalog department.
pub fn plan_passes<'c>(
    catalog: &'c Catalog,
    targets: &[&'c Course],
    policy: PlacementPolicy,
    department_priority: &[String],
) -> Result<Vec<Pass<'c>>> {
    match policy {
        PlacementPolicy::DepartmentPasses => {
            department_passes(catalog, targets, department_priority)
        }
        PlacementPolicy::MostConstrainedFirst => Ok(vec![most_constrained_pass(catalog, targets)]),
    }
}

/// Departments in pass order.
pub fn department_order<'c>(
    catalog: &'c Catalog,
    department_priority: &[String],
) -> Result<Vec<&'c Department>> {
    let mut ordered: Vec<&Department> = Vec::with_capacity(catalog.departments().len());
    for code in department_priority {
        let dept = catalog.department_by_code(code).ok_or_else(|| {
            TimetableError::configuration(format!("priority department '{code}' is not in the catalog"))
        })?;
        if !ordered.iter().any(|d| d.id == dept.id) {
            ordered.push(dept);
        }
    }
    for dept in catalog.departments() {
        if !ordered.iter().any(|d| d.id == dept.id) {
            ordered.push(dept);
        }
    }
    Ok(ordered)
}

fn department_passes<'c>(
    catalog: &'c Catalog,
    targets: &[&'c Course],
    department_priority: &[String],
) -> Result<Vec<Pass<'c>>> {
    let departments = department_order(catalog, department_priority)?;
    let mut assigned: HashSet<CourseId> = HashSet::new();
    let mut passes = Vec::with_capacity(departments.len() + 1);

    let shared: Vec<&Course> = targets.iter().copied().filter(|c| c.is_shared()).collect();
    assigned.extend(shared.iter().map(|c| c.id));
    passes.push(Pass {
        kind: PassKind::Shared,
        courses: shared,
    });

    for dept in departments {
        let courses: Vec<&Course> = targets
            .iter()
            .copied()
            .filter(|c| c.belongs_to(dept.id) && !assigned.contains(&c.id))
            .collect();
        assigned.extend(courses.iter().map(|c| c.id));
        passes.push(Pass {
            kind: PassKind::Department {
                code: dept.code.clone(),
            },
            courses,
        });
    }

    Ok(passes)
}

fn most_constrained_pass<'c>(catalog: &Catalog, targets: &[&'c Course]) -> Pass<'c> {
    let mut load: HashMap<InstructorId, usize> = HashMap::new();
    for course in targets {
        if let Some(instructor_id) = course.instructor_id {
            *load.entry(instructor_id).or_default() += 1;
        }
    }

    let mut courses = targets.to_vec();
    courses.sort_by_cached_key(|c| {
        let instructor_load = c
            .instructor_id
            .and_then(|i| load.get(&i).copied())
            .unwrap_or(0);
        let blackouts = c.instructor_id.map_or(0, |i| catalog.blackout_count(i));
        (
            Reverse(c.department_ids.len()),
            Reverse(instructor_load),
            Reverse(blackouts),
            c.code.clone(),
        )
    });

    Pass {
        kind: PassKind::MostConstrained,
        courses,
    }
}
