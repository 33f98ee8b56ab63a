//! Graph queries against a built [`CatalogIndex`].
//!
//! The resolver answers four questions about a course: what it directly
//! requires, what the full upstream chain looks like, what it transitively
//! unlocks, and whether it can be taken now. All traversals are iterative
//! (explicit work stack, no recursion) and cycle-safe: a misconfigured
//! catalog where A requires B requires A terminates with a finite answer
//! instead of looping.
//!
//! The two directions treat OR groups differently. [`upstream_closure`]
//! resolves each group by committing to its **first** listed alternative,
//! producing one representative chain for display rather than the
//! combinatorial set of all satisfying chains. [`is_eligible`] evaluates
//! the AND/OR structure exactly, with no shortcut.

use crate::graph::index::CatalogIndex;
use pathway_catalog::{Course, CourseCode};
use std::collections::HashSet;

/// Union of a course's AND list and every code across every OR group.
///
/// Set semantics: a code appearing in both kinds counts once, and callers
/// must not rely on iteration order.
#[must_use]
pub fn direct_prereq_codes(course: &Course) -> HashSet<CourseCode> {
    let mut out: HashSet<CourseCode> = course.prereqs.iter().cloned().collect();
    for group in &course.prereq_any_of {
        for code in group {
            out.insert(code.clone());
        }
    }
    out
}

/// Every code that must eventually be addressed to take the target course.
///
/// AND entries are always included; each OR group contributes only its
/// first alternative (the representative-path policy). A dangling
/// reference is included in the result (the student still has to address
/// it somehow) but is not expanded further. The start code itself never
/// appears in its own closure, and a query for an unknown code returns the
/// empty set.
#[must_use]
pub fn upstream_closure(code: &CourseCode, index: &CatalogIndex) -> HashSet<CourseCode> {
    let mut needed = HashSet::new();
    let mut seen: HashSet<CourseCode> = HashSet::from([code.clone()]);
    let mut stack = vec![code.clone()];

    while let Some(current) = stack.pop() {
        let Some(course) = index.course(&current) else {
            // Dangling or unknown: already recorded, nothing to expand.
            continue;
        };

        let and_entries = course.prereqs.iter();
        let first_alternatives = course.prereq_any_of.iter().filter_map(|g| g.first());

        for prereq in and_entries.chain(first_alternatives) {
            if seen.insert(prereq.clone()) {
                needed.insert(prereq.clone());
                stack.push(prereq.clone());
            }
        }
    }

    needed
}

/// Every course that requires the given code, directly or transitively.
///
/// Transitive closure over the reverse-dependency map. The reverse edge is
/// untyped: it exists whether the forward direction listed the code under
/// the AND list or inside an OR group.
#[must_use]
pub fn downstream_closure(code: &CourseCode, index: &CatalogIndex) -> HashSet<CourseCode> {
    let mut visited = HashSet::new();
    let mut stack = vec![code.clone()];

    while let Some(current) = stack.pop() {
        let Some(dependents) = index.dependents_of(&current) else {
            continue;
        };
        for dependent in dependents {
            if visited.insert(dependent.clone()) {
                stack.push(dependent.clone());
            }
        }
    }

    visited
}

/// Exact eligibility test: every AND entry present and every OR group
/// intersecting the completed/planned set.
///
/// A course with no prerequisites is trivially eligible. An empty OR group
/// can never be satisfied, so a course carrying one is never eligible;
/// `doctor` flags that catalog defect.
#[must_use]
pub fn is_eligible(course: &Course, completed: &HashSet<CourseCode>) -> bool {
    course.prereqs.iter().all(|p| completed.contains(p))
        && course
            .prereq_any_of
            .iter()
            .all(|group| group.iter().any(|p| completed.contains(p)))
}

/// All catalog courses whose prerequisite structure is satisfied by the
/// given set.
///
/// A pure filter: already-completed courses are reported too if their own
/// prerequisites are met; callers that want "newly available" subtract the
/// completed set themselves.
#[must_use]
pub fn eligible_courses(index: &CatalogIndex, completed: &HashSet<CourseCode>) -> HashSet<CourseCode> {
    index
        .courses()
        .filter(|course| is_eligible(course, completed))
        .map(|course| course.code.clone())
        .collect()
}

/// Per-requirement breakdown behind an eligibility verdict.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EligibilityDetail {
    /// AND-list entries absent from the completed set.
    pub missing_required: Vec<CourseCode>,
    /// OR groups with no member in the completed set.
    pub unsatisfied_groups: Vec<Vec<CourseCode>>,
}

impl EligibilityDetail {
    /// Returns `true` when nothing is missing.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.missing_required.is_empty() && self.unsatisfied_groups.is_empty()
    }
}

/// Explain exactly which requirements block a course, if any.
#[must_use]
pub fn eligibility_detail(course: &Course, completed: &HashSet<CourseCode>) -> EligibilityDetail {
    EligibilityDetail {
        missing_required: course
            .prereqs
            .iter()
            .filter(|p| !completed.contains(*p))
            .cloned()
            .collect(),
        unsatisfied_groups: course
            .prereq_any_of
            .iter()
            .filter(|group| !group.iter().any(|p| completed.contains(p)))
            .cloned()
            .collect(),
    }
}

/// An OR group that was resolved by picking its first alternative.
///
/// Reported so callers can present the other choices ("you could take
/// MCT4C instead of MCR3U").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeGroup {
    /// The course whose requirement this group belongs to.
    pub course: CourseCode,
    /// The full list of alternatives, in catalog order.
    pub choices: Vec<CourseCode>,
}

/// Result of a completed-aware requirement walk toward a target course.
#[derive(Debug, Clone, Default)]
pub struct RequirementPlan {
    /// Codes still needed, excluding everything already completed.
    pub needed: HashSet<CourseCode>,
    /// Every unsatisfied OR group encountered, with its full choice list.
    pub alternatives: Vec<AlternativeGroup>,
}

/// The completed-aware variant of [`upstream_closure`].
///
/// Differences: codes already in `completed` are neither reported nor
/// expanded, an OR group with any completed member is skipped entirely,
/// and each unsatisfied group is recorded as an [`AlternativeGroup`]
/// alongside the first-alternative pick. A target that is itself completed
/// needs nothing.
#[must_use]
pub fn requirement_plan(
    code: &CourseCode,
    index: &CatalogIndex,
    completed: &HashSet<CourseCode>,
) -> RequirementPlan {
    let mut plan = RequirementPlan::default();
    if completed.contains(code) {
        return plan;
    }

    let mut seen: HashSet<CourseCode> = HashSet::from([code.clone()]);
    let mut stack = vec![code.clone()];

    while let Some(current) = stack.pop() {
        let Some(course) = index.course(&current) else {
            continue;
        };

        for prereq in &course.prereqs {
            if completed.contains(prereq) {
                continue;
            }
            if seen.insert(prereq.clone()) {
                plan.needed.insert(prereq.clone());
                stack.push(prereq.clone());
            }
        }

        for group in &course.prereq_any_of {
            if group.iter().any(|p| completed.contains(p)) {
                continue;
            }
            if let Some(pick) = group.first() {
                if seen.insert(pick.clone()) {
                    plan.needed.insert(pick.clone());
                    stack.push(pick.clone());
                }
            }
            plan.alternatives.push(AlternativeGroup {
                course: current.clone(),
                choices: group.clone(),
            });
        }
    }

    plan
}
