//! Catalog diagnostics: layered validation over a built index.
//!
//! The graph engine itself never validates; bad data degrades gracefully
//! per operation. This module is the separate, optional layer that reports
//! catalog defects so a maintainer can fix the source data. It is a report,
//! not a gate: nothing here fails a load.
//!
//! Cycle detection runs over a petgraph `DiGraph` of the forward
//! prerequisite edges (both edge kinds); a cycle is any strongly connected
//! component with more than one member, plus any course that lists itself.

use crate::graph::index::CatalogIndex;
use crate::graph::resolver::direct_prereq_codes;
use pathway_catalog::CourseCode;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A prerequisite reference with no matching course record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingReference {
    /// The course that makes the reference.
    pub course: CourseCode,
    /// The referenced code with no record.
    pub missing: CourseCode,
}

/// Defects found in a catalog. All lists are sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogReport {
    /// Prerequisite cycles: each entry is the sorted member list of one
    /// strongly connected component (or a single self-referencing course).
    pub cycles: Vec<Vec<CourseCode>>,
    /// References to codes with no course record.
    pub dangling: Vec<DanglingReference>,
    /// Grade-9 courses that still carry prerequisites (normalization
    /// clears these; their presence means the catalog skipped it).
    pub grade_nine_with_prereqs: Vec<CourseCode>,
    /// Courses with an empty OR group, which can never be satisfied.
    pub empty_groups: Vec<CourseCode>,
}

impl CatalogReport {
    /// Returns `true` if no defects were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty()
            && self.dangling.is_empty()
            && self.grade_nine_with_prereqs.is_empty()
            && self.empty_groups.is_empty()
    }

    /// Total number of findings across all categories.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.cycles.len()
            + self.dangling.len()
            + self.grade_nine_with_prereqs.len()
            + self.empty_groups.len()
    }
}

/// Inspect an index and report every catalog defect found.
#[must_use]
pub fn diagnose(index: &CatalogIndex) -> CatalogReport {
    let mut report = CatalogReport::default();

    let mut graph: DiGraph<CourseCode, ()> = DiGraph::new();
    let mut node_map: HashMap<CourseCode, NodeIndex> = HashMap::with_capacity(index.len());

    for course in index.courses() {
        let node = graph.add_node(course.code.clone());
        node_map.insert(course.code.clone(), node);
    }

    for course in index.courses() {
        let from = node_map[&course.code];
        for prereq in direct_prereq_codes(course) {
            match node_map.get(&prereq) {
                Some(&to) => {
                    graph.add_edge(from, to, ());
                }
                None => report.dangling.push(DanglingReference {
                    course: course.code.clone(),
                    missing: prereq,
                }),
            }
        }

        if course.grade == Some(9) && course.has_prereqs() {
            report.grade_nine_with_prereqs.push(course.code.clone());
        }
        if course.prereq_any_of.iter().any(Vec::is_empty) {
            report.empty_groups.push(course.code.clone());
        }
    }

    for component in tarjan_scc(&graph) {
        let is_cycle = component.len() > 1
            || component
                .first()
                .is_some_and(|&n| graph.find_edge(n, n).is_some());
        if is_cycle {
            let mut members: Vec<CourseCode> =
                component.iter().map(|&n| graph[n].clone()).collect();
            members.sort();
            report.cycles.push(members);
        }
    }

    report.cycles.sort();
    report.dangling.sort();
    report.grade_nine_with_prereqs.sort();
    report.empty_groups.sort();

    report
}
