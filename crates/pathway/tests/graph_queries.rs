//! End-to-end graph engine tests: catalog JSON in, query results out.
//!
//! These tests run the full pipeline (parse, normalize, index, resolve)
//! over a realistic catalog slice, then a property test checks that the
//! downstream closure agrees with plain reachability over the forward
//! edges on arbitrary (including cyclic and dangling) small catalogs.

mod common;

use common::SAMPLE_CATALOG;
use pathway::graph::{
    self, downstream_closure, eligible_courses, is_eligible, upstream_closure, CatalogIndex,
};
use pathway_catalog::{Catalog, Course, CourseCode};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn sample_index() -> CatalogIndex {
    let catalog = Catalog::from_str(SAMPLE_CATALOG).unwrap().normalized();
    assert!(catalog.warnings.is_empty(), "sample catalog should be clean");
    CatalogIndex::from_courses(catalog.courses)
}

fn set(codes: &[&str]) -> HashSet<CourseCode> {
    codes.iter().map(|s| CourseCode::new(*s)).collect()
}

// ---------------------------------------------------------------------------
// Closures over the sample catalog
// ---------------------------------------------------------------------------

#[test]
fn english_chain_is_fully_included() {
    let index = sample_index();
    assert_eq!(
        upstream_closure(&"ENG4U".into(), &index),
        set(&["ENG3U", "ENG2D", "ENG1W"])
    );
}

#[test]
fn advanced_functions_takes_first_alternative() {
    let index = sample_index();
    // MHF4U accepts MCR3U or MCT4C; the chain follows MCR3U only.
    assert_eq!(
        upstream_closure(&"MHF4U".into(), &index),
        set(&["MCR3U", "MPM2D", "MTH1W"])
    );
}

#[test]
fn grade_nine_math_unlocks_the_whole_stream() {
    let index = sample_index();
    assert_eq!(
        downstream_closure(&"MTH1W".into(), &index),
        set(&["MPM2D", "MCR3U", "MCF3M", "MHF4U", "MCT4C", "MCV4U"])
    );
}

#[test]
fn unlocks_through_either_edge_kind() {
    let index = sample_index();
    // MCF3M reaches MCT4C through an OR group, then MCT4C reaches MHF4U.
    let closure = downstream_closure(&"MCF3M".into(), &index);
    assert!(closure.contains(&"MCT4C".into()));
    assert!(closure.contains(&"MHF4U".into()));
    assert!(closure.contains(&"MCV4U".into()));
}

// ---------------------------------------------------------------------------
// Eligibility over the sample catalog
// ---------------------------------------------------------------------------

#[test]
fn fresh_student_is_eligible_for_grade_nine_only() {
    let index = sample_index();
    let eligible = eligible_courses(&index, &set(&[]));
    assert_eq!(eligible, set(&["ENG1W", "MTH1W", "SNC1W"]));
}

#[test]
fn either_alternative_satisfies_advanced_functions() {
    let index = sample_index();
    let mhf = index.course(&"MHF4U".into()).unwrap();

    assert!(is_eligible(mhf, &set(&["MCR3U"])));
    assert!(is_eligible(mhf, &set(&["MCT4C"])));
    assert!(!is_eligible(mhf, &set(&["MPM2D"])));
}

#[test]
fn completed_aware_plan_reports_alternatives() {
    let index = sample_index();
    let plan = graph::requirement_plan(&"MHF4U".into(), &index, &set(&["MTH1W", "MPM2D"]));

    assert_eq!(plan.needed, set(&["MCR3U"]));
    assert_eq!(plan.alternatives.len(), 1);
    assert_eq!(
        plan.alternatives[0].choices,
        vec![CourseCode::new("MCR3U"), CourseCode::new("MCT4C")]
    );

    // Completing either alternative empties the plan.
    let done = graph::requirement_plan(&"MHF4U".into(), &index, &set(&["MCT4C"]));
    assert!(done.needed.is_empty());
    assert!(done.alternatives.is_empty());
}

// ---------------------------------------------------------------------------
// Full-pipeline idempotence
// ---------------------------------------------------------------------------

#[test]
fn loading_twice_answers_identically() {
    let index1 = sample_index();
    let index2 = sample_index();

    for course in index1.courses() {
        let code = &course.code;
        assert_eq!(
            upstream_closure(code, &index1),
            upstream_closure(code, &index2)
        );
        assert_eq!(
            downstream_closure(code, &index1),
            downstream_closure(code, &index2)
        );
    }
}

// ---------------------------------------------------------------------------
// Property: downstream closure is exactly reverse reachability
// ---------------------------------------------------------------------------

/// A tiny arbitrary catalog: each course may require any subset of the
/// code space (including itself and codes with no record).
fn arbitrary_courses() -> impl Strategy<Value = Vec<Course>> {
    let code_count = 8usize;
    prop::collection::vec(
        (
            0..code_count,
            prop::collection::vec(0..code_count + 2, 0..3),
            prop::collection::vec(prop::collection::vec(0..code_count + 2, 0..3), 0..2),
        ),
        0..code_count,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(code, and, groups)| Course {
                code: CourseCode::new(format!("C{code}")),
                name: String::new(),
                grade: None,
                level: None,
                subject: None,
                prereqs: and
                    .into_iter()
                    .map(|i| CourseCode::new(format!("C{i}")))
                    .collect(),
                prereq_any_of: groups
                    .into_iter()
                    .map(|g| g.into_iter().map(|i| CourseCode::new(format!("C{i}"))).collect())
                    .collect(),
                prereq_note: None,
            })
            .collect()
    })
}

/// Reference model: forward direct-prerequisite edges, dependent -> prereq.
/// The reverse map records an edge for every input record, so duplicate
/// codes contribute the union of their edges here too.
fn forward_edges(courses: &[Course]) -> HashMap<CourseCode, HashSet<CourseCode>> {
    let mut edges: HashMap<CourseCode, HashSet<CourseCode>> = HashMap::new();
    for course in courses {
        edges
            .entry(course.code.clone())
            .or_default()
            .extend(graph::direct_prereq_codes(course));
    }
    edges
}

/// Is there a nonempty chain of direct-prerequisite edges from `from` back
/// to `to`?
fn reaches(
    edges: &HashMap<CourseCode, HashSet<CourseCode>>,
    from: &CourseCode,
    to: &CourseCode,
) -> bool {
    let mut visited = HashSet::new();
    let mut stack: Vec<&CourseCode> = edges
        .get(from)
        .map(|direct| direct.iter().collect())
        .unwrap_or_default();

    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if visited.insert(current.clone()) {
            if let Some(next) = edges.get(current) {
                stack.extend(next.iter());
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn downstream_matches_reverse_reachability(courses in arbitrary_courses()) {
        let edges = forward_edges(&courses);
        let index = CatalogIndex::from_courses(courses.clone());

        let mut all_codes: HashSet<CourseCode> = edges.keys().cloned().collect();
        all_codes.extend(edges.values().flatten().cloned());

        for target in &all_codes {
            let closure = downstream_closure(target, &index);
            for candidate in &all_codes {
                let expected = reaches(&edges, candidate, target);
                prop_assert_eq!(
                    closure.contains(candidate),
                    expected,
                    "target {} candidate {}",
                    target,
                    candidate
                );
            }
        }
    }

    #[test]
    fn upstream_always_terminates_within_the_code_space(courses in arbitrary_courses()) {
        let edges = forward_edges(&courses);
        let index = CatalogIndex::from_courses(courses);

        let mut all_codes: HashSet<CourseCode> = edges.keys().cloned().collect();
        all_codes.extend(edges.values().flatten().cloned());

        for code in &all_codes {
            let closure = upstream_closure(code, &index);
            // Every needed code is a known code or reference, and the
            // closure never echoes its own starting point.
            prop_assert!(closure.is_subset(&all_codes));
            prop_assert!(!closure.contains(code));
        }
    }
}
