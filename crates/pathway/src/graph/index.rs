//! Catalog index: the two lookup structures every graph query runs against.
//!
//! Built once per catalog load and read-only thereafter. When the catalog
//! changes (e.g. a user adds a custom course), callers rebuild the whole
//! index rather than patching it: catalogs are small and snapshot
//! semantics keep every query consistent.

use crate::graph::resolver::direct_prereq_codes;
use pathway_catalog::{Course, CourseCode};
use std::collections::{HashMap, HashSet};

/// Immutable lookup structures derived from a course list.
///
/// - `by_code` maps each distinct code to its course record. Duplicate
///   codes in the input collapse to the **last** occurrence, a defined
///   behavior, not an accident, so a later record (e.g. a user override)
///   shadows an earlier one.
/// - `dependents` maps a code to the set of codes that name it as a direct
///   prerequisite, under either edge kind. The AND/OR distinction is not
///   kept on reverse edges: the reverse direction answers "what does this
///   unlock", which does not care how the forward edge was spelled.
///   Every course code gets a key, as does every referenced code, even a
///   dangling reference with no matching course record.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    by_code: HashMap<CourseCode, Course>,
    dependents: HashMap<CourseCode, HashSet<CourseCode>>,
}

impl CatalogIndex {
    /// Build an index from an ordered course list.
    ///
    /// Two passes: the first seeds an empty dependents-set for every
    /// course, the second records each course against every code it
    /// directly requires. Malformed prerequisite data degrades to "no
    /// prerequisites"; nothing here errors.
    #[must_use]
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let mut dependents: HashMap<CourseCode, HashSet<CourseCode>> =
            HashMap::with_capacity(courses.len());

        for course in &courses {
            dependents.entry(course.code.clone()).or_default();
        }

        for course in &courses {
            for prereq in direct_prereq_codes(course) {
                dependents.entry(prereq).or_default().insert(course.code.clone());
            }
        }

        let mut by_code = HashMap::with_capacity(courses.len());
        for course in courses {
            by_code.insert(course.code.clone(), course);
        }

        Self { by_code, dependents }
    }

    /// Look up a course by code.
    #[must_use]
    pub fn course(&self, code: &CourseCode) -> Option<&Course> {
        self.by_code.get(code)
    }

    /// Returns `true` if a course record exists for the code.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.by_code.contains_key(code)
    }

    /// The set of codes that directly require the given code.
    ///
    /// Returns `None` for a code that appears nowhere in the catalog,
    /// not even as a reference.
    #[must_use]
    pub fn dependents_of(&self, code: &CourseCode) -> Option<&HashSet<CourseCode>> {
        self.dependents.get(code)
    }

    /// Iterate all course records.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.by_code.values()
    }

    /// Number of distinct course records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Returns `true` if the index holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Total number of direct prerequisite edges in the reverse map.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependents.values().map(HashSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Course {
        Course {
            code: CourseCode::new(code),
            name: String::new(),
            grade: None,
            level: None,
            subject: None,
            prereqs: vec![],
            prereq_any_of: vec![],
            prereq_note: None,
        }
    }

    fn with_prereqs(code: &str, and: &[&str], groups: &[&[&str]]) -> Course {
        let mut c = course(code);
        c.prereqs = and.iter().map(|s| CourseCode::new(*s)).collect();
        c.prereq_any_of = groups
            .iter()
            .map(|g| g.iter().map(|s| CourseCode::new(*s)).collect())
            .collect();
        c
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = CatalogIndex::from_courses(vec![]);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.edge_count(), 0);
    }

    #[test]
    fn every_course_gets_a_dependents_key() {
        let index = CatalogIndex::from_courses(vec![course("A"), course("B")]);
        assert!(index.dependents_of(&"A".into()).unwrap().is_empty());
        assert!(index.dependents_of(&"B".into()).unwrap().is_empty());
        assert!(index.dependents_of(&"C".into()).is_none());
    }

    #[test]
    fn dependents_merge_both_edge_kinds() {
        let index = CatalogIndex::from_courses(vec![
            course("A"),
            with_prereqs("B", &["A"], &[]),
            with_prereqs("C", &[], &[&["A", "B"]]),
        ]);

        let deps_a = index.dependents_of(&"A".into()).unwrap();
        assert_eq!(deps_a.len(), 2);
        assert!(deps_a.contains(&"B".into()));
        assert!(deps_a.contains(&"C".into()));

        let deps_b = index.dependents_of(&"B".into()).unwrap();
        assert_eq!(deps_b.len(), 1);
        assert!(deps_b.contains(&"C".into()));
    }

    #[test]
    fn code_in_both_edge_kinds_counts_once() {
        // A appears in B's AND list and in one of its OR groups.
        let index = CatalogIndex::from_courses(vec![
            course("A"),
            with_prereqs("B", &["A"], &[&["A", "X"]]),
        ]);

        let deps_a = index.dependents_of(&"A".into()).unwrap();
        assert_eq!(deps_a.len(), 1);
    }

    #[test]
    fn dangling_reference_gets_a_lazily_created_key() {
        let index = CatalogIndex::from_courses(vec![with_prereqs("X", &["GHOST"], &[])]);

        assert!(!index.contains(&"GHOST".into()));
        let deps = index.dependents_of(&"GHOST".into()).unwrap();
        assert!(deps.contains(&"X".into()));
    }

    #[test]
    fn duplicate_codes_last_record_wins() {
        let mut first = course("A");
        first.name = "first".to_string();
        let mut second = course("A");
        second.name = "second".to_string();

        let index = CatalogIndex::from_courses(vec![first, second]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.course(&"A".into()).unwrap().name, "second");
    }

    #[test]
    fn rebuild_answers_queries_identically() {
        let courses = vec![
            course("A"),
            with_prereqs("B", &["A"], &[]),
            with_prereqs("C", &[], &[&["A", "B"]]),
        ];

        let index1 = CatalogIndex::from_courses(courses.clone());
        let index2 = CatalogIndex::from_courses(courses);

        assert_eq!(index1.len(), index2.len());
        assert_eq!(index1.edge_count(), index2.edge_count());
        for code in ["A", "B", "C"] {
            assert_eq!(
                index1.dependents_of(&code.into()),
                index2.dependents_of(&code.into())
            );
        }
    }
}
