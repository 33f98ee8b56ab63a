//! Course record types.
//!
//! A [`Course`] is immutable after load. Prerequisite structure comes in two
//! kinds: the AND list (`prereqs`), where every entry must be satisfied, and
//! OR groups (`prereq_any_of`), where one member per group suffices. Both
//! fields are "sequence, possibly empty": absent or null fields in source
//! data deserialize to empty vectors, so downstream code never re-checks for
//! missing prerequisite arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a course (e.g. `ENG4U`).
///
/// Codes are opaque, case-normalized strings. Comparison is exact; callers
/// are expected to normalize user input with [`CourseCode::normalized`]
/// before querying.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(pub String);

impl CourseCode {
    /// Create a new course code without normalization.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a course code from user input: trimmed and uppercased.
    pub fn normalized(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CourseCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A course record as loaded from a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code. Primary key within a catalog.
    pub code: CourseCode,

    /// Human-readable course name.
    #[serde(default)]
    pub name: String,

    /// Grade band (9-12), or `None` for courses outside the normal bands
    /// (e.g. user-defined courses).
    #[serde(default)]
    pub grade: Option<u8>,

    /// Course level designation (e.g. "U", "M", "C"). Opaque to the graph
    /// engine.
    #[serde(default)]
    pub level: Option<String>,

    /// Subject area. Opaque to the graph engine.
    #[serde(default)]
    pub subject: Option<String>,

    /// AND-list prerequisites: every entry must be satisfied independently.
    #[serde(default)]
    pub prereqs: Vec<CourseCode>,

    /// OR-group prerequisites: each group is satisfied by any one member,
    /// and every group must be satisfied. A conjunction of disjunctions.
    #[serde(default)]
    pub prereq_any_of: Vec<Vec<CourseCode>>,

    /// Free-text prerequisite note carried through from source data for
    /// courses whose requirements could not be resolved to codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prereq_note: Option<String>,
}

impl Course {
    /// Returns `true` if the course has any prerequisite structure at all.
    #[must_use]
    pub fn has_prereqs(&self) -> bool {
        !self.prereqs.is_empty() || !self.prereq_any_of.is_empty()
    }

    /// One-line prerequisite summary for card-style display.
    ///
    /// Shows the AND list, the first OR group, or the free-text note when
    /// no structured requirements exist.
    #[must_use]
    pub fn prereq_summary(&self) -> String {
        let and_part = (!self.prereqs.is_empty()).then(|| {
            self.prereqs
                .iter()
                .map(CourseCode::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        });
        let or_part = self.prereq_any_of.first().map(|group| {
            group
                .iter()
                .map(CourseCode::as_str)
                .collect::<Vec<_>>()
                .join(" or ")
        });

        match (and_part, or_part) {
            (Some(and), Some(or)) => format!("Prereqs: {and} + ({or})"),
            (Some(and), None) => format!("Prereqs: {and}"),
            (None, Some(or)) => format!("Prereqs: {or}"),
            (None, None) => match &self.prereq_note {
                Some(note) if !note.is_empty() => format!("Prereq: {note}"),
                _ => "No prerequisites".to_string(),
            },
        }
    }
}
