//! Warning types for non-fatal issues found while loading a catalog.
//!
//! Catalog data comes from scraped and hand-edited sources, so individual
//! records are often imperfect. Loading never fails for a bad record; each
//! problem becomes a [`Warning`] and processing continues with the rest of
//! the document.

/// A non-fatal issue encountered while parsing or normalizing a catalog.
///
/// Each variant carries enough context (record index or course code) to
/// locate the offending entry in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A record in the course array could not be deserialized and was
    /// skipped.
    MalformedRecord {
        /// Zero-based index of the record in the source array.
        index: usize,
        /// A description of the deserialization error.
        error: String,
    },

    /// Two records shared a code; the later one replaced the earlier.
    DuplicateCode {
        /// The duplicated course code.
        code: String,
    },

    /// A grade-9 course carried prerequisites, which were cleared.
    GradeNinePrereqs {
        /// The course whose prerequisites were removed.
        code: String,
    },

    /// A course listed multiple AND prerequisites and no OR groups; the
    /// AND list was rewritten as a single OR group. Ontario catalog data
    /// almost always means "this or that" in this shape.
    AndListTreatedAsAlternatives {
        /// The course whose prerequisite list was rewritten.
        code: String,
    },
}

impl Warning {
    /// Returns a human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MalformedRecord { index, error } => {
                format!("record {index}: malformed course: {error}")
            }
            Self::DuplicateCode { code } => {
                format!("{code}: duplicate code, last record wins")
            }
            Self::GradeNinePrereqs { code } => {
                format!("{code}: grade 9 course listed prerequisites, cleared")
            }
            Self::AndListTreatedAsAlternatives { code } => {
                format!("{code}: multiple required prerequisites treated as alternatives")
            }
        }
    }

    /// Returns a static string identifying the warning kind, for
    /// programmatic filtering without pattern matching.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "malformed_record",
            Self::DuplicateCode { .. } => "duplicate_code",
            Self::GradeNinePrereqs { .. } => "grade_nine_prereqs",
            Self::AndListTreatedAsAlternatives { .. } => "and_list_treated_as_alternatives",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_context() {
        let w = Warning::MalformedRecord {
            index: 5,
            error: "missing field `code`".to_string(),
        };
        let desc = w.description();
        assert!(desc.contains("record 5"));
        assert!(desc.contains("missing field `code`"));
    }

    #[test]
    fn display_matches_description() {
        let w = Warning::DuplicateCode {
            code: "ENG4U".to_string(),
        };
        assert_eq!(format!("{w}"), w.description());
    }

    #[test]
    fn kind_enables_filtering() {
        let warnings = [
            Warning::GradeNinePrereqs {
                code: "ENG1W".to_string(),
            },
            Warning::DuplicateCode {
                code: "ENG4U".to_string(),
            },
            Warning::GradeNinePrereqs {
                code: "MTH1W".to_string(),
            },
        ];

        let cleared = warnings
            .iter()
            .filter(|w| w.kind() == "grade_nine_prereqs")
            .count();
        assert_eq!(cleared, 2);
    }
}
