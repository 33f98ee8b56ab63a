//! Planner state: completed courses and the four-year plan.
//!
//! This is the application-owned mutable state the graph engine never
//! touches; the engine sees only snapshots of the sets held here. The
//! plan persists as JSON beside the config so a pathway survives between
//! invocations.

use crate::error::{Error, Result};
use pathway_catalog::CourseCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::Path;

/// The grade bands a course can be planned into.
pub const GRADES: [u8; 4] = [9, 10, 11, 12];

/// A student's pathway: completed courses plus courses placed per grade.
///
/// Placement does not enforce eligibility (a student may sketch freely),
/// but display layers flag placed courses whose prerequisites the plan
/// does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayPlan {
    /// Courses already completed (or committed to), in sorted order.
    #[serde(default)]
    pub completed: BTreeSet<CourseCode>,

    /// Planned course codes keyed by grade band.
    #[serde(default)]
    pub planned_by_grade: BTreeMap<u8, BTreeSet<CourseCode>>,

    /// ISO 8601 timestamp of the last save; empty for a never-saved plan.
    #[serde(default)]
    pub updated_at: String,
}

impl Default for PathwayPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl PathwayPlan {
    /// Create an empty plan with all four grade bands present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: BTreeSet::new(),
            planned_by_grade: GRADES.iter().map(|&g| (g, BTreeSet::new())).collect(),
            updated_at: String::new(),
        }
    }

    /// Flatten the per-grade sets into one planned set.
    #[must_use]
    pub fn planned_set(&self) -> HashSet<CourseCode> {
        self.planned_by_grade
            .values()
            .flat_map(|codes| codes.iter().cloned())
            .collect()
    }

    /// The completed set as a hash set for resolver queries.
    #[must_use]
    pub fn completed_set(&self) -> HashSet<CourseCode> {
        self.completed.iter().cloned().collect()
    }

    /// Place a course into a grade band, moving it if already placed
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrade`] for a grade outside 9-12.
    pub fn place(&mut self, code: CourseCode, grade: u8) -> Result<()> {
        if !GRADES.contains(&grade) {
            return Err(Error::InvalidGrade(grade));
        }
        self.remove(&code);
        self.planned_by_grade.entry(grade).or_default().insert(code);
        Ok(())
    }

    /// Remove a course from every grade band. Returns `true` if it was
    /// planned anywhere.
    pub fn remove(&mut self, code: &CourseCode) -> bool {
        let mut removed = false;
        for codes in self.planned_by_grade.values_mut() {
            removed |= codes.remove(code);
        }
        removed
    }

    /// The grade band a course is currently planned into, if any.
    #[must_use]
    pub fn grade_of(&self, code: &CourseCode) -> Option<u8> {
        self.planned_by_grade
            .iter()
            .find(|(_, codes)| codes.contains(code))
            .map(|(&grade, _)| grade)
    }

    /// Mark a course completed.
    pub fn complete(&mut self, code: CourseCode) {
        self.completed.insert(code);
    }

    /// Unmark a completed course. Returns `true` if it was completed.
    pub fn uncomplete(&mut self, code: &CourseCode) -> bool {
        self.completed.remove(code)
    }

    /// Wipe everything back to an empty plan.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Total number of planned courses across all grades.
    #[must_use]
    pub fn planned_count(&self) -> usize {
        self.planned_by_grade.values().map(BTreeSet::len).sum()
    }

    /// Load a plan from a JSON file. A missing file yields an empty plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Plan`] when the file exists but cannot be read or
    /// parsed; a corrupt plan is surfaced, not silently discarded.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Plan(format!("{}: {e}", path.display())))?;
        let mut plan: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Plan(format!("{}: {e}", path.display())))?;
        // Older plan files may lack some grade bands.
        for grade in GRADES {
            plan.planned_by_grade.entry(grade).or_default();
        }
        Ok(plan)
    }

    /// Save the plan as pretty-printed JSON, stamping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Plan`] on serialization or write failure.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.updated_at = chrono::Utc::now().to_rfc3339();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Plan(e.to_string()))?;
        fs::write(path, contents).map_err(|e| Error::Plan(format!("{}: {e}", path.display())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn new_plan_has_all_grade_bands() {
        let plan = PathwayPlan::new();
        for grade in GRADES {
            assert!(plan.planned_by_grade.contains_key(&grade));
        }
        assert_eq!(plan.planned_count(), 0);
    }

    #[test]
    fn place_moves_between_grades() {
        let mut plan = PathwayPlan::new();
        plan.place("ENG2D".into(), 10).unwrap();
        assert_eq!(plan.grade_of(&"ENG2D".into()), Some(10));

        plan.place("ENG2D".into(), 11).unwrap();
        assert_eq!(plan.grade_of(&"ENG2D".into()), Some(11));
        assert_eq!(plan.planned_count(), 1);
    }

    #[test]
    fn place_rejects_invalid_grade() {
        let mut plan = PathwayPlan::new();
        let err = plan.place("ENG2D".into(), 13).unwrap_err();
        assert!(matches!(err, Error::InvalidGrade(13)));
    }

    #[test]
    fn remove_clears_from_every_grade() {
        let mut plan = PathwayPlan::new();
        plan.place("ENG2D".into(), 10).unwrap();
        assert!(plan.remove(&"ENG2D".into()));
        assert!(!plan.remove(&"ENG2D".into()));
        assert_eq!(plan.planned_count(), 0);
    }

    #[test]
    fn planned_set_flattens_grades() {
        let mut plan = PathwayPlan::new();
        plan.place("ENG1W".into(), 9).unwrap();
        plan.place("ENG2D".into(), 10).unwrap();

        let set = plan.planned_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"ENG1W".into()));
        assert!(set.contains(&"ENG2D".into()));
    }

    #[test]
    fn complete_and_uncomplete() {
        let mut plan = PathwayPlan::new();
        plan.complete("ENG1W".into());
        assert!(plan.completed_set().contains(&"ENG1W".into()));
        assert!(plan.uncomplete(&"ENG1W".into()));
        assert!(!plan.uncomplete(&"ENG1W".into()));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");

        let mut plan = PathwayPlan::new();
        plan.complete("ENG1W".into());
        plan.place("ENG2D".into(), 10).unwrap();
        plan.save(&path).unwrap();
        assert!(!plan.updated_at.is_empty());

        let loaded = PathwayPlan::load(&path).unwrap();
        assert_eq!(loaded, plan);
    }

    #[test]
    fn load_missing_file_is_empty_plan() {
        let dir = TempDir::new().unwrap();
        let plan = PathwayPlan::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(plan, PathwayPlan::new());
    }

    #[test]
    fn load_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PathwayPlan::load(&path).unwrap_err();
        assert!(matches!(err, Error::Plan(_)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut plan = PathwayPlan::new();
        plan.complete("A".into());
        plan.place("B".into(), 11).unwrap();
        plan.clear();
        assert_eq!(plan, PathwayPlan::new());
    }
}
