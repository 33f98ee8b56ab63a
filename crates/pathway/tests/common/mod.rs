//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// A small but realistic slice of an Ontario course catalog.
pub const SAMPLE_CATALOG: &str = r#"{
  "courses": [
    {"code": "ENG1W", "name": "English", "grade": 9, "level": "W", "subject": "english"},
    {"code": "ENG2D", "name": "English", "grade": 10, "level": "D", "subject": "english",
     "prereqs": ["ENG1W"]},
    {"code": "ENG3U", "name": "English", "grade": 11, "level": "U", "subject": "english",
     "prereqs": ["ENG2D"]},
    {"code": "ENG4U", "name": "English", "grade": 12, "level": "U", "subject": "english",
     "prereqs": ["ENG3U"]},
    {"code": "MTH1W", "name": "Mathematics", "grade": 9, "level": "W", "subject": "math"},
    {"code": "MPM2D", "name": "Principles of Mathematics", "grade": 10, "level": "D",
     "subject": "math", "prereqs": ["MTH1W"]},
    {"code": "MCR3U", "name": "Functions", "grade": 11, "level": "U", "subject": "math",
     "prereqs": ["MPM2D"]},
    {"code": "MCF3M", "name": "Functions and Applications", "grade": 11, "level": "M",
     "subject": "math", "prereqs": ["MPM2D"]},
    {"code": "MHF4U", "name": "Advanced Functions", "grade": 12, "level": "U",
     "subject": "math", "prereq_any_of": [["MCR3U", "MCT4C"]]},
    {"code": "MCT4C", "name": "Calculus and Vectors for College", "grade": 12, "level": "C",
     "subject": "math", "prereq_any_of": [["MCR3U", "MCF3M"]]},
    {"code": "MCV4U", "name": "Calculus and Vectors", "grade": 12, "level": "U",
     "subject": "math", "prereqs": ["MHF4U"]},
    {"code": "SNC1W", "name": "Science", "grade": 9, "level": "W", "subject": "science"},
    {"code": "SNC2D", "name": "Science", "grade": 10, "level": "D", "subject": "science",
     "prereqs": ["SNC1W"]},
    {"code": "SCH3U", "name": "Chemistry", "grade": 11, "level": "U", "subject": "science",
     "prereqs": ["SNC2D"]},
    {"code": "SCH4U", "name": "Chemistry", "grade": 12, "level": "U", "subject": "science",
     "prereqs": ["SCH3U"]}
  ]
}"#;

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // Go up from crates/pathway to workspace root
    manifest_dir
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Helper that builds the binary once and runs it directly
pub fn get_pathway_binary() -> PathBuf {
    let workspace = workspace_root();

    // Build the binary first (this should be quick if already built)
    let status = Command::new("cargo")
        .args(["build", "--package", "pathway", "--quiet"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build pathway");

    assert!(status.success(), "Failed to build pathway binary");

    workspace.join("target/debug/pathway")
}

/// Run the pathway binary directly in the specified directory
pub fn run_pathway_in_dir(dir: &Path, args: &[&str]) -> Output {
    let binary = get_pathway_binary();

    Command::new(&binary)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute pathway binary")
}

/// Write the sample catalog into a directory and return its path
pub fn write_sample_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("courses.json");
    std::fs::write(&path, SAMPLE_CATALOG).expect("Failed to write sample catalog");
    path
}
