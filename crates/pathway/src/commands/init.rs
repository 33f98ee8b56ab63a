//! Implementation of the `init` command.
//!
//! Initialization creates the `.pathway/` directory with a YAML config
//! pointing at the course catalog and an empty plan file.

use crate::error::{Error, Result};
use crate::plan::PathwayPlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the pathway directory
pub const PATHWAY_DIR_NAME: &str = ".pathway";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the plan data file
pub const PLAN_FILE_NAME: &str = "plan.json";

/// Maximum directory depth to traverse when searching for the pathway root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for pathway
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathwayConfig {
    /// Path to the course catalog JSON document, relative to the directory
    /// containing `.pathway/` (or absolute).
    pub catalog: PathBuf,
}

impl PathwayConfig {
    /// Create a new configuration pointing at the given catalog.
    pub fn new(catalog: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the catalog path against the pathway root directory.
    #[must_use]
    pub fn catalog_path(&self, root: &Path) -> PathBuf {
        if self.catalog.is_absolute() {
            self.catalog.clone()
        } else {
            root.join(&self.catalog)
        }
    }
}

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created pathway directory
    pub pathway_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created plan file
    pub plan_file: PathBuf,
    /// The configured catalog path
    pub catalog: PathBuf,
}

/// Initialize a pathway workspace in the given directory.
///
/// # Errors
///
/// Returns an error if `.pathway/` already exists, if the catalog file
/// does not exist, or if file system operations fail.
pub fn init(base_dir: &Path, catalog: &Path) -> Result<InitResult> {
    if !catalog.exists() {
        return Err(Error::Config(format!(
            "Catalog file not found: {}",
            catalog.display()
        )));
    }

    let pathway_dir = base_dir.join(PATHWAY_DIR_NAME);
    if pathway_dir.exists() {
        return Err(Error::Config(format!(
            "Pathway is already initialized in this directory. Found existing '{PATHWAY_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&pathway_dir)?;

    let config_file = pathway_dir.join(CONFIG_FILE_NAME);
    let config = PathwayConfig::new(catalog);
    config.save(&config_file)?;

    let plan_file = pathway_dir.join(PLAN_FILE_NAME);
    PathwayPlan::new().save(&plan_file)?;

    Ok(InitResult {
        pathway_dir,
        config_file,
        plan_file,
        catalog: catalog.to_path_buf(),
    })
}

/// Check if a directory has been initialized with pathway.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(PATHWAY_DIR_NAME).exists()
}

/// Find the pathway root directory by searching up the directory tree.
///
/// Returns `Some(path)` with the directory containing `.pathway/`, or
/// `None` if no pathway workspace is found within the depth limit.
pub fn find_pathway_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(PATHWAY_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
