//! Application context for CLI command execution.
//!
//! `App` wires the pieces together: it finds the `.pathway/` workspace,
//! loads and normalizes the catalog, builds the immutable [`CatalogIndex`]
//! snapshot, and loads the plan. Commands query the index through pure
//! resolver functions and mutate only the plan.

use crate::commands::init::{
    find_pathway_root, PathwayConfig, CONFIG_FILE_NAME, PATHWAY_DIR_NAME, PLAN_FILE_NAME,
};
use crate::error::{Error, Result};
use crate::graph::CatalogIndex;
use crate::plan::PathwayPlan;
use pathway_catalog::{Catalog, CourseCode, Warning};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
pub struct App {
    index: CatalogIndex,
    plan: PathwayPlan,
    warnings: Vec<Warning>,
    pathway_dir: PathBuf,
    catalog_path: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("pathway_dir", &self.pathway_dir)
            .field("catalog_path", &self.catalog_path)
            .field("courses", &self.index.len())
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.pathway/` directory, loads
    /// configuration, parses and normalizes the catalog, builds the index,
    /// and loads the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if no pathway workspace is found, the config or
    /// catalog cannot be read, or the plan file is corrupt.
    pub fn from_directory(working_dir: &Path) -> Result<Self> {
        let root = find_pathway_root(working_dir).ok_or_else(|| {
            Error::Config("Not a pathway workspace (run `pathway init` first)".to_string())
        })?;

        let pathway_dir = root.join(PATHWAY_DIR_NAME);
        let config = PathwayConfig::load(&pathway_dir.join(CONFIG_FILE_NAME))?;
        let catalog_path = config.catalog_path(&root);

        tracing::debug!(catalog = %catalog_path.display(), "loading catalog");
        let catalog = Catalog::from_path(&catalog_path)?.normalized();
        let warnings = catalog.warnings.clone();
        let index = CatalogIndex::from_courses(catalog.courses);

        let plan = PathwayPlan::load(&pathway_dir.join(PLAN_FILE_NAME))?;

        tracing::debug!(
            courses = index.len(),
            edges = index.edge_count(),
            warnings = warnings.len(),
            "catalog indexed"
        );

        Ok(Self {
            index,
            plan,
            warnings,
            pathway_dir,
            catalog_path,
        })
    }

    /// The built catalog index.
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// The loaded plan.
    pub fn plan(&self) -> &PathwayPlan {
        &self.plan
    }

    /// Mutable access to the plan for plan-editing commands.
    pub fn plan_mut(&mut self) -> &mut PathwayPlan {
        &mut self.plan
    }

    /// Warnings produced while loading the catalog.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Path to the `.pathway` directory.
    pub fn pathway_dir(&self) -> &Path {
        &self.pathway_dir
    }

    /// Path to the catalog document.
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Persist the plan to its file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Plan`] on write failure.
    pub fn save_plan(&mut self) -> Result<()> {
        self.plan.save(&self.pathway_dir.join(PLAN_FILE_NAME))
    }

    /// Normalize a user-typed code and require that it exists in the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CourseNotFound`] for an unknown code.
    pub fn resolve_code(&self, raw: &str) -> Result<CourseCode> {
        let code = CourseCode::normalized(raw);
        if self.index.contains(&code) {
            Ok(code)
        } else {
            Err(Error::CourseNotFound(code.to_string()))
        }
    }
}
