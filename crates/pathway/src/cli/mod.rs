//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for pathway using
//! clap's derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a pathway workspace pointing at a catalog
//! - `info`: Show workspace information
//! - `show`: Show a course with its direct prerequisites and dependents
//! - `prereqs`: Show the full prerequisite chain for a course
//! - `unlocks`: Show everything a course transitively unlocks
//! - `eligible`: List courses whose prerequisites are satisfied
//! - `check`: Test a single course against the completed set
//! - `plan`: Place, remove, show, or clear planned courses
//! - `done` / `undone`: Mark courses completed
//! - `share`: Export or import a shareable plan code
//! - `doctor`: Report catalog defects (cycles, dangling references)
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! pathway init --catalog data/ontario_courses.json
//! pathway done ENG1W MTH1W
//! pathway prereqs ENG4U
//! pathway plan add ENG2D --grade 10
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    CheckArgs, DoctorArgs, DoneArgs, EligibleArgs, InfoArgs, InitArgs, PlanAction, PlanArgs,
    PrereqsArgs, ShareAction, ShareArgs, ShowArgs, UndoneArgs, UnlocksArgs,
};

// Re-export validators for external use
pub use validators::parse_course_code;

/// Pathway - a prerequisite-graph course planner
///
/// Plan a four-year high-school pathway against a course catalog with
/// prerequisite constraints. State lives in `.pathway/` in the directory
/// where you ran `pathway init`.
#[derive(Parser, Debug)]
#[command(name = "pathway")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a pathway workspace
    ///
    /// Creates the `.pathway/` directory with configuration pointing at the
    /// given course catalog and an empty plan.
    Init(InitArgs),

    /// Show workspace information
    ///
    /// Displays catalog path, course and edge counts, and plan summary.
    Info(InfoArgs),

    /// Show detailed information about a course
    ///
    /// Displays the course record, its direct prerequisites, and the
    /// courses that directly require it.
    Show(ShowArgs),

    /// Show the full prerequisite chain for a course
    ///
    /// Walks the prerequisite graph transitively. Where a course accepts
    /// alternatives, the first listed alternative is shown; pass `--plan`
    /// to account for completed courses and list the other options.
    Prereqs(PrereqsArgs),

    /// Show every course a course transitively unlocks
    ///
    /// Walks the reverse dependency graph: all courses that require this
    /// one directly or through intermediates.
    Unlocks(UnlocksArgs),

    /// List courses whose prerequisites are satisfied
    ///
    /// Evaluates the full AND/OR prerequisite structure of every course
    /// against the completed set in the plan.
    Eligible(EligibleArgs),

    /// Check whether a single course can be taken now
    ///
    /// Prints the verdict along with exactly which requirements are
    /// missing.
    Check(CheckArgs),

    /// Manage the four-year plan
    ///
    /// Place courses into grade bands, remove them, or show the plan with
    /// unmet-prerequisite flags.
    Plan(PlanArgs),

    /// Mark courses as completed
    Done(DoneArgs),

    /// Unmark completed courses
    Undone(UndoneArgs),

    /// Export or import a shareable plan code
    Share(ShareArgs),

    /// Report catalog defects
    ///
    /// Lists prerequisite cycles, dangling references, and other data
    /// problems. Informational only; never fails the load.
    Doctor(DoctorArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::{self, OutputMode};

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args),
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                output::print_warnings(app.warnings());
                execute::execute_info(&app, args, output_mode)
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_show(&app, args, output_mode)
            }
            Some(Commands::Prereqs(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_prereqs(&app, args, output_mode)
            }
            Some(Commands::Unlocks(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_unlocks(&app, args, output_mode)
            }
            Some(Commands::Eligible(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_eligible(&app, args, output_mode)
            }
            Some(Commands::Check(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_check(&app, args, output_mode)
            }
            Some(Commands::Plan(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_plan(&mut app, args, output_mode)
            }
            Some(Commands::Done(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_done(&mut app, args, output_mode)
            }
            Some(Commands::Undone(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_undone(&mut app, args, output_mode)
            }
            Some(Commands::Share(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_share(&mut app, args, output_mode)
            }
            Some(Commands::Doctor(args)) => {
                let app = App::from_directory(&std::env::current_dir()?)?;
                execute::execute_doctor(&app, args, output_mode)
            }
            None => {
                println!("Pathway course planner");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
