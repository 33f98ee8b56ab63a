//! Argument structs for each CLI command.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::validators::parse_course_code;

/// Arguments for the `init` command
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Path to the course catalog JSON document
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Args, Debug, Clone)]
pub struct InfoArgs {}

/// Arguments for the `show` command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Course code to show
    #[arg(value_parser = parse_course_code)]
    pub code: String,
}

/// Arguments for the `prereqs` command
#[derive(Args, Debug, Clone)]
pub struct PrereqsArgs {
    /// Target course code
    #[arg(value_parser = parse_course_code)]
    pub code: String,

    /// Account for already-completed courses and list alternatives
    #[arg(long)]
    pub plan: bool,
}

/// Arguments for the `unlocks` command
#[derive(Args, Debug, Clone)]
pub struct UnlocksArgs {
    /// Course code whose dependents to list
    #[arg(value_parser = parse_course_code)]
    pub code: String,
}

/// Arguments for the `eligible` command
#[derive(Args, Debug, Clone)]
pub struct EligibleArgs {
    /// Restrict results to these grade bands (repeatable)
    #[arg(long = "grade", value_name = "GRADE",
          value_parser = clap::value_parser!(u8).range(9..=12))]
    pub grades: Vec<u8>,

    /// Include courses already marked completed
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `check` command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Course code to test against the completed set
    #[arg(value_parser = parse_course_code)]
    pub code: String,
}

/// Arguments for the `plan` command
#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Plan action to perform
    #[command(subcommand)]
    pub action: PlanAction,
}

/// Actions available under `plan`
#[derive(Subcommand, Debug, Clone)]
pub enum PlanAction {
    /// Place a course into a grade band (moves it if already placed)
    Add {
        /// Course code to place
        #[arg(value_parser = parse_course_code)]
        code: String,

        /// Grade band to place it in
        #[arg(long, value_parser = clap::value_parser!(u8).range(9..=12))]
        grade: u8,
    },

    /// Remove a course from the plan
    Remove {
        /// Course code to remove
        #[arg(value_parser = parse_course_code)]
        code: String,
    },

    /// Show the current plan
    Show,

    /// Wipe the plan and completed set
    Clear,
}

/// Arguments for the `done` command
#[derive(Args, Debug, Clone)]
pub struct DoneArgs {
    /// Course codes to mark completed
    #[arg(required = true, value_parser = parse_course_code)]
    pub codes: Vec<String>,
}

/// Arguments for the `undone` command
#[derive(Args, Debug, Clone)]
pub struct UndoneArgs {
    /// Course codes to unmark
    #[arg(required = true, value_parser = parse_course_code)]
    pub codes: Vec<String>,
}

/// Arguments for the `share` command
#[derive(Args, Debug, Clone)]
pub struct ShareArgs {
    /// Share action to perform
    #[command(subcommand)]
    pub action: ShareAction,
}

/// Actions available under `share`
#[derive(Subcommand, Debug, Clone)]
pub enum ShareAction {
    /// Print a share code for the current plan
    Export,

    /// Replace the current plan with one decoded from a share code
    Import {
        /// The share code to decode
        code: String,
    },
}

/// Arguments for the `doctor` command
#[derive(Args, Debug, Clone)]
pub struct DoctorArgs {}
