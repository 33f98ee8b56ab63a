//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Each
//! function takes the loaded [`App`] context, the parsed arguments, and
//! the output mode.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::collections::HashSet;

use super::args::{
    CheckArgs, DoctorArgs, DoneArgs, EligibleArgs, InfoArgs, InitArgs, PlanAction, PlanArgs,
    PrereqsArgs, ShareAction, ShareArgs, ShowArgs, UndoneArgs, UnlocksArgs,
};
use crate::app::App;
use crate::graph::{self, diagnose};
use crate::output::{self, OutputMode};
use crate::share::{self, SharedPathway};
use pathway_catalog::CourseCode;

/// Execute the init command
pub fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir, &args.catalog)?;

    if !args.quiet {
        println!("Initialized pathway in {}", result.pathway_dir.display());
        println!("  Config:  {}", result.config_file.display());
        println!("  Plan:    {}", result.plan_file.display());
        println!("  Catalog: {}", result.catalog.display());
    }

    Ok(())
}

/// Execute the info command
pub fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let index = app.index();
    let plan = app.plan();

    match output_mode {
        OutputMode::Json => {
            output::print_json(&json!({
                "catalog_path": app.catalog_path().display().to_string(),
                "courses": index.len(),
                "prerequisite_edges": index.edge_count(),
                "load_warnings": app.warnings().len(),
                "plan": {
                    "completed": plan.completed.len(),
                    "planned": plan.planned_count(),
                }
            }))?;
        }
        OutputMode::Text => {
            println!("Pathway Workspace Information");
            println!("=============================");
            println!();
            println!("Catalog:  {}", app.catalog_path().display());
            println!(
                "Courses:  {} ({} prerequisite edges)",
                index.len(),
                index.edge_count()
            );
            if !app.warnings().is_empty() {
                println!("Warnings: {} (see stderr)", app.warnings().len());
            }
            println!();
            println!(
                "Plan: {} completed, {} planned",
                plan.completed.len(),
                plan.planned_count()
            );
        }
    }

    Ok(())
}

/// Execute the show command
pub fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let code = app.resolve_code(&args.code)?;
    let course = app
        .index()
        .course(&code)
        .ok_or_else(|| crate::error::Error::CourseNotFound(code.to_string()))?;

    let direct = graph::direct_prereq_codes(course);
    let dependents = app
        .index()
        .dependents_of(&code)
        .cloned()
        .unwrap_or_default();

    match output_mode {
        OutputMode::Json => {
            let mut direct: Vec<&CourseCode> = direct.iter().collect();
            direct.sort();
            let mut dependents: Vec<&CourseCode> = dependents.iter().collect();
            dependents.sort();
            output::print_json(&json!({
                "course": course,
                "direct_prereqs": direct,
                "direct_dependents": dependents,
            }))?;
        }
        OutputMode::Text => {
            println!("{}", output::course_line(course));
            if let Some(subject) = &course.subject {
                println!("  Subject: {subject}");
            }
            println!("  {}", course.prereq_summary());
            if !dependents.is_empty() {
                let mut sorted: Vec<&str> =
                    dependents.iter().map(CourseCode::as_str).collect();
                sorted.sort_unstable();
                println!("  Directly unlocks: {}", sorted.join(", "));
            }
        }
    }

    Ok(())
}

/// Execute the prereqs command
pub fn execute_prereqs(app: &App, args: &PrereqsArgs, output_mode: OutputMode) -> Result<()> {
    let code = app.resolve_code(&args.code)?;

    if args.plan {
        let completed = app.plan().completed_set();
        let plan = graph::requirement_plan(&code, app.index(), &completed);
        output::print_requirement_plan(&code, &plan, app.index(), output_mode)?;
    } else {
        let closure = graph::upstream_closure(&code, app.index());
        output::print_closure(
            &format!("Prerequisite chain for {code}"),
            &closure,
            app.index(),
            output_mode,
        )?;
    }

    Ok(())
}

/// Execute the unlocks command
pub fn execute_unlocks(app: &App, args: &UnlocksArgs, output_mode: OutputMode) -> Result<()> {
    let code = app.resolve_code(&args.code)?;
    let closure = graph::downstream_closure(&code, app.index());

    output::print_closure(
        &format!("Courses that build on {code}"),
        &closure,
        app.index(),
        output_mode,
    )?;

    Ok(())
}

/// Execute the eligible command
pub fn execute_eligible(app: &App, args: &EligibleArgs, output_mode: OutputMode) -> Result<()> {
    let completed = app.plan().completed_set();
    let mut eligible = graph::eligible_courses(app.index(), &completed);

    if !args.all {
        eligible.retain(|code| !completed.contains(code));
    }
    if !args.grades.is_empty() {
        let wanted: HashSet<u8> = args.grades.iter().copied().collect();
        eligible.retain(|code| {
            app.index()
                .course(code)
                .and_then(|c| c.grade)
                .is_some_and(|g| wanted.contains(&g))
        });
    }

    output::print_closure("Eligible now", &eligible, app.index(), output_mode)?;
    Ok(())
}

/// Execute the check command
pub fn execute_check(app: &App, args: &CheckArgs, output_mode: OutputMode) -> Result<()> {
    let code = app.resolve_code(&args.code)?;
    let course = app
        .index()
        .course(&code)
        .ok_or_else(|| crate::error::Error::CourseNotFound(code.to_string()))?;

    let completed = app.plan().completed_set();
    let detail = graph::eligibility_detail(course, &completed);
    output::print_eligibility(course, &detail, output_mode)?;

    Ok(())
}

/// Execute the plan command
pub fn execute_plan(app: &mut App, args: &PlanArgs, output_mode: OutputMode) -> Result<()> {
    match &args.action {
        PlanAction::Add { code, grade } => {
            let code = app.resolve_code(code)?;
            app.plan_mut().place(code.clone(), *grade)?;
            app.save_plan()?;
            report_change(output_mode, &format!("Planned {code} for grade {grade}"))?;
        }
        PlanAction::Remove { code } => {
            // Removal works even for codes no longer in the catalog.
            let code = CourseCode::normalized(code);
            let removed = app.plan_mut().remove(&code);
            app.save_plan()?;
            if removed {
                report_change(output_mode, &format!("Removed {code} from the plan"))?;
            } else {
                report_change(output_mode, &format!("{code} was not in the plan"))?;
            }
        }
        PlanAction::Show => {
            output::print_plan(app.plan(), app.index(), output_mode)?;
        }
        PlanAction::Clear => {
            app.plan_mut().clear();
            app.save_plan()?;
            report_change(output_mode, "Plan cleared")?;
        }
    }

    Ok(())
}

/// Execute the done command
pub fn execute_done(app: &mut App, args: &DoneArgs, output_mode: OutputMode) -> Result<()> {
    for raw in &args.codes {
        let code = app.resolve_code(raw)?;
        app.plan_mut().complete(code);
    }
    app.save_plan()?;
    report_change(
        output_mode,
        &format!("Marked {} course(s) completed", args.codes.len()),
    )?;
    Ok(())
}

/// Execute the undone command
pub fn execute_undone(app: &mut App, args: &UndoneArgs, output_mode: OutputMode) -> Result<()> {
    let mut removed = 0;
    for raw in &args.codes {
        let code = CourseCode::normalized(raw);
        if app.plan_mut().uncomplete(&code) {
            removed += 1;
        }
    }
    app.save_plan()?;
    report_change(output_mode, &format!("Unmarked {removed} course(s)"))?;
    Ok(())
}

/// Execute the share command
pub fn execute_share(app: &mut App, args: &ShareArgs, output_mode: OutputMode) -> Result<()> {
    match &args.action {
        ShareAction::Export => {
            let code = share::encode(&SharedPathway::from_plan(app.plan()));
            match output_mode {
                OutputMode::Json => output::print_json(&json!({ "share_code": code }))?,
                OutputMode::Text => println!("{code}"),
            }
        }
        ShareAction::Import { code } => {
            let Some(shared) = share::decode(code) else {
                anyhow::bail!("Unrecognized share code");
            };
            if !shared.custom_courses.is_empty() {
                eprintln!(
                    "{} share code carries {} custom course(s); codes are kept but their \
                     records are not in this catalog",
                    "note:".yellow().bold(),
                    shared.custom_courses.len()
                );
            }
            *app.plan_mut() = shared.into_plan();
            app.save_plan()?;
            report_change(output_mode, "Plan replaced from share code")?;
        }
    }

    Ok(())
}

/// Execute the doctor command
pub fn execute_doctor(app: &App, _args: &DoctorArgs, output_mode: OutputMode) -> Result<()> {
    let report = diagnose(app.index());
    output::print_doctor_report(&report, output_mode)?;
    Ok(())
}

fn report_change(output_mode: OutputMode, message: &str) -> Result<()> {
    match output_mode {
        OutputMode::Json => output::print_json(&json!({ "ok": true, "message": message }))?,
        OutputMode::Text => println!("{message}"),
    }
    Ok(())
}
