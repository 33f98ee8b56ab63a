//! Output formatting for CLI commands.
//!
//! Every command prints either human-readable text (via `colored`, which
//! honors `NO_COLOR`) or JSON for programmatic use, selected by the global
//! `--json` flag.

use crate::graph::{CatalogIndex, CatalogReport, EligibilityDetail, RequirementPlan};
use crate::plan::{PathwayPlan, GRADES};
use colored::Colorize;
use pathway_catalog::{Course, CourseCode, Warning};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    println!("{rendered}");
    Ok(())
}

/// Print catalog load warnings to stderr so they never pollute JSON output.
pub fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// One-line course rendering: code, name, grade/level badge.
#[must_use]
pub fn course_line(course: &Course) -> String {
    let mut badges = Vec::new();
    if let Some(grade) = course.grade {
        badges.push(format!("Gr {grade}"));
    }
    if let Some(level) = &course.level {
        badges.push(level.clone());
    }
    let badge = if badges.is_empty() {
        String::new()
    } else {
        format!(" ({})", badges.join(", "))
    };
    format!("{}  {}{}", course.code.to_string().bold(), course.name, badge)
}

/// Codes bucketed for grade-grouped display.
#[derive(Debug, Default)]
pub struct GradeGroups {
    /// Known courses keyed by grade band.
    pub by_grade: BTreeMap<u8, Vec<CourseCode>>,
    /// Known courses with no grade band.
    pub ungraded: Vec<CourseCode>,
    /// Codes with no course record.
    pub unresolved: Vec<CourseCode>,
}

/// Bucket a set of codes by grade, sorting each bucket.
#[must_use]
pub fn group_by_grade(codes: &HashSet<CourseCode>, index: &CatalogIndex) -> GradeGroups {
    let mut groups = GradeGroups::default();
    for code in codes {
        match index.course(code) {
            Some(course) => match course.grade {
                Some(grade) => groups.by_grade.entry(grade).or_default().push(code.clone()),
                None => groups.ungraded.push(code.clone()),
            },
            None => groups.unresolved.push(code.clone()),
        }
    }
    for bucket in groups.by_grade.values_mut() {
        bucket.sort();
    }
    groups.ungraded.sort();
    groups.unresolved.sort();
    groups
}

/// Print a closure result grouped by grade.
pub fn print_closure(
    heading: &str,
    codes: &HashSet<CourseCode>,
    index: &CatalogIndex,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let mut sorted: Vec<&CourseCode> = codes.iter().collect();
            sorted.sort();
            print_json(&json!({ "count": codes.len(), "codes": sorted }))
        }
        OutputMode::Text => {
            println!("{heading} ({} courses):", codes.len());
            if codes.is_empty() {
                println!("  {}", "none".dimmed());
                return Ok(());
            }
            let groups = group_by_grade(codes, index);
            for (grade, bucket) in &groups.by_grade {
                println!();
                println!("  {}", format!("Grade {grade}").bold());
                for code in bucket {
                    if let Some(course) = index.course(code) {
                        println!("    {}", course_line(course));
                    }
                }
            }
            if !groups.ungraded.is_empty() {
                println!();
                println!("  {}", "No grade band".bold());
                for code in &groups.ungraded {
                    if let Some(course) = index.course(code) {
                        println!("    {}", course_line(course));
                    }
                }
            }
            if !groups.unresolved.is_empty() {
                println!();
                println!("  {}", "Unresolved".bold());
                for code in &groups.unresolved {
                    println!("    {}  {}", code, "(no catalog record)".dimmed());
                }
            }
            Ok(())
        }
    }
}

/// Print a completed-aware requirement plan, including alternative groups.
pub fn print_requirement_plan(
    target: &CourseCode,
    plan: &RequirementPlan,
    index: &CatalogIndex,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let mut needed: Vec<&CourseCode> = plan.needed.iter().collect();
            needed.sort();
            let alternatives: Vec<_> = plan
                .alternatives
                .iter()
                .map(|alt| json!({ "course": alt.course, "choices": alt.choices }))
                .collect();
            print_json(&json!({
                "target": target,
                "needed": needed,
                "alternatives": alternatives,
            }))
        }
        OutputMode::Text => {
            if plan.needed.is_empty() {
                println!(
                    "{}",
                    format!("All prerequisites for {target} are satisfied.").green()
                );
            } else {
                print_closure(
                    &format!("Still needed for {target}"),
                    &plan.needed,
                    index,
                    mode,
                )?;
            }
            if !plan.alternatives.is_empty() {
                println!();
                println!("{}", "Alternative options:".bold());
                for alt in &plan.alternatives {
                    let choices: Vec<&str> =
                        alt.choices.iter().map(CourseCode::as_str).collect();
                    println!("  {} accepts any of: {}", alt.course, choices.join(", "));
                }
            }
            Ok(())
        }
    }
}

/// Print an eligibility verdict with per-requirement detail.
pub fn print_eligibility(
    course: &Course,
    detail: &EligibilityDetail,
    mode: OutputMode,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => print_json(&json!({
            "course": course.code,
            "eligible": detail.is_eligible(),
            "missing_required": detail.missing_required,
            "unsatisfied_groups": detail.unsatisfied_groups,
        })),
        OutputMode::Text => {
            if detail.is_eligible() {
                println!("{} {}", course.code.to_string().bold(), "eligible".green());
            } else {
                println!(
                    "{} {}",
                    course.code.to_string().bold(),
                    "not eligible".red()
                );
                for missing in &detail.missing_required {
                    println!("  requires {missing}");
                }
                for group in &detail.unsatisfied_groups {
                    let choices: Vec<&str> = group.iter().map(CourseCode::as_str).collect();
                    println!("  requires one of: {}", choices.join(", "));
                }
            }
            Ok(())
        }
    }
}

/// Print the current plan, flagging placed courses whose prerequisites the
/// plan does not satisfy.
pub fn print_plan(plan: &PathwayPlan, index: &CatalogIndex, mode: OutputMode) -> io::Result<()> {
    let satisfied_by: HashSet<CourseCode> = plan
        .planned_set()
        .union(&plan.completed_set())
        .cloned()
        .collect();

    match mode {
        OutputMode::Json => {
            let planned: BTreeMap<String, Vec<serde_json::Value>> = plan
                .planned_by_grade
                .iter()
                .map(|(grade, codes)| {
                    let entries: Vec<serde_json::Value> = codes
                        .iter()
                        .map(|code| {
                            let needs_prereq = index
                                .course(code)
                                .is_some_and(|c| !crate::graph::is_eligible(c, &satisfied_by));
                            json!({ "code": code, "needs_prereq": needs_prereq })
                        })
                        .collect();
                    (grade.to_string(), entries)
                })
                .collect();
            print_json(&json!({
                "completed": plan.completed,
                "planned_by_grade": planned,
                "updated_at": plan.updated_at,
            }))
        }
        OutputMode::Text => {
            if !plan.completed.is_empty() {
                let completed: Vec<&str> =
                    plan.completed.iter().map(CourseCode::as_str).collect();
                println!("{} {}", "Completed:".bold(), completed.join(", "));
                println!();
            }
            for grade in GRADES {
                let codes = plan.planned_by_grade.get(&grade);
                let count = codes.map_or(0, BTreeSet::len);
                println!("{} ({count} selected)", format!("Grade {grade}").bold());
                if let Some(codes) = codes {
                    for code in codes {
                        match index.course(code) {
                            Some(course) => {
                                let flag = if crate::graph::is_eligible(course, &satisfied_by) {
                                    String::new()
                                } else {
                                    format!("  {}", "needs prereq".yellow())
                                };
                                println!("  {}{flag}", course_line(course));
                            }
                            None => println!("  {}  {}", code, "(no catalog record)".dimmed()),
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

/// Print a catalog diagnostics report.
pub fn print_doctor_report(report: &CatalogReport, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let dangling: Vec<_> = report
                .dangling
                .iter()
                .map(|d| json!({ "course": d.course, "missing": d.missing }))
                .collect();
            print_json(&json!({
                "clean": report.is_clean(),
                "findings": report.finding_count(),
                "cycles": report.cycles,
                "dangling": dangling,
                "grade_nine_with_prereqs": report.grade_nine_with_prereqs,
                "empty_groups": report.empty_groups,
            }))
        }
        OutputMode::Text => {
            if report.is_clean() {
                println!("{}", "Catalog is clean: no defects found.".green());
                return Ok(());
            }
            println!(
                "{}",
                format!("{} finding(s):", report.finding_count()).bold()
            );
            for cycle in &report.cycles {
                let members: Vec<&str> = cycle.iter().map(CourseCode::as_str).collect();
                println!(
                    "  {} prerequisite cycle: {}",
                    "cycle".red().bold(),
                    members.join(" -> ")
                );
            }
            for d in &report.dangling {
                println!(
                    "  {} {} references missing course {}",
                    "dangling".yellow().bold(),
                    d.course,
                    d.missing
                );
            }
            for code in &report.grade_nine_with_prereqs {
                println!(
                    "  {} grade-9 course {} lists prerequisites",
                    "grade-9".yellow().bold(),
                    code
                );
            }
            for code in &report.empty_groups {
                println!(
                    "  {} {} has an empty alternative group (never satisfiable)",
                    "empty-group".red().bold(),
                    code
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CatalogIndex;

    fn course(code: &str, grade: Option<u8>) -> Course {
        Course {
            code: CourseCode::new(code),
            name: format!("{code} name"),
            grade,
            level: None,
            subject: None,
            prereqs: vec![],
            prereq_any_of: vec![],
            prereq_note: None,
        }
    }

    #[test]
    fn grouping_buckets_by_grade_and_resolution() {
        let index = CatalogIndex::from_courses(vec![
            course("A", Some(10)),
            course("B", Some(10)),
            course("C", None),
        ]);
        let codes: HashSet<CourseCode> =
            ["A", "B", "C", "GHOST"].iter().map(|s| (*s).into()).collect();

        let groups = group_by_grade(&codes, &index);

        assert_eq!(groups.by_grade[&10], vec![
            CourseCode::new("A"),
            CourseCode::new("B")
        ]);
        assert_eq!(groups.ungraded, vec![CourseCode::new("C")]);
        assert_eq!(groups.unresolved, vec![CourseCode::new("GHOST")]);
    }

    #[test]
    fn course_line_includes_badges() {
        let mut c = course("ENG2D", Some(10));
        c.level = Some("D".to_string());
        colored::control::set_override(false);
        let line = course_line(&c);
        colored::control::unset_override();
        assert!(line.contains("ENG2D"));
        assert!(line.contains("Gr 10"));
        assert!(line.contains("D"));
    }
}
