//! Shareable pathway codes.
//!
//! A plan (plus any user-defined custom courses) compacts into a small
//! versioned JSON payload, encoded base64url without padding so it can ride
//! in a URL fragment or be pasted into chat. Decoding is tolerant: garbage
//! yields `None`, version-1 payloads are accepted in their uncompacted
//! form, and unversioned payloads fall back to field-presence detection.
//!
//! Payload shape (version 2), with empty fields omitted:
//!
//! ```text
//! {"v":2,"d":{"m":<mode>,"c":[codes],"p":{"9":[codes],...}},"u":[[code,name,subject],...]}
//! ```

use crate::plan::{PathwayPlan, GRADES};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use pathway_catalog::CourseCode;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Current share payload version.
pub const SHARE_PAYLOAD_VERSION: u64 = 2;

const DEFAULT_MODE: &str = "backward";

/// A user-defined course carried inside a share payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCourse {
    /// Course code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Subject area, defaulting to "other".
    pub subject: String,
}

/// The expanded contents of a share payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedPathway {
    /// Planner mode ("backward" or "forward").
    pub mode: String,
    /// Completed course codes.
    pub completed: Vec<CourseCode>,
    /// Planned codes keyed by grade band.
    pub planned_by_grade: BTreeMap<u8, Vec<CourseCode>>,
    /// User-defined courses bundled with the pathway.
    pub custom_courses: Vec<CustomCourse>,
}

impl Default for SharedPathway {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            completed: Vec::new(),
            planned_by_grade: GRADES.iter().map(|&g| (g, Vec::new())).collect(),
            custom_courses: Vec::new(),
        }
    }
}

impl SharedPathway {
    /// Capture a plan into shareable form.
    #[must_use]
    pub fn from_plan(plan: &PathwayPlan) -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            completed: plan.completed.iter().cloned().collect(),
            planned_by_grade: plan
                .planned_by_grade
                .iter()
                .map(|(&g, codes)| (g, codes.iter().cloned().collect()))
                .collect(),
            custom_courses: Vec::new(),
        }
    }

    /// Expand back into a plan. Grades outside 9-12 are dropped.
    #[must_use]
    pub fn into_plan(self) -> PathwayPlan {
        let mut plan = PathwayPlan::new();
        plan.completed = self.completed.into_iter().collect();
        for (grade, codes) in self.planned_by_grade {
            if GRADES.contains(&grade) {
                plan.planned_by_grade
                    .entry(grade)
                    .or_default()
                    .extend(codes);
            }
        }
        plan
    }
}

/// Encode a pathway as a base64url share code.
#[must_use]
pub fn encode(data: &SharedPathway) -> String {
    let payload = json!({
        "v": SHARE_PAYLOAD_VERSION,
        "d": compact_pathway(data),
        "u": compact_custom_courses(&data.custom_courses),
    });
    URL_SAFE_NO_PAD.encode(payload.to_string())
}

/// Decode a share code. Returns `None` for anything unrecognizable.
#[must_use]
pub fn decode(encoded: &str) -> Option<SharedPathway> {
    if encoded.is_empty() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    let parsed: Value = serde_json::from_slice(&bytes).ok()?;
    let obj = parsed.as_object()?;

    if obj.get("v").and_then(Value::as_u64) == Some(SHARE_PAYLOAD_VERSION) {
        return Some(expand_payload(obj));
    }
    if obj.get("version").and_then(Value::as_u64) == Some(1) {
        return Some(expand_v1(obj));
    }
    // Unversioned but compact-shaped payloads are still accepted.
    if obj.contains_key("d") || obj.contains_key("u") {
        return Some(expand_payload(obj));
    }
    None
}

fn compact_pathway(data: &SharedPathway) -> Value {
    let mut compact = Map::new();
    if data.mode != DEFAULT_MODE {
        compact.insert("m".to_string(), json!(data.mode));
    }
    if !data.completed.is_empty() {
        compact.insert("c".to_string(), json!(data.completed));
    }
    let mut planned = Map::new();
    for (&grade, codes) in &data.planned_by_grade {
        if !codes.is_empty() {
            planned.insert(grade.to_string(), json!(codes));
        }
    }
    if !planned.is_empty() {
        compact.insert("p".to_string(), Value::Object(planned));
    }
    Value::Object(compact)
}

fn compact_custom_courses(courses: &[CustomCourse]) -> Value {
    let triples: Vec<Value> = courses
        .iter()
        .filter(|c| !c.code.is_empty() && !c.name.is_empty())
        .map(|c| json!([c.code, c.name, c.subject]))
        .collect();
    Value::Array(triples)
}

fn expand_payload(obj: &Map<String, Value>) -> SharedPathway {
    let mut data = SharedPathway::default();

    if let Some(compact) = obj.get("d").and_then(Value::as_object) {
        if let Some(mode) = compact.get("m").and_then(Value::as_str) {
            data.mode = mode.to_string();
        }
        data.completed = code_list(compact.get("c"));
        if let Some(planned) = compact.get("p").and_then(Value::as_object) {
            for grade in GRADES {
                let codes = code_list(planned.get(&grade.to_string()));
                data.planned_by_grade.insert(grade, codes);
            }
        }
    }

    data.custom_courses = obj
        .get("u")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(expand_custom_course).collect())
        .unwrap_or_default();

    data
}

// Version-1 payloads carried the expanded field names at the top level.
fn expand_v1(obj: &Map<String, Value>) -> SharedPathway {
    let mut data = SharedPathway::default();
    if let Some(mode) = obj.get("mode").and_then(Value::as_str) {
        data.mode = mode.to_string();
    }
    data.completed = code_list(obj.get("completed"));
    if let Some(planned) = obj.get("plannedByGrade").and_then(Value::as_object) {
        for grade in GRADES {
            data.planned_by_grade
                .insert(grade, code_list(planned.get(&grade.to_string())));
        }
    }
    data
}

fn expand_custom_course(entry: &Value) -> Option<CustomCourse> {
    match entry {
        Value::Array(triple) => {
            let code = triple.first()?.as_str()?.trim();
            let name = triple.get(1)?.as_str()?.trim();
            if code.is_empty() || name.is_empty() {
                return None;
            }
            Some(CustomCourse {
                code: code.to_string(),
                name: name.to_string(),
                subject: triple
                    .get(2)
                    .and_then(Value::as_str)
                    .unwrap_or("other")
                    .to_string(),
            })
        }
        Value::Object(map) => {
            let code = map.get("code")?.as_str()?.trim();
            let name = map.get("name")?.as_str()?.trim();
            if code.is_empty() || name.is_empty() {
                return None;
            }
            Some(CustomCourse {
                code: code.to_string(),
                name: name.to_string(),
                subject: map
                    .get("subject")
                    .and_then(Value::as_str)
                    .unwrap_or("other")
                    .to_string(),
            })
        }
        _ => None,
    }
}

fn code_list(value: Option<&Value>) -> Vec<CourseCode> {
    value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(CourseCode::from)
                .collect()
        })
        .unwrap_or_default()
}
