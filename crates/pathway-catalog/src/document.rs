//! Catalog document parsing.
//!
//! A catalog document is a JSON file containing either a bare array of
//! course records or an object with a `courses` array. Individual records
//! that fail to deserialize are skipped with a warning; only a document
//! that is not valid JSON at all, or not one of the two recognized shapes,
//! is a hard error.

use crate::course::Course;
use crate::error::{Error, Result};
use crate::normalize;
use crate::warning::Warning;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A parsed catalog: the surviving course records plus any warnings
/// produced while reading them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Course records, in document order.
    pub courses: Vec<Course>,

    /// Non-fatal issues encountered during parsing and normalization.
    pub warnings: Vec<Warning>,
}

impl Catalog {
    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] when the document is not valid JSON and
    /// [`Error::InvalidFormat`] when it is JSON but neither an array nor
    /// an object with a `courses` array.
    pub fn from_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse a catalog from a reader.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Catalog::from_str`], plus [`Error::Io`] for
    /// read failures.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Parse a catalog from a file path.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Catalog::from_reader`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_value(value: Value) -> Result<Self> {
        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut map) => match map.remove("courses") {
                Some(Value::Array(records)) => records,
                Some(_) => {
                    return Err(Error::InvalidFormat(
                        "`courses` field is not an array".to_string(),
                    ));
                }
                None => {
                    return Err(Error::InvalidFormat(
                        "expected an array of courses or an object with a `courses` array"
                            .to_string(),
                    ));
                }
            },
            other => {
                return Err(Error::InvalidFormat(format!(
                    "expected array or object, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let mut courses = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Course>(record) {
                Ok(course) => courses.push(course),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed course record");
                    warnings.push(Warning::MalformedRecord {
                        index,
                        error: err.to_string(),
                    });
                }
            }
        }

        Ok(Self { courses, warnings })
    }

    /// Run the normalization pass over the parsed courses.
    ///
    /// See [`crate::normalize`] for the rewrites applied. Warnings produced
    /// by normalization are appended to the catalog's warning list.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let warnings = normalize::normalize_courses(&mut self.courses);
        self.warnings.extend(warnings);
        self
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
