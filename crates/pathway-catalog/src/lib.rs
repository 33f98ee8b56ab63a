//! Course catalog model and loading for the pathway planner.
//!
//! This crate owns the course record shape, the tolerant JSON catalog
//! document parser, and the normalization pass that cleans real-world
//! catalog data before the graph engine sees it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod course;
pub mod document;
pub mod error;
pub mod normalize;
pub mod warning;

pub use course::{Course, CourseCode};
pub use document::Catalog;
pub use error::{Error, Result};
pub use warning::Warning;
