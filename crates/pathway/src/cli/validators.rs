//! Input validation for CLI arguments.

/// Maximum accepted course code length. Ontario codes are 5-6 characters;
/// user-defined courses get some slack.
const MAX_CODE_LENGTH: usize = 16;

/// Parse and normalize a user-typed course code.
///
/// Codes are trimmed and uppercased before any catalog lookup, so `eng4u`
/// and `ENG4U` address the same course.
///
/// # Errors
///
/// Returns a message suitable for clap when the code is empty, too long,
/// or contains whitespace.
pub fn parse_course_code(raw: &str) -> Result<String, String> {
    let code = raw.trim().to_uppercase();
    if code.is_empty() {
        return Err("course code cannot be empty".to_string());
    }
    if code.len() > MAX_CODE_LENGTH {
        return Err(format!(
            "course code cannot exceed {MAX_CODE_LENGTH} characters"
        ));
    }
    if code.chars().any(char::is_whitespace) {
        return Err("course code cannot contain whitespace".to_string());
    }
    Ok(code)
}
