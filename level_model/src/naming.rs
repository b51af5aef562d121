//! The naming constraint shared by every free-text identifier.
//!
//! Level names, descriptions and unit/plant type names may only contain ASCII
//! letters, digits, space and `_.!?-`. Offending text is rejected, never
//! truncated or escaped.

use crate::error::{Result, ValidationError};

const PUNCTUATION: &[char] = &[' ', '_', '.', '!', '?', '-'];

/// Check a single character against the naming constraint.
pub fn is_permitted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || PUNCTUATION.contains(&c)
}

/// Check whole text; empty text is not a valid name.
pub fn is_permitted_name(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_permitted_char)
}

/// Validate `value` as the named field.
pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if !value.chars().all(is_permitted_char) {
        return Err(ValidationError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate every entry of a list of names.
pub fn validate_names<S: AsRef<str>>(field: &'static str, values: &[S]) -> Result<()> {
    values
        .iter()
        .try_for_each(|value| validate_name(field, value.as_ref()))
}
