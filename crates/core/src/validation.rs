//! Field validation for ship records.
//!
//! Validation always runs on a complete record: a create payload must
//! already carry every required field, and a partial update is first
//! merged onto the stored record. Any single failing bound rejects the
//! whole record.

use crate::error::CoreError;
use crate::rating::prod_year;
use crate::types::Timestamp;

/// Maximum length of the `name` and `planet` fields, in characters.
pub const MAX_TEXT_LEN: usize = 50;

/// Inclusive lower speed bound.
pub const MIN_SPEED: f64 = 0.10;
/// Inclusive upper speed bound.
pub const MAX_SPEED: f64 = 0.99;

/// Inclusive lower crew size bound.
pub const MIN_CREW_SIZE: i32 = 1;
/// Inclusive upper crew size bound.
pub const MAX_CREW_SIZE: i32 = 9999;

/// Inclusive lower production year bound.
pub const MIN_PROD_YEAR: i32 = 2800;
/// Inclusive upper production year bound.
pub const MAX_PROD_YEAR: i32 = 3019;

/// Validate a complete ship record against the registry's field bounds.
pub fn validate_ship(
    name: &str,
    planet: &str,
    speed: f64,
    crew_size: i32,
    prod_date: &Timestamp,
) -> Result<(), CoreError> {
    validate_text("name", name)?;
    validate_text("planet", planet)?;

    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(CoreError::Validation(format!(
            "speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
        )));
    }
    if !(MIN_CREW_SIZE..=MAX_CREW_SIZE).contains(&crew_size) {
        return Err(CoreError::Validation(format!(
            "crewSize must be between {MIN_CREW_SIZE} and {MAX_CREW_SIZE}, got {crew_size}"
        )));
    }

    let year = prod_year(prod_date);
    if !(MIN_PROD_YEAR..=MAX_PROD_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "prodDate year must be between {MIN_PROD_YEAR} and {MAX_PROD_YEAR}, got {year}"
        )));
    }

    Ok(())
}

fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
