//! Derived ship rating.
//!
//! The registry scores every ship at write time from its speed, used flag,
//! and production year. The score is recomputed on every create and every
//! update; clients never supply it.

use chrono::Datelike;

use crate::types::Timestamp;

/// Fixed reference year of the registry's era. Ratings are computed
/// against this constant, never against wall-clock time.
pub const REFERENCE_YEAR: i32 = 3019;

/// Multiplier applied to the speed of a previously used ship.
pub const USED_COEFFICIENT: f64 = 0.5;

/// Calendar year of a production date.
pub fn prod_year(prod_date: &Timestamp) -> i32 {
    prod_date.year()
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute the rating of a ship.
///
/// `rating = round2(80 * speed * k / (REFERENCE_YEAR - prodYear + 1))`
/// where `k` is [`USED_COEFFICIENT`] for used ships and 1.0 otherwise.
pub fn compute_rating(speed: f64, is_used: bool, prod_date: &Timestamp) -> f64 {
    let coefficient = if is_used { USED_COEFFICIENT } else { 1.0 };
    let age = (REFERENCE_YEAR - prod_year(prod_date) + 1) as f64;
    round2(80.0 * speed * coefficient / age)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
