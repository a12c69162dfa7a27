//! Ship entity model and DTOs.
//!
//! A single wire DTO ([`ShipInput`]) serves both creation and partial
//! update: every field is optional, creation requires all of them, and an
//! update applies only the fields present. JSON keys are camelCase and
//! production dates travel as epoch milliseconds, preserving the
//! registry's wire contract.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fleet_core::error::CoreError;
use fleet_core::rating::compute_rating;
use fleet_core::types::{DbId, Timestamp};
use fleet_core::validation::validate_ship;

/// Ship class. Stored as the `ship_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "ship_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    Transport,
    Military,
    Merchant,
}

/// Sort key for ship listings, always applied ascending.
///
/// A closed set so the column mapping is exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipOrder {
    Id,
    Speed,
    Date,
    Rating,
}

impl ShipOrder {
    /// Column the sort key maps to.
    pub fn column(self) -> &'static str {
        match self {
            ShipOrder::Id => "id",
            ShipOrder::Speed => "speed",
            ShipOrder::Date => "prod_date",
            ShipOrder::Rating => "rating",
        }
    }
}

/// A row from the `ships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: DbId,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: Timestamp,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

/// Wire payload for ship creation and partial update.
///
/// All fields are optional: a create must supply everything except
/// `isUsed` (which defaults to false), an update supplies only what
/// changes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipInput {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub prod_date: Option<Timestamp>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

/// A complete ship record, ready to be validated, rated, and persisted.
#[derive(Debug, Clone)]
pub struct ShipDraft {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: Timestamp,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
}

impl ShipInput {
    /// Build a creation draft. Every field except `isUsed` must be
    /// present; `isUsed` defaults to false.
    pub fn into_draft(self) -> Result<ShipDraft, CoreError> {
        Ok(ShipDraft {
            name: self.name.ok_or_else(|| missing("name"))?,
            planet: self.planet.ok_or_else(|| missing("planet"))?,
            ship_type: self.ship_type.ok_or_else(|| missing("shipType"))?,
            prod_date: self.prod_date.ok_or_else(|| missing("prodDate"))?,
            is_used: self.is_used.unwrap_or(false),
            speed: self.speed.ok_or_else(|| missing("speed"))?,
            crew_size: self.crew_size.ok_or_else(|| missing("crewSize"))?,
        })
    }

    /// Apply the present fields of this patch onto `existing`, returning
    /// the merged record. The stored row stays untouched until the merged
    /// draft has been re-validated and written back.
    pub fn merge_into(&self, existing: &Ship) -> ShipDraft {
        ShipDraft {
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            planet: self
                .planet
                .clone()
                .unwrap_or_else(|| existing.planet.clone()),
            ship_type: self.ship_type.unwrap_or(existing.ship_type),
            prod_date: self.prod_date.unwrap_or(existing.prod_date),
            is_used: self.is_used.unwrap_or(existing.is_used),
            speed: self.speed.unwrap_or(existing.speed),
            crew_size: self.crew_size.unwrap_or(existing.crew_size),
        }
    }
}

impl ShipDraft {
    /// Check every field bound. Runs on the complete record only.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_ship(
            &self.name,
            &self.planet,
            self.speed,
            self.crew_size,
            &self.prod_date,
        )
    }

    /// Derived rating for this record.
    pub fn rating(&self) -> f64 {
        compute_rating(self.speed, self.is_used, &self.prod_date)
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::Validation(format!("{field} is required"))
}

/// Optional filters for ship listing and counting.
///
/// Present fields combine with logical AND; absent fields do not
/// constrain the result. Text filters are case-sensitive substring
/// matches, range bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct ShipFilter {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub after: Option<Timestamp>,
    pub before: Option<Timestamp>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn date(year: i32) -> Timestamp {
        Utc.with_ymd_and_hms(year, 6, 15, 0, 0, 0).unwrap()
    }

    fn full_input() -> ShipInput {
        ShipInput {
            name: Some("Falcon".into()),
            planet: Some("Corellia".into()),
            ship_type: Some(ShipType::Transport),
            prod_date: Some(date(3000)),
            is_used: Some(true),
            speed: Some(0.5),
            crew_size: Some(4),
        }
    }

    fn existing_ship() -> Ship {
        Ship {
            id: 1,
            name: "Falcon".into(),
            planet: "Corellia".into(),
            ship_type: ShipType::Transport,
            prod_date: date(3000),
            is_used: false,
            speed: 0.5,
            crew_size: 4,
            rating: 2.0,
        }
    }

    // -- into_draft --

    #[test]
    fn into_draft_accepts_a_full_payload() {
        let draft = full_input().into_draft().unwrap();
        assert_eq!(draft.name, "Falcon");
        assert!(draft.is_used);
    }

    #[test]
    fn into_draft_defaults_is_used_to_false() {
        let input = ShipInput {
            is_used: None,
            ..full_input()
        };
        assert!(!input.into_draft().unwrap().is_used);
    }

    #[test]
    fn into_draft_rejects_missing_required_fields() {
        for input in [
            ShipInput {
                name: None,
                ..full_input()
            },
            ShipInput {
                planet: None,
                ..full_input()
            },
            ShipInput {
                ship_type: None,
                ..full_input()
            },
            ShipInput {
                prod_date: None,
                ..full_input()
            },
            ShipInput {
                speed: None,
                ..full_input()
            },
            ShipInput {
                crew_size: None,
                ..full_input()
            },
        ] {
            assert_matches!(input.into_draft(), Err(CoreError::Validation(_)));
        }
    }

    // -- merge_into --

    #[test]
    fn merge_applies_only_present_fields() {
        let patch = ShipInput {
            speed: Some(0.8),
            ..ShipInput::default()
        };
        let merged = patch.merge_into(&existing_ship());
        assert_eq!(merged.speed, 0.8);
        assert_eq!(merged.name, "Falcon");
        assert_eq!(merged.planet, "Corellia");
        assert_eq!(merged.ship_type, ShipType::Transport);
        assert_eq!(merged.prod_date, date(3000));
        assert!(!merged.is_used);
        assert_eq!(merged.crew_size, 4);
    }

    #[test]
    fn merge_overwrites_every_present_field() {
        let patch = ShipInput {
            name: Some("Ghost".into()),
            planet: Some("Lothal".into()),
            ship_type: Some(ShipType::Military),
            prod_date: Some(date(2900)),
            is_used: Some(true),
            speed: Some(0.9),
            crew_size: Some(7),
        };
        let merged = patch.merge_into(&existing_ship());
        assert_eq!(merged.name, "Ghost");
        assert_eq!(merged.planet, "Lothal");
        assert_eq!(merged.ship_type, ShipType::Military);
        assert_eq!(merged.prod_date, date(2900));
        assert!(merged.is_used);
        assert_eq!(merged.speed, 0.9);
        assert_eq!(merged.crew_size, 7);
    }

    #[test]
    fn empty_patch_reproduces_the_existing_record() {
        let merged = ShipInput::default().merge_into(&existing_ship());
        assert_eq!(merged.name, "Falcon");
        assert_eq!(merged.speed, 0.5);
        assert!(merged.validate().is_ok());
    }

    // -- order mapping --

    #[test]
    fn order_maps_to_columns() {
        assert_eq!(ShipOrder::Id.column(), "id");
        assert_eq!(ShipOrder::Speed.column(), "speed");
        assert_eq!(ShipOrder::Date.column(), "prod_date");
        assert_eq!(ShipOrder::Rating.column(), "rating");
    }
}
