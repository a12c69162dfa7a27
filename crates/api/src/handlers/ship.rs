//! Handlers for the `/ships` resource.
//!
//! Orchestrates validation, rating computation, pagination, and the
//! repository calls. Query parameters and JSON bodies are camelCase;
//! `after`/`before` and `prodDate` travel as epoch milliseconds.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::DateTime;
use serde::Deserialize;

use fleet_core::error::CoreError;
use fleet_core::paging::{page_slice, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use fleet_core::types::{DbId, Timestamp};
use fleet_db::models::ship::{Ship, ShipFilter, ShipInput, ShipOrder, ShipType};
use fleet_db::repositories::ShipRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters accepted by the list and count endpoints.
///
/// `order`, `pageNumber`, and `pageSize` are ignored by count.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipQuery {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub order: Option<ShipOrder>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ShipQuery {
    /// Convert the wire parameters into a repository filter.
    fn filter(&self) -> AppResult<ShipFilter> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self
                .after
                .map(|ms| millis_to_timestamp("after", ms))
                .transpose()?,
            before: self
                .before
                .map(|ms| millis_to_timestamp("before", ms))
                .transpose()?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

/// Convert an epoch-milliseconds bound into a UTC timestamp.
fn millis_to_timestamp(field: &str, millis: i64) -> Result<Timestamp, AppError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::BadRequest(format!("{field} is out of range")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /rest/ships
///
/// The full filtered set is fetched sorted, then the requested page is
/// sliced out in memory. A page past the end of the data is empty, not an
/// error.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ShipQuery>,
) -> AppResult<Json<Vec<Ship>>> {
    let filter = params.filter()?;
    let ships = ShipRepo::list_by_filter(&state.pool, &filter, params.order).await?;

    let page_number = params.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    Ok(Json(page_slice(ships, page_number, page_size)))
}

/// GET /rest/ships/count
///
/// Same filters as the listing; sort and paging are ignored. Returns the
/// bare total.
pub async fn count(
    State(state): State<AppState>,
    Query(params): Query<ShipQuery>,
) -> AppResult<Json<i64>> {
    let filter = params.filter()?;
    let total = ShipRepo::count_by_filter(&state.pool, &filter).await?;
    Ok(Json(total))
}

/// POST /rest/ships
///
/// Creates a ship from a full payload. `isUsed` defaults to false; the
/// payload is validated as-is and the rating computed before persisting.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ShipInput>, JsonRejection>,
) -> AppResult<Json<Ship>> {
    let Json(input) = payload.map_err(bad_body)?;
    let draft = input.into_draft()?;
    draft.validate()?;

    let rating = draft.rating();
    let ship = ShipRepo::create(&state.pool, &draft, rating).await?;
    Ok(Json(ship))
}

/// GET /rest/ships/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ship>> {
    check_id(id)?;
    let ship = ShipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ship", id }))?;
    Ok(Json(ship))
}

/// POST /rest/ships/{id}
///
/// Partial update: fields present in the payload overwrite the stored
/// record, the merged result is re-validated and re-rated, and only then
/// written back.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<ShipInput>, JsonRejection>,
) -> AppResult<Json<Ship>> {
    check_id(id)?;
    let Json(input) = payload.map_err(bad_body)?;

    let existing = ShipRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ship", id }))?;

    let draft = input.merge_into(&existing);
    draft.validate()?;

    let rating = draft.rating();
    let ship = ShipRepo::update(&state.pool, id, &draft, rating)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Ship", id }))?;
    Ok(Json(ship))
}

/// DELETE /rest/ships/{id}
///
/// Returns 200 with no body.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<()> {
    check_id(id)?;
    let deleted = ShipRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Ship", id }));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Ids are positive; anything else is rejected before any lookup.
fn check_id(id: DbId) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!(
            "id must be positive, got {id}"
        )));
    }
    Ok(())
}

fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
