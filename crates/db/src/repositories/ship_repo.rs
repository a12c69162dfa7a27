//! Repository for the `ships` table.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use fleet_core::types::DbId;

use crate::models::ship::{Ship, ShipDraft, ShipFilter, ShipOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, planet, ship_type, prod_date, is_used, speed, crew_size, rating";

/// Provides CRUD and filtered-scan operations for ships.
pub struct ShipRepo;

impl ShipRepo {
    /// Insert a new ship, returning the created row.
    pub async fn create(
        pool: &PgPool,
        draft: &ShipDraft,
        rating: f64,
    ) -> Result<Ship, sqlx::Error> {
        let query = format!(
            "INSERT INTO ships \
                (name, planet, ship_type, prod_date, is_used, speed, crew_size, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ship>(&query)
            .bind(&draft.name)
            .bind(&draft.planet)
            .bind(draft.ship_type)
            .bind(draft.prod_date)
            .bind(draft.is_used)
            .bind(draft.speed)
            .bind(draft.crew_size)
            .bind(rating)
            .fetch_one(pool)
            .await
    }

    /// Find a ship by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ships WHERE id = $1");
        sqlx::query_as::<_, Ship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every ship matching the filter, optionally sorted ascending by
    /// the given key. No limit is applied; the caller slices the page out
    /// of the full matching set.
    pub async fn list_by_filter(
        pool: &PgPool,
        filter: &ShipFilter,
        order: Option<ShipOrder>,
    ) -> Result<Vec<Ship>, sqlx::Error> {
        let where_clause = filter_where_clause(filter);
        let order_clause = match order {
            Some(order) => format!(" ORDER BY {} ASC", order.column()),
            None => String::new(),
        };
        let query = format!("SELECT {COLUMNS} FROM ships {where_clause}{order_clause}");
        bind_filter(sqlx::query_as::<_, Ship>(&query), filter)
            .fetch_all(pool)
            .await
    }

    /// Count the ships matching the filter.
    pub async fn count_by_filter(pool: &PgPool, filter: &ShipFilter) -> Result<i64, sqlx::Error> {
        let where_clause = filter_where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM ships {where_clause}");
        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&query), filter)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Overwrite every mutable field of a ship with the merged record.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        draft: &ShipDraft,
        rating: f64,
    ) -> Result<Option<Ship>, sqlx::Error> {
        let query = format!(
            "UPDATE ships SET \
                name = $2, planet = $3, ship_type = $4, prod_date = $5, \
                is_used = $6, speed = $7, crew_size = $8, rating = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ship>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.planet)
            .bind(draft.ship_type)
            .bind(draft.prod_date)
            .bind(draft.is_used)
            .bind(draft.speed)
            .bind(draft.crew_size)
            .bind(rating)
            .fetch_optional(pool)
            .await
    }

    /// Delete a ship by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Filter clause construction
// ---------------------------------------------------------------------------

/// Build the WHERE clause for the present filter fields.
///
/// Placeholders are numbered in the order [`bind_filter`] binds them; the
/// two functions must stay in lockstep.
fn filter_where_clause(filter: &ShipFilter) -> String {
    let mut conditions: Vec<String> = Vec::new();
    let mut param_idx: usize = 0;

    if filter.name.is_some() {
        param_idx += 1;
        conditions.push(format!("name LIKE ${param_idx}"));
    }
    if filter.planet.is_some() {
        param_idx += 1;
        conditions.push(format!("planet LIKE ${param_idx}"));
    }
    if filter.ship_type.is_some() {
        param_idx += 1;
        conditions.push(format!("ship_type = ${param_idx}"));
    }
    if filter.after.is_some() {
        param_idx += 1;
        conditions.push(format!("prod_date >= ${param_idx}"));
    }
    if filter.before.is_some() {
        param_idx += 1;
        conditions.push(format!("prod_date <= ${param_idx}"));
    }
    if filter.is_used.is_some() {
        param_idx += 1;
        conditions.push(format!("is_used = ${param_idx}"));
    }
    if filter.min_speed.is_some() {
        param_idx += 1;
        conditions.push(format!("speed >= ${param_idx}"));
    }
    if filter.max_speed.is_some() {
        param_idx += 1;
        conditions.push(format!("speed <= ${param_idx}"));
    }
    if filter.min_crew_size.is_some() {
        param_idx += 1;
        conditions.push(format!("crew_size >= ${param_idx}"));
    }
    if filter.max_crew_size.is_some() {
        param_idx += 1;
        conditions.push(format!("crew_size <= ${param_idx}"));
    }
    if filter.min_rating.is_some() {
        param_idx += 1;
        conditions.push(format!("rating >= ${param_idx}"));
    }
    if filter.max_rating.is_some() {
        param_idx += 1;
        conditions.push(format!("rating <= ${param_idx}"));
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Bind the present filter values in the order [`filter_where_clause`]
/// numbered them. Generic over the output row so the list and count
/// queries share one implementation.
fn bind_filter<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    filter: &'q ShipFilter,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    if let Some(ref name) = filter.name {
        q = q.bind(format!("%{name}%"));
    }
    if let Some(ref planet) = filter.planet {
        q = q.bind(format!("%{planet}%"));
    }
    if let Some(ship_type) = filter.ship_type {
        q = q.bind(ship_type);
    }
    if let Some(after) = filter.after {
        q = q.bind(after);
    }
    if let Some(before) = filter.before {
        q = q.bind(before);
    }
    if let Some(is_used) = filter.is_used {
        q = q.bind(is_used);
    }
    if let Some(min_speed) = filter.min_speed {
        q = q.bind(min_speed);
    }
    if let Some(max_speed) = filter.max_speed {
        q = q.bind(max_speed);
    }
    if let Some(min_crew_size) = filter.min_crew_size {
        q = q.bind(min_crew_size);
    }
    if let Some(max_crew_size) = filter.max_crew_size {
        q = q.bind(max_crew_size);
    }
    if let Some(min_rating) = filter.min_rating {
        q = q.bind(min_rating);
    }
    if let Some(max_rating) = filter.max_rating {
        q = q.bind(max_rating);
    }
    q
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
