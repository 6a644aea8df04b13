use std::collections::BTreeSet;

use axum::extract::Query;
use axum::{Json, Router, routing::get};
use diesel::prelude::*;
use tracing::instrument;

use crate::api::*;
use crate::error::ApiError;
use crate::models::Diner;
use crate::schema::diners;

use super::{AppState, db};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search-diners-json", get(search_diners))
        .route("/cities-by-state", get(cities_by_state))
}

#[utoipa::path(
    get,
    path = "/search-diners-json",
    params(
        ("city" = Option<String>, Query, description = "Substring match on city"),
        ("state" = Option<String>, Query, description = "Substring match on state"),
        ("type" = Option<String>, Query, description = "Substring match on dining interests"),
    ),
    responses(
        (status = 200, description = "Diners matching every given filter", body = [DinerSearchResult]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "diners"
)]
#[instrument]
pub async fn search_diners(
    Query(query): Query<DinerSearchQuery>,
) -> Result<Json<Vec<DinerSearchResult>>, ApiError> {
    let conn = &mut db()?;

    let mut statement = diners::table.select(Diner::as_select()).into_boxed();
    if let Some(city) = non_empty(query.city) {
        statement = statement.filter(diners::city.ilike(format!("%{city}%")));
    }
    if let Some(state) = non_empty(query.state) {
        statement = statement.filter(diners::state.ilike(format!("%{state}%")));
    }
    if let Some(interest) = non_empty(query.dining_type) {
        statement = statement.filter(diners::dining_interests.ilike(format!("%{interest}%")));
    }

    let rows = statement.load::<Diner>(conn).map_err(ApiError::database)?;
    Ok(Json(rows.into_iter().map(DinerSearchResult::from).collect()))
}

#[utoipa::path(
    get,
    path = "/cities-by-state",
    params(
        ("state" = Option<String>, Query, description = "State to list cities for, matched case-insensitively"),
    ),
    responses(
        (status = 200, description = "Distinct cities in ascending order", body = [String]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "diners"
)]
#[instrument]
pub async fn cities_by_state(
    Query(query): Query<CitiesQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Some(state) = non_empty(query.state) else {
        return Ok(Json(Vec::new()));
    };

    let conn = &mut db()?;
    let cities = diners::table
        .filter(diners::state.ilike(&state))
        .select(diners::city)
        .load::<Option<String>>(conn)
        .map_err(ApiError::database)?;

    Ok(Json(distinct_cities(cities)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Unique, non-empty cities in ascending order.
fn distinct_cities(cities: Vec<Option<String>>) -> Vec<String> {
    let unique: BTreeSet<String> = cities
        .into_iter()
        .flatten()
        .filter(|city| !city.is_empty())
        .collect();
    unique.into_iter().collect()
}
