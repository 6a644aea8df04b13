use axum::{Json, Router, routing::get};
use diesel::prelude::*;
use tracing::instrument;

use crate::api::*;
use crate::error::ApiError;
use crate::models::{Diner, Offer, OfferRecipient, Restaurant, User};
use crate::schema::{diners, offer_recipients, offers, restaurants, users};

use super::{AppState, db};

/// How many rows each table sample returns at most.
const SAMPLE_LIMIT: i64 = 5;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(sample_users))
        .route("/restaurants", get(sample_restaurants))
        .route("/diners", get(sample_diners))
        .route("/offers", get(sample_offers))
        .route("/offer_recipients", get(sample_offer_recipients))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "First users, or a message when the table is empty", body = TableSample<User>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "samples"
)]
#[instrument]
pub async fn sample_users() -> Result<Json<TableSample<User>>, ApiError> {
    let conn = &mut db()?;
    let rows = users::table
        .limit(SAMPLE_LIMIT)
        .select(User::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(TableSample::new(rows, "No users found")))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "First restaurants, or a message when the table is empty", body = TableSample<Restaurant>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "samples"
)]
#[instrument]
pub async fn sample_restaurants() -> Result<Json<TableSample<Restaurant>>, ApiError> {
    let conn = &mut db()?;
    let rows = restaurants::table
        .limit(SAMPLE_LIMIT)
        .select(Restaurant::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(TableSample::new(rows, "No restaurants found")))
}

#[utoipa::path(
    get,
    path = "/diners",
    responses(
        (status = 200, description = "First diners, or a message when the table is empty", body = TableSample<Diner>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "samples"
)]
#[instrument]
pub async fn sample_diners() -> Result<Json<TableSample<Diner>>, ApiError> {
    let conn = &mut db()?;
    let rows = diners::table
        .limit(SAMPLE_LIMIT)
        .select(Diner::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(TableSample::new(rows, "No diners found")))
}

#[utoipa::path(
    get,
    path = "/offers",
    responses(
        (status = 200, description = "First offers, or a message when the table is empty", body = TableSample<Offer>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "samples"
)]
#[instrument]
pub async fn sample_offers() -> Result<Json<TableSample<Offer>>, ApiError> {
    let conn = &mut db()?;
    let rows = offers::table
        .limit(SAMPLE_LIMIT)
        .select(Offer::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(TableSample::new(rows, "No offers found")))
}

#[utoipa::path(
    get,
    path = "/offer_recipients",
    responses(
        (status = 200, description = "First offer recipients, or a message when the table is empty", body = TableSample<OfferRecipient>),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "samples"
)]
#[instrument]
pub async fn sample_offer_recipients() -> Result<Json<TableSample<OfferRecipient>>, ApiError> {
    let conn = &mut db()?;
    let rows = offer_recipients::table
        .limit(SAMPLE_LIMIT)
        .select(OfferRecipient::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(TableSample::new(rows, "No offer recipients found")))
}
