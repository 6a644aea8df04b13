use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use chrono::Utc;
use diesel::{insert_into, prelude::*};
use tracing::instrument;
use uuid::Uuid;

use crate::api::*;
use crate::error::ApiError;
use crate::models::{Offer, OfferRecipient};
use crate::schema::{offer_recipients, offers, restaurants};

use super::{AppState, db};

const DEFAULT_TITLE: &str = "Special Offer";
const DEFAULT_RESTAURANT_NAME: &str = "Your Restaurant";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-ai-offer", post(generate_ai_offer))
        .route("/send-offer", post(send_offer))
        .route("/offers/{restaurant_id}", get(offers_by_restaurant))
}

#[utoipa::path(
    post,
    path = "/generate-ai-offer",
    request_body = GenerateOfferRequest,
    responses(
        (status = 200, description = "Promotional copy for the offer", body = GenerateOfferResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "offers"
)]
#[instrument(skip(state))]
pub async fn generate_ai_offer(
    State(state): State<AppState>,
    Json(payload): Json<GenerateOfferRequest>,
) -> Result<Json<GenerateOfferResponse>, ApiError> {
    let title = payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let end_date = payload.end_date.unwrap_or_default();

    let restaurant_name = match payload.restaurant_id {
        Some(restaurant_id) => {
            let conn = &mut db()?;
            restaurants::table
                .find(restaurant_id)
                .select(restaurants::name)
                .first::<String>(conn)
                .optional()
                .map_err(ApiError::database)?
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_RESTAURANT_NAME.to_string())
        }
        None => DEFAULT_RESTAURANT_NAME.to_string(),
    };

    let message = state
        .composer
        .compose(&restaurant_name, &title, &end_date)
        .await;

    Ok(Json(GenerateOfferResponse {
        message,
        restaurant_name,
    }))
}

#[utoipa::path(
    post,
    path = "/send-offer",
    request_body = SendOfferRequest,
    responses(
        (status = 200, description = "Offer persisted and emails dispatched", body = SendOfferResponse),
        (status = 400, description = "Missing restaurant, fields, or recipients", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "offers"
)]
#[instrument(skip(state, payload))]
pub async fn send_offer(
    State(state): State<AppState>,
    Json(payload): Json<SendOfferRequest>,
) -> Result<Json<SendOfferResponse>, ApiError> {
    let title = payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let message = payload.message.unwrap_or_default();
    let restaurant_name = payload
        .restaurant_name
        .unwrap_or_else(|| DEFAULT_RESTAURANT_NAME.to_string());

    let Some(restaurant_id) = payload.restaurant_id else {
        return Err(ApiError::Validation("Restaurant ID missing".to_string()));
    };
    let recipients = dedup_recipients(payload.recipients);
    if title.is_empty() || message.is_empty() || recipients.is_empty() {
        return Err(ApiError::Validation(
            "Please fill all fields and select diners".to_string(),
        ));
    }

    let offer = Offer {
        id: Uuid::new_v4(),
        restaurant_id,
        title,
        message,
        recipient_count: recipients.len() as i32,
        created_at: Utc::now(),
    };
    let rows: Vec<OfferRecipient> = recipients
        .iter()
        .map(|email| OfferRecipient {
            offer_id: offer.id,
            email: email.clone(),
        })
        .collect();

    let conn = &mut db()?;
    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        insert_into(offers::table).values(&offer).execute(conn)?;
        insert_into(offer_recipients::table)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    })
    .map_err(ApiError::database)?;

    let subject = format!("{restaurant_name} - {}", offer.title);
    state
        .mailer
        .broadcast(&subject, &offer.message, &recipients)
        .await;

    Ok(Json(SendOfferResponse {
        success: true,
        message: "Offer saved successfully! (Emails sent in live mode)".to_string(),
        offer,
    }))
}

#[utoipa::path(
    get,
    path = "/offers/{restaurant_id}",
    params(
        ("restaurant_id" = Uuid, Path, description = "Restaurant to list offers for"),
    ),
    responses(
        (status = 200, description = "Offer summaries, newest first", body = [OfferSummary]),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "offers"
)]
#[instrument]
pub async fn offers_by_restaurant(
    Path(restaurant_id): Path<Uuid>,
) -> Result<Json<Vec<OfferSummary>>, ApiError> {
    let conn = &mut db()?;
    let summaries = offers::table
        .filter(offers::restaurant_id.eq(restaurant_id))
        .order(offers::created_at.desc())
        .select(OfferSummary::as_select())
        .load(conn)
        .map_err(ApiError::database)?;
    Ok(Json(summaries))
}

/// First occurrence wins; the stored recipient count is the deduplicated one.
fn dedup_recipients(recipients: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    recipients
        .into_iter()
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
