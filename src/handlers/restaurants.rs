use axum::extract::Query;
use axum::{
    Json, Router,
    routing::{get, post},
};
use diesel::{insert_into, prelude::*};
use tracing::instrument;
use uuid::Uuid;

use crate::api::*;
use crate::error::ApiError;
use crate::models::Restaurant;
use crate::schema::restaurants;

use super::{AppState, db};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register-restaurant-api", post(register_restaurant))
        .route("/dashboard", get(dashboard))
}

#[utoipa::path(
    post,
    path = "/register-restaurant-api",
    request_body = RegisterRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant registered", body = RegisterRestaurantResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(payload))]
pub async fn register_restaurant(
    Json(payload): Json<RegisterRestaurantRequest>,
) -> Result<Json<RegisterRestaurantResponse>, ApiError> {
    let restaurant = Restaurant {
        id: Uuid::new_v4(),
        user_id: payload.user_id,
        name: payload.name,
        cuisine: payload.cuisine,
        location: payload.location,
    };

    let conn = &mut db()?;
    insert_into(restaurants::table)
        .values(&restaurant)
        .execute(conn)
        .map_err(ApiError::database)?;

    Ok(Json(RegisterRestaurantResponse {
        message: "Restaurant registered successfully!".to_string(),
        restaurant_id: restaurant.id,
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    params(
        ("restaurant_id" = Option<Uuid>, Query, description = "Look up the restaurant directly"),
        ("user_id" = Option<Uuid>, Query, description = "Look up the restaurant by owner"),
    ),
    responses(
        (status = 200, description = "Restaurant for the dashboard, if any", body = DashboardResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "restaurants"
)]
#[instrument]
pub async fn dashboard(
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    // restaurant_id wins when both parameters are present
    let restaurant = if let Some(restaurant_id) = query.restaurant_id {
        let conn = &mut db()?;
        restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::database)?
    } else if let Some(user_id) = query.user_id {
        let conn = &mut db()?;
        restaurants::table
            .filter(restaurants::user_id.eq(user_id))
            .select(Restaurant::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::database)?
    } else {
        None
    };

    Ok(Json(DashboardResponse { restaurant }))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::testing;

    #[tokio::test]
    async fn dashboard_without_parameters_has_no_restaurant() {
        let app = router().with_state(testing::state());
        let response = app
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"restaurant": null}));
    }
}
