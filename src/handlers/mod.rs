pub mod auth;
pub mod diners;
pub mod offers;
pub mod pages;
pub mod restaurants;
pub mod samples;

// Re-export routers for easier importing
pub use auth::router as auth_router;
pub use diners::router as diners_router;
pub use offers::router as offers_router;
pub use pages::router as pages_router;
pub use restaurants::router as restaurants_router;
pub use samples::router as samples_router;

use diesel::PgConnection;
use utoipa::OpenApi;

use crate::error::ApiError;
use crate::mailer::OfferMailer;
use crate::promo::OfferComposer;

#[derive(Clone)]
pub struct AppState {
    pub mailer: OfferMailer,
    pub composer: OfferComposer,
}

// Shared utility functions
pub(crate) fn db() -> Result<PgConnection, ApiError> {
    crate::establish_connection().map_err(ApiError::database)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::login,
        restaurants::register_restaurant,
        restaurants::dashboard,
        diners::search_diners,
        diners::cities_by_state,
        offers::generate_ai_offer,
        offers::send_offer,
        offers::offers_by_restaurant,
        samples::sample_users,
        samples::sample_restaurants,
        samples::sample_diners,
        samples::sample_offers,
        samples::sample_offer_recipients,
    ),
    components(
        schemas(
            crate::api::SignupRequest,
            crate::api::SignupResponse,
            crate::api::LoginRequest,
            crate::api::LoginResponse,
            crate::api::RegisterRestaurantRequest,
            crate::api::RegisterRestaurantResponse,
            crate::api::DashboardResponse,
            crate::api::DinerSearchResult,
            crate::api::GenerateOfferRequest,
            crate::api::GenerateOfferResponse,
            crate::api::SendOfferRequest,
            crate::api::SendOfferResponse,
            crate::api::OfferSummary,
            crate::api::ApiErrorResponse,
            crate::models::User,
            crate::models::Restaurant,
            crate::models::Diner,
            crate::models::Offer,
            crate::models::OfferRecipient,
            crate::api::TableSample<crate::models::User>,
            crate::api::TableSample<crate::models::Restaurant>,
            crate::api::TableSample<crate::models::Diner>,
            crate::api::TableSample<crate::models::Offer>,
            crate::api::TableSample<crate::models::OfferRecipient>,
        )
    ),
    tags(
        (name = "auth", description = "Account registration and login"),
        (name = "restaurants", description = "Restaurant registration and dashboard data"),
        (name = "diners", description = "Diner search endpoints"),
        (name = "offers", description = "Offer generation and delivery"),
        (name = "samples", description = "Table sample endpoints")
    ),
    info(
        title = "PromoCast API",
        description = "Backend for restaurant promotion campaigns",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
pub(crate) mod testing {
    use super::AppState;
    use crate::mailer::OfferMailer;
    use crate::promo::OfferComposer;

    pub(crate) fn state() -> AppState {
        AppState {
            mailer: OfferMailer::Demo,
            composer: OfferComposer::Canned,
        }
    }
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn sample_responses_document_rows_and_empty_message_shapes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let schema = &doc["paths"]["/users"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        let schema = match schema["$ref"].as_str() {
            Some(reference) => {
                let name = reference.rsplit('/').next().unwrap();
                &doc["components"]["schemas"][name]
            }
            None => schema,
        };

        let shapes = schema["oneOf"]
            .as_array()
            .expect("a table sample is either rows or a message object");
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().any(|shape| shape["type"] == "array"));
        assert!(
            shapes
                .iter()
                .any(|shape| shape["properties"]["message"]["type"] == "string")
        );
    }
}
