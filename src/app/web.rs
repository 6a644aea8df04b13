use std::env;

use axum::Router;
use diesel_migrations::MigrationHarness;
use lettre::message::Mailbox;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::establish_connection;
use crate::handlers::{
    ApiDoc, AppState, auth_router, diners_router, offers_router, pages_router, restaurants_router,
    samples_router,
};
use crate::mailer::OfferMailer;
use crate::promo::OfferComposer;

use super::MIGRATIONS;

pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut conn = establish_connection()?;
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    drop(conn);

    let state = if demo_enabled(env::var("DEMO_MODE").ok().as_deref()) {
        info!("demo mode: offers are composed locally and emails are only logged");
        AppState {
            mailer: OfferMailer::Demo,
            composer: OfferComposer::Canned,
        }
    } else {
        let relay = env::var("SMTP_RELAY").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let username = env::var("SMTP_USERNAME").expect("SMTP_USERNAME required");
        let password = env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD required");
        let api_key = env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY required");
        let from: Mailbox = username
            .parse()
            .expect("SMTP_USERNAME must be a mailbox address");
        AppState {
            mailer: OfferMailer::smtp(&relay, username, password, from)?,
            composer: OfferComposer::OpenAi {
                client: reqwest::Client::new(),
                api_key,
            },
        }
    };

    let app = Router::new()
        .merge(pages_router())
        .merge(auth_router())
        .merge(restaurants_router())
        .merge(diners_router())
        .merge(offers_router())
        .merge(samples_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    info!("PromoCast listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Demo mode stays on unless DEMO_MODE is explicitly turned off.
fn demo_enabled(value: Option<&str>) -> bool {
    match value {
        Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0"),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_mode_defaults_on() {
        assert!(demo_enabled(None));
        assert!(demo_enabled(Some("true")));
        assert!(demo_enabled(Some("1")));
        assert!(demo_enabled(Some("anything")));
    }

    #[test]
    fn demo_mode_turns_off_explicitly() {
        assert!(!demo_enabled(Some("false")));
        assert!(!demo_enabled(Some("FALSE")));
        assert!(!demo_enabled(Some("0")));
        assert!(!demo_enabled(Some(" false ")));
    }
}
