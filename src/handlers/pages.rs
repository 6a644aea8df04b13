use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect};
use axum::{Router, routing::get};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/signup-page", get(signup_page))
        .route("/login-page", get(login_page))
        .route("/register-restaurant", get(register_restaurant_page))
        .route("/search-diners", get(search_diners_page))
        .route("/logout", get(logout))
}

pub async fn home_page() -> Html<&'static str> {
    Html(include_str!("../../static/home.html"))
}

pub async fn signup_page() -> Html<&'static str> {
    Html(include_str!("../../static/signup.html"))
}

pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("../../static/login.html"))
}

pub async fn register_restaurant_page() -> Html<&'static str> {
    Html(include_str!("../../static/register_restaurant.html"))
}

pub async fn search_diners_page() -> Html<&'static str> {
    Html(include_str!("../../static/search_diners.html"))
}

/// Expires the browser session cookie and returns to the landing page.
pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, "session=; Path=/; Max-Age=0")],
        Redirect::to("/"),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::testing;

    #[tokio::test]
    async fn every_page_serves_html() {
        for uri in [
            "/",
            "/signup-page",
            "/login-page",
            "/register-restaurant",
            "/search-diners",
        ] {
            let app = router().with_state(testing::state());
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "text/html; charset=utf-8",
                "uri: {uri}"
            );
        }
    }

    #[tokio::test]
    async fn logout_expires_the_session_and_goes_home() {
        let app = router().with_state(testing::state());
        let response = app
            .oneshot(Request::builder().uri("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(
            response.headers()[header::SET_COOKIE],
            "session=; Path=/; Max-Age=0"
        );
    }
}
