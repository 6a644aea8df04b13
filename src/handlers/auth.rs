use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash};
use axum::{Json, Router, http::StatusCode, routing::post};
use chrono::Utc;
use diesel::result::{DatabaseErrorKind, Error::DatabaseError};
use diesel::{insert_into, prelude::*};
use tracing::instrument;
use uuid::Uuid;

use crate::api::*;
use crate::error::ApiError;
use crate::models::User;
use crate::schema::users;

use super::{AppState, db};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login-api", post(login))
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered", body = SignupResponse),
        (status = 400, description = "Missing email or password", body = ApiErrorResponse),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(payload))]
pub async fn signup(
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password required".to_string(),
        ));
    }

    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);
    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash: argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| ApiError::Database("Failed to hash password".to_string()))?
            .to_string(),
        created_at: Utc::now(),
    };

    let conn = &mut db()?;
    insert_into(users::table)
        .values(&user)
        .execute(conn)
        .map_err(insert_user_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login-api",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ApiErrorResponse),
        (status = 500, description = "Database error", body = ApiErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(payload))]
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let conn = &mut db()?;
    let user = users::table
        .filter(users::email.eq(&email))
        .select(User::as_select())
        .first(conn)
        .optional()
        .map_err(ApiError::database)?
        .ok_or(ApiError::InvalidCredentials)?;

    // An unparseable stored hash counts as a failed login, not a server error.
    let verified = PasswordHash::new(&user.password_hash)
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
        .unwrap_or(false);
    if !verified {
        return Err(ApiError::InvalidCredentials);
    }

    Ok(Json(LoginResponse { user_id: user.id }))
}

fn insert_user_error(err: diesel::result::Error) -> ApiError {
    match err {
        DatabaseError(DatabaseErrorKind::UniqueViolation, _) => ApiError::DuplicateEmail,
        other => ApiError::database(other),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::handlers::testing;

    #[test]
    fn unique_violation_maps_to_duplicate_email() {
        let err = DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"users_email_key\"".to_string()),
        );
        assert!(matches!(insert_user_error(err), ApiError::DuplicateEmail));
    }

    #[test]
    fn other_database_errors_stay_a_server_error() {
        let err = insert_user_error(diesel::result::Error::NotFound);
        assert!(matches!(err, ApiError::Database(_)));
    }

    #[test]
    fn password_hashes_verify_round_trip() {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(b"hunter2", &salt)
            .unwrap()
            .to_string();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(argon2.verify_password(b"hunter2", &parsed).is_ok());
        assert!(argon2.verify_password(b"wrong", &parsed).is_err());
    }

    #[tokio::test]
    async fn signup_requires_email_and_password() {
        for body in [
            r#"{}"#,
            r#"{"email": "owner@example.com"}"#,
            r#"{"password": "hunter2"}"#,
            r#"{"email": "", "password": "hunter2"}"#,
        ] {
            let app = router().with_state(testing::state());
            let response = app
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/signup")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["error"], "Email and password required");
        }
    }
}
