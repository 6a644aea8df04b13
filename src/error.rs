use axum::{http::StatusCode, response::Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("This email is already registered.")]
    DuplicateEmail,
    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    pub fn database(err: impl std::fmt::Display) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn statuses_follow_the_error_contract() {
        let cases = [
            (
                ApiError::Validation("Email and password required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ApiError::DuplicateEmail, StatusCode::CONFLICT),
            (
                ApiError::Database("connection refused".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn duplicate_email_message_is_stable() {
        assert_eq!(
            ApiError::DuplicateEmail.to_string(),
            "This email is already registered."
        );
    }
}
