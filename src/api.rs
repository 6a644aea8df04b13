use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Diner, Offer, Restaurant};
use crate::schema::offers;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Email for the new account; must be unique
    pub email: Option<String>,
    /// Plaintext password; stored as an argon2 hash
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    /// Unique identifier for the new user
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Identifier of the authenticated user
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRestaurantRequest {
    /// Owning user
    pub user_id: Uuid,
    /// Name of the restaurant
    pub name: String,
    /// Cuisine label, e.g. "Italian"
    pub cuisine: String,
    /// City or neighborhood the restaurant serves
    pub location: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterRestaurantResponse {
    pub message: String,
    /// Unique identifier for the restaurant
    pub restaurant_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub user_id: Option<Uuid>,
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// The restaurant matching the query, if any
    pub restaurant: Option<Restaurant>,
}

#[derive(Debug, Deserialize)]
pub struct DinerSearchQuery {
    pub city: Option<String>,
    pub state: Option<String>,
    /// Substring match against the comma-separated dining interests
    #[serde(rename = "type")]
    pub dining_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DinerSearchResult {
    pub id: Uuid,
    /// Synthesized display name; falls back to the email address
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub seniority: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    /// Never null; empty string when the diner has no recorded interests
    pub dining_interests: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<Diner> for DinerSearchResult {
    fn from(diner: Diner) -> Self {
        let name = display_name(
            diner.first_name.as_deref(),
            diner.last_name.as_deref(),
            &diner.email,
        );
        DinerSearchResult {
            id: diner.id,
            name,
            first_name: diner.first_name,
            last_name: diner.last_name,
            seniority: diner.seniority,
            city: diner.city,
            state: diner.state,
            address: diner.address,
            dining_interests: diner.dining_interests.unwrap_or_default(),
            email: diner.email,
            phone: diner.phone,
        }
    }
}

fn display_name(first_name: Option<&str>, last_name: Option<&str>, email: &str) -> String {
    let full = format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    );
    let full = full.trim();
    if full.is_empty() {
        email.to_string()
    } else {
        full.to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct CitiesQuery {
    pub state: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateOfferRequest {
    /// Offer headline; defaults to "Special Offer"
    pub title: Option<String>,
    /// Last day of the promotion, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// Restaurant whose name should appear in the copy
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateOfferResponse {
    /// Generated promotional copy
    pub message: String,
    pub restaurant_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOfferRequest {
    /// Offer headline; defaults to "Special Offer"
    #[serde(alias = "offer_title")]
    pub title: Option<String>,
    /// Promotional copy emailed to each recipient
    pub message: Option<String>,
    /// Restaurant the offer belongs to
    pub restaurant_id: Option<Uuid>,
    /// Used in the email subject; defaults to "Your Restaurant"
    pub restaurant_name: Option<String>,
    /// Recipient email addresses
    #[serde(default)]
    pub recipients: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendOfferResponse {
    pub success: bool,
    pub message: String,
    /// The persisted offer row
    pub offer: Offer,
}

/// Projection served by `/offers/{restaurant_id}`.
#[derive(Queryable, Selectable, Debug, Serialize, ToSchema)]
#[diesel(table_name = offers)]
pub struct OfferSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub recipient_count: i32,
}

/// Sample endpoints return the rows when there are any, and a message
/// object when the table is empty.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum TableSample<T> {
    Rows(Vec<T>),
    Empty { message: String },
}

impl<T> TableSample<T> {
    pub fn new(rows: Vec<T>, empty_message: &str) -> Self {
        if rows.is_empty() {
            TableSample::Empty {
                message: empty_message.to_string(),
            }
        } else {
            TableSample::Rows(rows)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diner(first: Option<&str>, last: Option<&str>, interests: Option<&str>) -> Diner {
        Diner {
            id: Uuid::new_v4(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            seniority: None,
            city: Some("Austin".into()),
            state: Some("TX".into()),
            address: None,
            dining_interests: interests.map(String::from),
            email: "diner@example.com".into(),
            phone: None,
        }
    }

    #[test]
    fn search_result_synthesizes_a_name() {
        let result = DinerSearchResult::from(diner(Some("Alice"), Some("Nguyen"), None));
        assert_eq!(result.name, "Alice Nguyen");

        let result = DinerSearchResult::from(diner(Some("Alice"), None, None));
        assert_eq!(result.name, "Alice");

        let result = DinerSearchResult::from(diner(None, None, None));
        assert_eq!(result.name, "diner@example.com");
    }

    #[test]
    fn search_result_never_has_null_interests() {
        let result = DinerSearchResult::from(diner(None, None, None));
        assert_eq!(result.dining_interests, "");

        let result = DinerSearchResult::from(diner(None, None, Some("bbq, vegan")));
        assert_eq!(result.dining_interests, "bbq, vegan");
    }

    #[test]
    fn send_offer_request_accepts_the_offer_title_alias() {
        let request: SendOfferRequest =
            serde_json::from_str(r#"{"offer_title": "Two for one", "recipients": []}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("Two for one"));
        assert!(request.recipients.is_empty());

        let request: SendOfferRequest = serde_json::from_str(r#"{"title": "Two for one"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("Two for one"));
    }

    #[test]
    fn table_sample_serializes_rows_as_a_bare_array() {
        let sample = TableSample::new(vec![1, 2, 3], "No numbers found");
        assert_eq!(serde_json::to_value(&sample).unwrap(), serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn table_sample_serializes_empty_as_a_message_object() {
        let sample = TableSample::<i32>::new(vec![], "No numbers found");
        assert_eq!(
            serde_json::to_value(&sample).unwrap(),
            serde_json::json!({"message": "No numbers found"})
        );
    }
}
