use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::{diners, offer_recipients, offers, restaurants, users};

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, ToSchema, Debug, PartialEq)]
#[diesel(table_name = users)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 hash; never serialized into a response.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, ToSchema, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cuisine: String,
    pub location: String,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, ToSchema, Debug, PartialEq)]
#[diesel(table_name = diners)]
pub struct Diner {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub seniority: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    /// Comma-separated interest labels, e.g. "italian, vegan".
    pub dining_interests: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, ToSchema, Debug, PartialEq)]
#[diesel(table_name = offers)]
pub struct Offer {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub title: String,
    pub message: String,
    pub recipient_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Serialize, ToSchema, Debug, PartialEq)]
#[diesel(table_name = offer_recipients, primary_key(offer_id, email))]
pub struct OfferRecipient {
    pub offer_id: Uuid,
    pub email: String,
}
