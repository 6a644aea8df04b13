use std::env;

use diesel::{Connection, ConnectionResult, PgConnection};
use dotenvy::dotenv;

pub mod api;
pub mod app;
pub mod error;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod promo;
pub mod schema;

/// Opens a fresh Postgres connection. `DATABASE_URL` must be set.
pub fn establish_connection() -> ConnectionResult<PgConnection> {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&database_url)
}
