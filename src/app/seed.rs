use std::error::Error;
use std::path::Path;

use diesel::{insert_into, prelude::*};
use diesel_migrations::MigrationHarness;
use serde::Deserialize;
use uuid::Uuid;

use crate::establish_connection;
use crate::models::Diner;
use crate::schema::diners;

use super::MIGRATIONS;

/// One row of the diner spreadsheet export.
#[derive(Debug, Deserialize)]
struct DinerRecord {
    #[serde(rename = "First Name")]
    first_name: Option<String>,
    #[serde(rename = "Last Name")]
    last_name: Option<String>,
    #[serde(rename = "Seniority")]
    seniority: Option<String>,
    #[serde(rename = "City")]
    city: Option<String>,
    #[serde(rename = "State")]
    state: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
    #[serde(rename = "Dining Interests")]
    dining_interests: Option<String>,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone")]
    phone: Option<String>,
}

impl From<DinerRecord> for Diner {
    fn from(record: DinerRecord) -> Self {
        Diner {
            id: Uuid::new_v4(),
            first_name: blank_to_none(record.first_name),
            last_name: blank_to_none(record.last_name),
            seniority: blank_to_none(record.seniority),
            city: blank_to_none(record.city),
            state: blank_to_none(record.state),
            address: blank_to_none(record.address),
            dining_interests: blank_to_none(record.dining_interests),
            email: record.email,
            phone: blank_to_none(record.phone),
        }
    }
}

/// Spreadsheet exports encode missing cells as empty strings.
fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn main(path: &Path) -> Result<(), Box<dyn Error>> {
    let conn = &mut establish_connection()?;
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let record: DinerRecord = record?;
        rows.push(Diner::from(record));
    }

    insert_into(diners::table).values(&rows).execute(conn)?;

    println!("✅ Seeded {} diners successfully!", rows.len());
    Ok(())
}
