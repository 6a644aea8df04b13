use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub mod seed;
pub mod web;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
