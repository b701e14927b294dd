//! # SQLite database methods
//!
//! This module contains the "low-level" SQLite interactions. They are plain functions (rather
//! than stateful structs) that accept a `&mut SqliteConnection` argument, so callers can obtain a
//! connection from a pool, or embed a call inside a transaction, without any other changes.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod orders;

const SQLITE_DB_URL: &str = "sqlite://data/tms_store.db";

pub fn db_url() -> String {
    let result = env::var("TMS_DATABASE_URL").unwrap_or_else(|_| {
        info!("TMS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
