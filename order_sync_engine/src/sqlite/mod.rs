//! SQLite backend for the order synchronization engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
