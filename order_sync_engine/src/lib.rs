//! Order Synchronization Engine
//!
//! The order synchronization engine keeps the local order store in step with the trades a shop
//! sells on Taobao. It is the reconciliation core of the order management backend: it drives the
//! paginated fetch loop against the marketplace API, translates the external trade vocabulary into
//! the internal order representation, and applies each record as an idempotent create-or-update
//! against durable storage.
//!
//! The library is divided into three main sections:
//! 1. Database types and backend traits ([`mod@db_types`], [`mod@traits`]). Storage backends
//!    implement [`OrderManagement`] to act as the order repository; SQLite is the bundled
//!    implementation. Remote marketplaces implement [`RemoteOrderSource`]; the
//!    [`taobao_tools::TaobaoApi`] client implements it out of the box.
//! 2. The trade mapper ([`helpers::trade_mapper`]). A pure translation from one remote trade
//!    record to a sparse partial-update payload. It only emits fields it can positively derive
//!    from the remote record, so repeated sync runs never clobber state written by fulfilment
//!    operations.
//! 3. The sync API ([`mod@sync_api`]). [`OrderSyncApi::synchronize`] runs one reconciliation pass
//!    and always hands back a [`SyncResult`] summary; per-record problems are collected, never
//!    thrown.
pub mod db_types;
pub mod helpers;
pub mod traits;

mod sync_api;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use sync_api::{OrderSyncApi, SyncApiError, SyncFailure, SyncParams, SyncResult};
pub use traits::{OrderDatabaseError, OrderManagement, RemoteOrderSource, RemoteSourceError};
