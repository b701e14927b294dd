//! # Order synchronization API
//!
//! [`OrderSyncApi`] drives one reconciliation pass against a marketplace: it pages through the
//! remote trades inside a time window, maps each record, and applies it as an idempotent
//! create-or-update against the order repository.
//!
//! The pattern follows the rest of the engine: an API instance is created by supplying the two
//! backends it needs, and the backends are trait objects in the loose sense (generic parameters),
//! so tests can script both sides.
//!
//! ```rust,ignore
//! use order_sync_engine::{OrderSyncApi, SyncParams, SqliteDatabase};
//! use taobao_tools::{TaobaoApi, TaobaoConfig};
//!
//! let db = SqliteDatabase::new_with_url("sqlite://data/tms_store.db", 5).await?;
//! let api = OrderSyncApi::new(db, TaobaoApi::new(TaobaoConfig::new_from_env_or_default())?);
//! let result = api.synchronize(&session_token, SyncParams::default()).await?;
//! println!("synced {} orders, {} failures", result.synced, result.failures.len());
//! ```
mod errors;
mod order_sync_api;
mod sync_objects;

pub use errors::SyncApiError;
pub use order_sync_api::OrderSyncApi;
pub use sync_objects::{SyncFailure, SyncParams, SyncResult};
