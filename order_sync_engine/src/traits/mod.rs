//! Interface contracts of the reconciliation core.
//!
//! The sync engine only ever talks to two collaborators, and both are defined here as traits so
//! that backends can be swapped (and mocked in tests) without touching the loop itself:
//!
//! * [`OrderManagement`] is the order repository: lookup by order number, create, and
//!   partial-field update against durable storage.
//! * [`RemoteOrderSource`] is the marketplace side: fetch one page of trade records inside a time
//!   window. The bundled [`taobao_tools::TaobaoApi`] client implements it.
mod order_management;
mod remote_orders;

pub use order_management::{OrderDatabaseError, OrderManagement};
pub use remote_orders::{RemoteOrderSource, RemoteSourceError};
