use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderNumber, OrderUpdate};

#[derive(Debug, Clone, Error)]
pub enum OrderDatabaseError {
    #[error("Order {0} already exists")]
    DuplicateOrderNumber(OrderNumber),
    #[error("Order {0} does not exist")]
    OrderNotFound(OrderNumber),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for OrderDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        OrderDatabaseError::DatabaseError(e.to_string())
    }
}

/// The order repository contract consumed by the sync engine.
///
/// `order_number` is globally unique in the repository; backends must enforce this with a unique
/// constraint and surface a violation as [`OrderDatabaseError::DuplicateOrderNumber`] so that the
/// engine can convert a lost insert race into an update.
#[allow(async_fn_in_trait)]
pub trait OrderManagement: Clone {
    /// Fetches the order with the given order number, or `None` if no such order exists.
    async fn fetch_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>, OrderDatabaseError>;

    /// Inserts a brand-new order. Fails with `DuplicateOrderNumber` if the order number is taken.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderDatabaseError>;

    /// Applies a partial update to an existing order. Only fields present in `update` are
    /// written; everything else keeps its stored value. Fails with `OrderNotFound` if the order
    /// number does not exist.
    async fn update_order(&self, number: &OrderNumber, update: OrderUpdate) -> Result<Order, OrderDatabaseError>;
}
