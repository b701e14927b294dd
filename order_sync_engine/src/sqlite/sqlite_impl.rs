//! `SqliteDatabase` is the bundled order repository backend. Unsurprisingly, it uses SQLite and
//! implements the [`OrderManagement`] trait defined in the [`crate::traits`] module.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{db_url, new_pool, orders};
use crate::{
    db_types::{NewOrder, Order, OrderNumber, OrderUpdate},
    traits::{OrderDatabaseError, OrderManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database connection pool reading the URL from the `TMS_DATABASE_URL`
    /// environment variable.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order_by_number(&self, number: &OrderNumber) -> Result<Option<Order>, OrderDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_number(number, &mut conn).await?;
        Ok(order)
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn update_order(&self, number: &OrderNumber, update: OrderUpdate) -> Result<Order, OrderDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order(number, update, &mut conn).await
    }
}
