use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewOrder, Order, OrderNumber, OrderUpdate},
    traits::OrderDatabaseError,
};

/// Returns the order with the given order number, or `None` if it does not exist.
pub async fn fetch_order_by_number(
    number: &OrderNumber,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE order_number = $1 LIMIT 1")
        .bind(number.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// Inserts a new order using the given connection. This is not atomic. You can embed this call
/// inside a transaction if you need atomicity, and pass `&mut *tx` as the connection argument.
///
/// The unique constraint on `order_number` is surfaced as `DuplicateOrderNumber`, which the sync
/// loop converts into an update when it loses an insert race.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderDatabaseError> {
    let number = order.order_number.clone();
    let result = sqlx::query_as::<_, Order>(
        r#"
            INSERT INTO orders (
                order_number,
                shop_id,
                price,
                status,
                remark,
                payment_time
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(order.order_number)
    .bind(order.shop_id)
    .bind(order.price)
    .bind(order.status.to_string())
    .bind(order.remark)
    .bind(order.payment_time)
    .fetch_one(conn)
    .await;
    match result {
        Err(sqlx::Error::Database(de)) if de.is_unique_violation() => {
            Err(OrderDatabaseError::DuplicateOrderNumber(number))
        },
        Err(e) => Err(e.into()),
        Ok(order) => {
            debug!("🗃️ Order {} inserted with id {}", number, order.id);
            Ok(order)
        },
    }
}

/// Applies a partial update to the order with the given order number. Only the fields present in
/// `update` appear in the SET clause, so everything else keeps its stored value, including fields
/// maintained by fulfilment operations.
pub async fn update_order(
    number: &OrderNumber,
    update: OrderUpdate,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderDatabaseError> {
    if update.is_empty() {
        return fetch_order_by_number(number, conn)
            .await?
            .ok_or_else(|| OrderDatabaseError::OrderNotFound(number.clone()));
    }
    let mut builder = QueryBuilder::new("UPDATE orders SET updated_at = CURRENT_TIMESTAMP");
    if let Some(shop_id) = update.shop_id {
        builder.push(", shop_id = ");
        builder.push_bind(shop_id);
    }
    if let Some(price) = update.price {
        builder.push(", price = ");
        builder.push_bind(price);
    }
    if let Some(status) = update.status {
        builder.push(", status = ");
        builder.push_bind(status.to_string());
    }
    if let Some(payment_time) = update.payment_time {
        builder.push(", payment_time = ");
        builder.push_bind(payment_time);
    }
    if let Some(remark) = update.remark {
        builder.push(", remark = ");
        builder.push_bind(remark);
    }
    builder.push(" WHERE order_number = ");
    builder.push_bind(number.as_str().to_string());
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let order = builder.build_query_as::<Order>().fetch_optional(conn).await?;
    order.ok_or_else(|| OrderDatabaseError::OrderNotFound(number.clone()))
}
