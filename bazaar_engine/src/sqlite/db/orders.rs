use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderStatus},
    traits::StoreError,
};

/// Inserts a new order. The database assigns the surrogate id, the `Pending` status and both
/// timestamps.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, StoreError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (user_id, shop_id, product_name, quantity, total_amount, delivery_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(order.user_id)
    .bind(order.shop_id)
    .bind(order.product_name)
    .bind(order.quantity)
    .bind(order.total_amount)
    .bind(order.delivery_address)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order inserted with id {}", order.id);
    Ok(order)
}

pub async fn fetch_order_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// All orders, oldest first.
pub async fn fetch_all_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(orders)
}

pub async fn fetch_orders_for_user(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_orders_for_shop(shop_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE shop_id = $1 ORDER BY created_at ASC")
        .bind(shop_id)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn fetch_orders_with_status(
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, sqlx::Error> {
    let orders = sqlx::query_as("SELECT * FROM orders WHERE status = $1 ORDER BY created_at ASC")
        .bind(status)
        .fetch_all(conn)
        .await?;
    Ok(orders)
}

pub async fn update_order_status(
    id: i64,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, StoreError> {
    let result: Option<Order> =
        sqlx::query_as("UPDATE orders SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
            .bind(status)
            .bind(id)
            .fetch_optional(conn)
            .await?;
    result.ok_or(StoreError::OrderNotFound(id))
}

pub async fn delete_order(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
