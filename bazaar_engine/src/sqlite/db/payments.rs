use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, Payment, PaymentStatus},
    traits::StoreError,
};

/// Inserts a new payment. The database assigns the surrogate id, the `Pending` status and both
/// timestamps; transaction id and failure reason start out empty.
pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, StoreError> {
    let payment: Payment = sqlx::query_as(
        r#"
            INSERT INTO payments (order_id, user_id, amount, method)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(payment.order_id)
    .bind(payment.user_id)
    .bind(payment.amount)
    .bind(payment.method)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Payment inserted with id {} for order {}", payment.id, payment.order_id);
    Ok(payment)
}

pub async fn fetch_payment_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(payment)
}

/// The most recent payment for the given order, if any. One payment per order is the invariant,
/// so "most recent" only matters if the invariant has been violated out-of-band.
pub async fn fetch_payment_for_order(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE order_id = $1 ORDER BY created_at DESC LIMIT 1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

pub async fn fetch_all_payments(conn: &mut SqliteConnection) -> Result<Vec<Payment>, sqlx::Error> {
    let payments = sqlx::query_as("SELECT * FROM payments ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(payments)
}

pub async fn fetch_payments_for_user(user_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Payment>, sqlx::Error> {
    let payments = sqlx::query_as("SELECT * FROM payments WHERE user_id = $1 ORDER BY created_at ASC")
        .bind(user_id)
        .fetch_all(conn)
        .await?;
    Ok(payments)
}

pub async fn fetch_payments_with_status(
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Vec<Payment>, sqlx::Error> {
    let payments = sqlx::query_as("SELECT * FROM payments WHERE status = $1 ORDER BY created_at ASC")
        .bind(status)
        .fetch_all(conn)
        .await?;
    Ok(payments)
}

/// Persists the outcome of a state-machine transition: status, transaction id, failure reason
/// and the completion/refund timestamps.
pub async fn update_payment(payment: &Payment, conn: &mut SqliteConnection) -> Result<Payment, StoreError> {
    let result: Option<Payment> = sqlx::query_as(
        r#"
            UPDATE payments
            SET status = $1,
                transaction_id = $2,
                failure_reason = $3,
                completed_at = $4,
                refunded_at = $5,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $6
            RETURNING *;
        "#,
    )
    .bind(payment.status)
    .bind(payment.transaction_id.as_deref())
    .bind(payment.failure_reason.as_deref())
    .bind(payment.completed_at)
    .bind(payment.refunded_at)
    .bind(payment.id)
    .fetch_optional(conn)
    .await?;
    result.ok_or(StoreError::PaymentNotFound(payment.id))
}
