//! # Storage contracts
//!
//! This module defines the interface contracts a storage backend must implement to act as the
//! persistence layer for the Bazaar engine. There is one trait per aggregate:
//!
//! * [`UserStore`] — user rows and the existence/duplicate-email lookups the other domains need.
//! * [`ShopStore`] — shop rows and the existence lookup consumed by order creation.
//! * [`OrderStore`] — order rows and status persistence.
//! * [`PaymentStore`] — payment rows, including the by-order lookup that stands in for a
//!   database-level one-payment-per-order constraint.
//!
//! The traits only move rows in and out; every business rule (existence checks, state-machine
//! guards, event publication) lives in the [`crate::api`] layer. [`SqliteDatabase`] implements
//! all four.
//!
//! [`SqliteDatabase`]: crate::SqliteDatabase
mod order_store;
mod payment_store;
mod shop_store;
mod user_store;

use thiserror::Error;

pub use order_store::OrderStore;
pub use payment_store::PaymentStore;
pub use shop_store::ShopStore;
pub use user_store::UserStore;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("The requested order (id {0}) does not exist")]
    OrderNotFound(i64),
    #[error("The requested payment (id {0}) does not exist")]
    PaymentNotFound(i64),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}
