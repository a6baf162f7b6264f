use thiserror::Error;

use crate::{
    db_types::{OrderStateError, PaymentStateError},
    traits::StoreError,
};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("The requested order does not exist. Order ID: {0}")]
    OrderNotFound(i64),
    #[error("The buyer does not exist. User ID: {0}")]
    UserNotFound(i64),
    #[error("The shop does not exist. Shop ID: {0}")]
    ShopNotFound(i64),
    #[error("{0}")]
    InvalidTransition(#[from] OrderStateError),
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum PaymentApiError {
    #[error("The requested payment does not exist. Payment ID: {0}")]
    PaymentNotFound(i64),
    #[error("No payment exists for the requested order. Order ID: {0}")]
    PaymentForOrderNotFound(i64),
    #[error("{0}")]
    InvalidTransition(#[from] PaymentStateError),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum ShopApiError {
    #[error("The requested shop does not exist. Shop ID: {0}")]
    ShopNotFound(i64),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum UserApiError {
    #[error("The requested user does not exist. User ID: {0}")]
    UserNotFound(i64),
    #[error("No user is registered with email {0}")]
    EmailNotFound(String),
    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}
