//! Domain event payloads.
//!
//! Events are immutable records of a state change that has already been committed. They carry
//! ids and the handful of fields a subscriber needs to react without a round-trip to the
//! database.
use bzr_common::Money;
use serde::{Deserialize, Serialize};

use crate::db_types::{Order, Payment, ShopCategory, UserRole};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order_id: i64,
    pub user_id: i64,
    pub shop_id: i64,
    pub product_name: String,
    pub total_amount: Money,
}

impl From<&Order> for OrderCreatedEvent {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            user_id: order.user_id,
            shop_id: order.shop_id,
            product_name: order.product_name.clone(),
            total_amount: order.total_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub order_id: i64,
    pub user_id: i64,
    pub shop_id: i64,
}

impl From<&Order> for OrderCancelledEvent {
    fn from(order: &Order) -> Self {
        Self { order_id: order.id, user_id: order.user_id, shop_id: order.shop_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCompletedEvent {
    pub payment_id: i64,
    pub order_id: i64,
    pub user_id: i64,
    pub amount: Money,
    pub transaction_id: Option<String>,
}

impl From<&Payment> for PaymentCompletedEvent {
    fn from(payment: &Payment) -> Self {
        Self {
            payment_id: payment.id,
            order_id: payment.order_id,
            user_id: payment.user_id,
            amount: payment.amount,
            transaction_id: payment.transaction_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFailedEvent {
    pub payment_id: i64,
    pub order_id: i64,
    pub user_id: i64,
    pub amount: Money,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundCompletedEvent {
    pub payment_id: i64,
    pub order_id: i64,
    pub user_id: i64,
    pub refund_amount: Money,
}

impl From<&Payment> for RefundCompletedEvent {
    fn from(payment: &Payment) -> Self {
        Self { payment_id: payment.id, order_id: payment.order_id, user_id: payment.user_id, refund_amount: payment.amount }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedEvent {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopCreatedEvent {
    pub shop_id: i64,
    pub name: String,
    pub category: ShopCategory,
    pub owner_id: i64,
}
