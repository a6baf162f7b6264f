//! Row-level data types shared between the storage layer and the public APIs.
//!
//! The `Order` and `Payment` aggregates own their state machines: every status change goes
//! through a transition method that checks the guard and mutates the entity in place. The
//! orchestrating APIs in [`crate::api`] are responsible for persisting the result and for
//! publishing events; the entities themselves never touch the database or the event bus.

use std::{fmt::Display, str::FromStr};

use bzr_common::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

use crate::helpers::new_transaction_id;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(String);

//--------------------------------------      UserRole      ----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum UserRole {
    User,
    Admin,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::User => write!(f, "User"),
            UserRole::Admin => write!(f, "Admin"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            s => Err(ConversionError(format!("Invalid user role: {s}"))),
        }
    }
}

//--------------------------------------        User        ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: UserRole,
}

impl NewUser {
    pub fn new<S: Into<String>>(name: S, email: S, phone_number: S, role: UserRole) -> Self {
        Self { name: name.into(), email: email.into(), phone_number: phone_number.into(), role }
    }
}

//--------------------------------------    ShopCategory    ----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum ShopCategory {
    Restaurant,
    Cafe,
    Retail,
    Fashion,
    Electronics,
    Grocery,
    Other,
}

impl Display for ShopCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShopCategory::Restaurant => "Restaurant",
            ShopCategory::Cafe => "Cafe",
            ShopCategory::Retail => "Retail",
            ShopCategory::Fashion => "Fashion",
            ShopCategory::Electronics => "Electronics",
            ShopCategory::Grocery => "Grocery",
            ShopCategory::Other => "Other",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ShopCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restaurant" => Ok(Self::Restaurant),
            "cafe" => Ok(Self::Cafe),
            "retail" => Ok(Self::Retail),
            "fashion" => Ok(Self::Fashion),
            "electronics" => Ok(Self::Electronics),
            "grocery" => Ok(Self::Grocery),
            "other" => Ok(Self::Other),
            s => Err(ConversionError(format!("Invalid shop category: {s}"))),
        }
    }
}

//--------------------------------------        Shop        ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub category: ShopCategory,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub owner_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewShop {
    pub name: String,
    pub category: ShopCategory,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub owner_id: i64,
}

//--------------------------------------     OrderStatus    ----------------------------------------------------------
/// The order lifecycle: `Pending → Confirmed → Shipped → Delivered`, with cancellation possible
/// from `Pending` and `Confirmed` only. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Confirmed => write!(f, "Confirmed"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderStateError {
    #[error("only a pending order may be confirmed (current status: {0})")]
    NotConfirmable(OrderStatus),
    #[error("only a confirmed order may be shipped (current status: {0})")]
    NotShippable(OrderStatus),
    #[error("only a shipped order may be completed (current status: {0})")]
    NotDeliverable(OrderStatus),
    #[error("this order cannot be cancelled in its current state ({0})")]
    NotCancellable(OrderStatus),
}

//--------------------------------------        Order       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub shop_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub total_amount: Money,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Confirm a pending order.
    pub fn confirm(&mut self) -> Result<(), OrderStateError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderStateError::NotConfirmable(self.status));
        }
        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Start delivery of a confirmed order.
    pub fn ship(&mut self) -> Result<(), OrderStateError> {
        if self.status != OrderStatus::Confirmed {
            return Err(OrderStateError::NotShippable(self.status));
        }
        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// Mark a shipped order as delivered.
    pub fn deliver(&mut self) -> Result<(), OrderStateError> {
        if self.status != OrderStatus::Shipped {
            return Err(OrderStateError::NotDeliverable(self.status));
        }
        self.status = OrderStatus::Delivered;
        Ok(())
    }

    /// Cancel an order that has not yet shipped. Not idempotent: cancelling an already-cancelled
    /// order is an error.
    pub fn cancel(&mut self) -> Result<(), OrderStateError> {
        if !self.status.can_cancel() {
            return Err(OrderStateError::NotCancellable(self.status));
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub shop_id: i64,
    pub product_name: String,
    pub quantity: i32,
    /// The total price of the order, in minor currency units
    pub total_amount: Money,
    pub delivery_address: String,
}

impl NewOrder {
    pub fn new(user_id: i64, shop_id: i64, product_name: &str, quantity: i32, total_amount: Money, delivery_address: &str) -> Self {
        Self {
            user_id,
            shop_id,
            product_name: product_name.to_string(),
            quantity,
            total_amount,
            delivery_address: delivery_address.to_string(),
        }
    }
}

//--------------------------------------   PaymentMethod    ----------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    BankTransfer,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "CreditCard"),
            PaymentMethod::DebitCard => write!(f, "DebitCard"),
            PaymentMethod::BankTransfer => write!(f, "BankTransfer"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "creditcard" => Ok(Self::CreditCard),
            "debitcard" => Ok(Self::DebitCard),
            "banktransfer" => Ok(Self::BankTransfer),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------   PaymentStatus    ----------------------------------------------------------
/// The payment lifecycle: `Pending → Processing → {Completed, Failed}`, `Completed → Refunded`,
/// and cancellation from `Pending` or `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub fn can_process(&self) -> bool {
        *self == PaymentStatus::Pending
    }

    pub fn can_refund(&self) -> bool {
        *self == PaymentStatus::Completed
    }

    pub fn can_cancel(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Processing)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Processing => write!(f, "Processing"),
            PaymentStatus::Completed => write!(f, "Completed"),
            PaymentStatus::Failed => write!(f, "Failed"),
            PaymentStatus::Refunded => write!(f, "Refunded"),
            PaymentStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentStateError {
    #[error("payment cannot be processed in its current state ({0})")]
    NotProcessable(PaymentStatus),
    #[error("only a processing payment may be completed (current status: {0})")]
    NotCompletable(PaymentStatus),
    #[error("only a processing payment may be failed (current status: {0})")]
    NotFailable(PaymentStatus),
    #[error("payment cannot be refunded in its current state ({0})")]
    NotRefundable(PaymentStatus),
    #[error("payment cannot be cancelled in its current state ({0})")]
    NotCancellable(PaymentStatus),
}

//--------------------------------------      Payment       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// The order this payment settles. One payment per order, enforced by lookup at the service
    /// layer rather than a database constraint.
    pub order_id: i64,
    pub user_id: i64,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    /// Assigned when processing starts, never before
    pub transaction_id: Option<String>,
    /// Assigned when the payment fails, never before
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub refunded_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Move a pending payment into processing and assign it a fresh transaction identifier.
    pub fn process(&mut self) -> Result<(), PaymentStateError> {
        if !self.status.can_process() {
            return Err(PaymentStateError::NotProcessable(self.status));
        }
        self.status = PaymentStatus::Processing;
        self.transaction_id = Some(new_transaction_id());
        Ok(())
    }

    /// Mark a processing payment as completed.
    pub fn complete(&mut self) -> Result<(), PaymentStateError> {
        if self.status != PaymentStatus::Processing {
            return Err(PaymentStateError::NotCompletable(self.status));
        }
        self.status = PaymentStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark a processing payment as failed, recording the reason.
    pub fn fail<S: Into<String>>(&mut self, reason: S) -> Result<(), PaymentStateError> {
        if self.status != PaymentStatus::Processing {
            return Err(PaymentStateError::NotFailable(self.status));
        }
        self.status = PaymentStatus::Failed;
        self.failure_reason = Some(reason.into());
        Ok(())
    }

    /// Refund a completed payment.
    pub fn refund(&mut self) -> Result<(), PaymentStateError> {
        if !self.status.can_refund() {
            return Err(PaymentStateError::NotRefundable(self.status));
        }
        self.status = PaymentStatus::Refunded;
        self.refunded_at = Some(Utc::now());
        Ok(())
    }

    /// Cancel a payment that has not completed yet.
    pub fn cancel(&mut self) -> Result<(), PaymentStateError> {
        if !self.status.can_cancel() {
            return Err(PaymentStateError::NotCancellable(self.status));
        }
        self.status = PaymentStatus::Cancelled;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: i64,
    pub user_id: i64,
    pub amount: Money,
    pub method: PaymentMethod,
}

impl NewPayment {
    pub fn new(order_id: i64, user_id: i64, amount: Money, method: PaymentMethod) -> Self {
        Self { order_id, user_id, amount, method }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pending_order() -> Order {
        Order {
            id: 1,
            user_id: 1,
            shop_id: 1,
            product_name: "Mechanical keyboard".to_string(),
            quantity: 2,
            total_amount: Money::from(50_000),
            delivery_address: "123 Delivery Lane".to_string(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pending_payment() -> Payment {
        Payment {
            id: 1,
            order_id: 1,
            user_id: 1,
            amount: Money::from(50_000),
            method: PaymentMethod::CreditCard,
            status: PaymentStatus::Pending,
            transaction_id: None,
            failure_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed_at: None,
            refunded_at: None,
        }
    }

    #[test]
    fn order_happy_path() {
        let mut order = pending_order();
        assert_eq!(order.status, OrderStatus::Pending);
        order.confirm().unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        order.ship().unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);
        order.deliver().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn order_confirm_requires_pending() {
        let mut order = pending_order();
        order.confirm().unwrap();
        let err = order.confirm().unwrap_err();
        assert_eq!(err, OrderStateError::NotConfirmable(OrderStatus::Confirmed));
        assert!(err.to_string().contains("only a pending order may be confirmed"));
    }

    #[test]
    fn order_ship_requires_confirmed() {
        let mut order = pending_order();
        let err = order.ship().unwrap_err();
        assert_eq!(err, OrderStateError::NotShippable(OrderStatus::Pending));
    }

    #[test]
    fn order_deliver_requires_shipped() {
        let mut order = pending_order();
        order.confirm().unwrap();
        let err = order.deliver().unwrap_err();
        assert_eq!(err, OrderStateError::NotDeliverable(OrderStatus::Confirmed));
    }

    #[test]
    fn order_cancel_from_pending_and_confirmed_only() {
        let mut order = pending_order();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        let mut order = pending_order();
        order.confirm().unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        let mut order = pending_order();
        order.confirm().unwrap();
        order.ship().unwrap();
        assert_eq!(order.cancel().unwrap_err(), OrderStateError::NotCancellable(OrderStatus::Shipped));
        order.deliver().unwrap();
        assert_eq!(order.cancel().unwrap_err(), OrderStateError::NotCancellable(OrderStatus::Delivered));
    }

    #[test]
    fn order_cancel_is_not_idempotent() {
        let mut order = pending_order();
        order.cancel().unwrap();
        assert_eq!(order.cancel().unwrap_err(), OrderStateError::NotCancellable(OrderStatus::Cancelled));
    }

    #[test]
    fn payment_process_assigns_transaction_id() {
        let mut payment = pending_payment();
        assert!(payment.transaction_id.is_none());
        payment.process().unwrap();
        assert_eq!(payment.status, PaymentStatus::Processing);
        let txid = payment.transaction_id.as_deref().unwrap();
        assert!(txid.starts_with("TXN-"));
        assert_eq!(txid.len(), 12);
    }

    #[test]
    fn payment_process_requires_pending() {
        let mut payment = pending_payment();
        payment.process().unwrap();
        assert_eq!(payment.process().unwrap_err(), PaymentStateError::NotProcessable(PaymentStatus::Processing));
    }

    #[test]
    fn payment_complete_sets_timestamp() {
        let mut payment = pending_payment();
        payment.process().unwrap();
        payment.complete().unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.completed_at.is_some());
    }

    #[test]
    fn payment_complete_requires_processing() {
        let mut payment = pending_payment();
        assert_eq!(payment.complete().unwrap_err(), PaymentStateError::NotCompletable(PaymentStatus::Pending));
    }

    #[test]
    fn payment_fail_records_reason() {
        let mut payment = pending_payment();
        payment.process().unwrap();
        payment.fail("insufficient funds").unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
        assert_eq!(payment.failure_reason.as_deref(), Some("insufficient funds"));
    }

    #[test]
    fn payment_fail_requires_processing() {
        let mut payment = pending_payment();
        assert_eq!(payment.fail("nope").unwrap_err(), PaymentStateError::NotFailable(PaymentStatus::Pending));
    }

    #[test]
    fn payment_refund_requires_completed() {
        let mut payment = pending_payment();
        assert_eq!(payment.refund().unwrap_err(), PaymentStateError::NotRefundable(PaymentStatus::Pending));
        payment.process().unwrap();
        payment.complete().unwrap();
        payment.refund().unwrap();
        assert_eq!(payment.status, PaymentStatus::Refunded);
        assert!(payment.refunded_at.is_some());
    }

    #[test]
    fn payment_cancel_only_before_completion() {
        let mut payment = pending_payment();
        payment.cancel().unwrap();
        assert_eq!(payment.status, PaymentStatus::Cancelled);

        let mut payment = pending_payment();
        payment.process().unwrap();
        payment.cancel().unwrap();
        assert_eq!(payment.status, PaymentStatus::Cancelled);

        let mut payment = pending_payment();
        payment.process().unwrap();
        payment.complete().unwrap();
        assert_eq!(payment.cancel().unwrap_err(), PaymentStateError::NotCancellable(PaymentStatus::Completed));
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in
            [OrderStatus::Pending, OrderStatus::Confirmed, OrderStatus::Shipped, OrderStatus::Delivered, OrderStatus::Cancelled]
        {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert_eq!("COMPLETED".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        assert!("preparing".parse::<OrderStatus>().is_err());
    }
}
