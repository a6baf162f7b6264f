use crate::{
    db_types::{NewPayment, Payment, PaymentStatus},
    traits::StoreError,
};

/// Persistence contract for the payment aggregate.
#[allow(async_fn_in_trait)]
pub trait PaymentStore {
    /// Inserts a new payment in `Pending` status and returns the stored row.
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StoreError>;

    async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, StoreError>;

    /// The one-payment-per-order lookup. There is deliberately no database constraint backing
    /// this; the order-created listener is the only writer.
    async fn fetch_payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, StoreError>;

    async fn fetch_all_payments(&self) -> Result<Vec<Payment>, StoreError>;

    async fn fetch_payments_for_user(&self, user_id: i64) -> Result<Vec<Payment>, StoreError>;

    async fn fetch_payments_with_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, StoreError>;

    /// Persists the mutable fields of a payment (status, transaction id, failure reason and the
    /// completion/refund timestamps), bumping `updated_at`. Fails with
    /// [`StoreError::PaymentNotFound`] if the row has vanished.
    async fn update_payment(&self, payment: &Payment) -> Result<Payment, StoreError>;
}
