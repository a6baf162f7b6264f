use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::PaymentApiError,
    db_types::{NewPayment, Payment, PaymentStatus},
    events::{EventProducers, PaymentCompletedEvent, PaymentFailedEvent, RefundCompletedEvent},
    traits::PaymentStore,
};

/// The decision point standing in for an external payment gateway.
///
/// A production implementation would call out to a payment processor here, with its own retry
/// and timeout policy. The engine only cares about the verdict: authorized or declined (with a
/// reason).
pub trait PaymentGateway {
    fn authorize(&self, payment: &Payment) -> Result<(), String>;
}

/// The stock gateway: every payment is authorized.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprovingGateway;

impl PaymentGateway for AutoApprovingGateway {
    fn authorize(&self, _payment: &Payment) -> Result<(), String> {
        Ok(())
    }
}

/// `PaymentApi` orchestrates payment creation, processing, refunds and cancellation, and
/// publishes the payment domain events.
///
/// It also hosts the one genuinely interesting reconciliation rule in the system:
/// [`Self::refund_payment_by_order_id`], which absorbs an order-cancellation signal against a
/// payment that may be in any state, or may not exist yet.
pub struct PaymentApi<B, G = AutoApprovingGateway> {
    db: B,
    gateway: G,
    producers: EventProducers,
}

impl<B, G> Debug for PaymentApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentApi")
    }
}

impl<B> PaymentApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, gateway: AutoApprovingGateway, producers }
    }
}

impl<B, G> PaymentApi<B, G> {
    pub fn with_gateway(db: B, gateway: G, producers: EventProducers) -> Self {
        Self { db, gateway, producers }
    }
}

impl<B, G> PaymentApi<B, G>
where
    B: PaymentStore,
    G: PaymentGateway,
{
    /// Open a new payment in `Pending` status.
    ///
    /// There is deliberately no existence check against the order: the caller is the
    /// order-created event handler (or a test), and the order domain has already validated the
    /// order before the event was published.
    pub async fn create_payment(&self, payment: NewPayment) -> Result<Payment, PaymentApiError> {
        let payment = self.db.insert_payment(payment).await?;
        debug!("💳️ Payment #{} opened for order {}", payment.id, payment.order_id);
        Ok(payment)
    }

    /// Run a pending payment through the gateway.
    ///
    /// The payment moves to `Processing` (acquiring its transaction id), then to `Completed` or
    /// `Failed` depending on the gateway verdict. Only the final state is persisted; a
    /// [`PaymentCompletedEvent`] or [`PaymentFailedEvent`] is published accordingly.
    pub async fn process_payment(&self, id: i64) -> Result<Payment, PaymentApiError> {
        let mut payment = self.payment_by_id(id).await?;
        payment.process()?;
        match self.gateway.authorize(&payment) {
            Ok(()) => {
                payment.complete()?;
                let payment = self.db.update_payment(&payment).await?;
                debug!(
                    "💳️ Payment #{id} completed with transaction {}",
                    payment.transaction_id.as_deref().unwrap_or("???")
                );
                for emitter in &self.producers.payment_completed {
                    emitter.publish_event(PaymentCompletedEvent::from(&payment)).await;
                }
                Ok(payment)
            },
            Err(reason) => {
                payment.fail(reason.as_str())?;
                let payment = self.db.update_payment(&payment).await?;
                warn!("💳️ Payment #{id} failed: {reason}");
                let event = PaymentFailedEvent {
                    payment_id: payment.id,
                    order_id: payment.order_id,
                    user_id: payment.user_id,
                    amount: payment.amount,
                    reason,
                };
                for emitter in &self.producers.payment_failed {
                    emitter.publish_event(event.clone()).await;
                }
                Ok(payment)
            },
        }
    }

    /// Refund a completed payment and publish a [`RefundCompletedEvent`].
    pub async fn refund_payment(&self, id: i64) -> Result<Payment, PaymentApiError> {
        let mut payment = self.payment_by_id(id).await?;
        payment.refund()?;
        let payment = self.db.update_payment(&payment).await?;
        debug!("💳️ Payment #{id} refunded");
        self.call_refund_completed_hook(&payment).await;
        Ok(payment)
    }

    /// Reconcile an order-cancellation signal against whatever payment state exists.
    ///
    /// The cancellation event is delivered asynchronously and may race ahead of payment
    /// creation, so every branch here is deliberate:
    /// * no payment yet — return `None` and do nothing;
    /// * refundable (`Completed`) — refund and publish a [`RefundCompletedEvent`];
    /// * still cancellable (`Pending`/`Processing`) — cancel, with no refund event;
    /// * anything else (`Failed`, `Refunded`, `Cancelled`) — leave the payment untouched.
    pub async fn refund_payment_by_order_id(&self, order_id: i64) -> Result<Option<Payment>, PaymentApiError> {
        let Some(mut payment) = self.db.fetch_payment_for_order(order_id).await? else {
            debug!("💳️ No payment recorded for order {order_id} yet; nothing to refund");
            return Ok(None);
        };
        if payment.status.can_refund() {
            payment.refund()?;
            let payment = self.db.update_payment(&payment).await?;
            debug!("💳️ Payment #{} refunded after order {order_id} was cancelled", payment.id);
            self.call_refund_completed_hook(&payment).await;
            Ok(Some(payment))
        } else if payment.status.can_cancel() {
            payment.cancel()?;
            let payment = self.db.update_payment(&payment).await?;
            debug!("💳️ Payment #{} cancelled after order {order_id} was cancelled", payment.id);
            Ok(Some(payment))
        } else {
            trace!("💳️ Payment #{} is {} and needs no compensation for order {order_id}", payment.id, payment.status);
            Ok(Some(payment))
        }
    }

    async fn call_refund_completed_hook(&self, payment: &Payment) {
        for emitter in &self.producers.refund_completed {
            emitter.publish_event(RefundCompletedEvent::from(payment)).await;
        }
    }

    /// Cancel a payment that has not completed yet.
    pub async fn cancel_payment(&self, id: i64) -> Result<Payment, PaymentApiError> {
        let mut payment = self.payment_by_id(id).await?;
        payment.cancel()?;
        let payment = self.db.update_payment(&payment).await?;
        debug!("💳️ Payment #{id} cancelled");
        Ok(payment)
    }

    pub async fn payment_by_id(&self, id: i64) -> Result<Payment, PaymentApiError> {
        self.db.fetch_payment(id).await?.ok_or(PaymentApiError::PaymentNotFound(id))
    }

    pub async fn payment_for_order(&self, order_id: i64) -> Result<Payment, PaymentApiError> {
        self.db.fetch_payment_for_order(order_id).await?.ok_or(PaymentApiError::PaymentForOrderNotFound(order_id))
    }

    pub async fn all_payments(&self) -> Result<Vec<Payment>, PaymentApiError> {
        Ok(self.db.fetch_all_payments().await?)
    }

    pub async fn payments_for_user(&self, user_id: i64) -> Result<Vec<Payment>, PaymentApiError> {
        Ok(self.db.fetch_payments_for_user(user_id).await?)
    }

    pub async fn payments_with_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, PaymentApiError> {
        Ok(self.db.fetch_payments_with_status(status).await?)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
