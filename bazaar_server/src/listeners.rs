//! Cross-domain event listeners.
//!
//! The order and payment domains never call each other directly; they communicate through the
//! engine's event channels. This module registers the handlers:
//!
//! * order created → open a payment for the order;
//! * order cancelled → refund or cancel the payment, depending on its state;
//! * everything else (user created, shop created, payment completed/failed, refund completed) →
//!   log-only stubs.
//!
//! Delivery is asynchronous: a listener failure is logged and never surfaces to the request that
//! published the event.
use std::{future::Future, pin::Pin, sync::Arc};

use bazaar_engine::{
    db_types::{NewPayment, PaymentMethod},
    events::{
        EventHandlers,
        EventHooks,
        EventProducers,
        OrderCancelledEvent,
        OrderCreatedEvent,
        PaymentCompletedEvent,
        PaymentFailedEvent,
        RefundCompletedEvent,
        ShopCreatedEvent,
        UserCreatedEvent,
    },
    PaymentApi,
    SqliteDatabase,
};
use log::*;

/// Payments opened by the order-created listener always use this method.
const DEFAULT_PAYMENT_METHOD: PaymentMethod = PaymentMethod::CreditCard;

/// Builds the full event pipeline and returns the producers to hand to the service APIs.
///
/// Hooks are registered in two stages. The terminal listeners (logging stubs) go first, because
/// the payment listeners publish payment events and therefore need those producers to exist
/// before they can be constructed.
pub async fn start_event_pipeline(db: SqliteDatabase, buffer_size: usize) -> EventProducers {
    let mut hooks = EventHooks::default();
    attach_logging_listeners(&mut hooks);
    let handlers = EventHandlers::new(buffer_size, hooks);
    let mut producers = handlers.producers();
    handlers.start_handlers().await;

    let payments = PaymentApi::new(db, producers.clone());
    let mut hooks = EventHooks::default();
    attach_payment_listeners(&mut hooks, payments);
    let handlers = EventHandlers::new(buffer_size, hooks);
    producers.merge(handlers.producers());
    handlers.start_handlers().await;

    producers
}

/// Registers the order → payment glue.
pub fn attach_payment_listeners(hooks: &mut EventHooks, payments: PaymentApi<SqliteDatabase>) {
    let api = Arc::new(payments);

    let create_api = api.clone();
    hooks.on_order_created(move |ev: OrderCreatedEvent| {
        let api = create_api.clone();
        Box::pin(async move {
            info!("📬️ Order created event received: {ev:?}");
            let payment = NewPayment::new(ev.order_id, ev.user_id, ev.total_amount, DEFAULT_PAYMENT_METHOD);
            match api.create_payment(payment).await {
                Ok(payment) => info!("📬️ Payment #{} opened for order {}", payment.id, ev.order_id),
                Err(e) => error!("📬️ Could not open a payment for order {}. {e}", ev.order_id),
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });

    hooks.on_order_cancelled(move |ev: OrderCancelledEvent| {
        let api = api.clone();
        Box::pin(async move {
            info!("📬️ Order cancelled event received: {ev:?}");
            match api.refund_payment_by_order_id(ev.order_id).await {
                Ok(Some(payment)) => {
                    info!("📬️ Payment #{} is now {} after order {} was cancelled", payment.id, payment.status, ev.order_id)
                },
                Ok(None) => info!("📬️ No payment to compensate for order {}", ev.order_id),
                Err(e) => error!("📬️ Could not compensate the payment for order {}. {e}", ev.order_id),
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
}

/// Registers log-only subscribers for the events nothing reacts to yet.
pub fn attach_logging_listeners(hooks: &mut EventHooks) {
    hooks.on_user_created(|ev: UserCreatedEvent| {
        Box::pin(async move {
            info!("📬️ User created event received: {ev:?}");
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks.on_shop_created(|ev: ShopCreatedEvent| {
        Box::pin(async move {
            info!("📬️ Shop created event received: {ev:?}");
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks.on_payment_completed(|ev: PaymentCompletedEvent| {
        Box::pin(async move {
            info!("📬️ Payment completed event received: {ev:?}");
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks.on_payment_failed(|ev: PaymentFailedEvent| {
        Box::pin(async move {
            warn!("📬️ Payment failed event received: {ev:?}");
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    hooks.on_refund_completed(|ev: RefundCompletedEvent| {
        Box::pin(async move {
            info!("📬️ Refund completed event received: {ev:?}");
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
}
