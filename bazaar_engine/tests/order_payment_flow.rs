//! Integration scenarios for the order/payment lifecycle, run against a real SQLite database.
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use bazaar_engine::{
    db_types::{NewOrder, NewPayment, NewShop, NewUser, OrderStatus, Payment, PaymentMethod, PaymentStatus, Shop, ShopCategory, User, UserRole},
    events::{EventHandlers, EventHooks, EventProducers, OrderCancelledEvent, OrderCreatedEvent},
    traits::PaymentStore,
    OrderApi,
    OrderApiError,
    PaymentApi,
    PaymentApiError,
    PaymentGateway,
    ShopApi,
    SqliteDatabase,
    UserApi,
    UserApiError,
};
use bzr_common::Money;
use log::error;

use crate::support::prepare_env::{prepare_test_env, random_db_path};

mod support;

async fn new_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error connecting to test database")
}

/// Registers a buyer and a shop so that order creation has valid references to point at.
async fn seed_user_and_shop(db: &SqliteDatabase) -> (User, Shop) {
    let users = UserApi::new(db.clone(), EventProducers::default());
    let shops = ShopApi::new(db.clone(), EventProducers::default());
    let user = users
        .create_user(NewUser::new("Test Buyer", "buyer@example.com", "010-1234-5678", UserRole::User))
        .await
        .expect("Error creating user");
    let shop = shops
        .create_shop(NewShop {
            name: "Test Shop".to_string(),
            category: ShopCategory::Electronics,
            description: "Gadgets and parts".to_string(),
            address: "1 Market Street".to_string(),
            phone_number: "02-555-0100".to_string(),
            owner_id: user.id,
        })
        .await
        .expect("Error creating shop");
    (user, shop)
}

fn default_order(user: &User, shop: &Shop) -> NewOrder {
    NewOrder::new(user.id, shop.id, "Mechanical keyboard", 2, Money::from(50_000), "123 Delivery Lane")
}

// Scenario A: order and payment are created pending, processing completes the payment.
#[tokio::test]
async fn process_payment_happy_path() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());
    let payments = PaymentApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Money::from(50_000));

    let payment = payments
        .create_payment(NewPayment::new(order.id, user.id, order.total_amount, PaymentMethod::CreditCard))
        .await
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert!(payment.transaction_id.is_none());

    let payment = payments.process_payment(payment.id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert!(payment.transaction_id.as_deref().unwrap().starts_with("TXN-"));
    assert!(payment.completed_at.is_some());
}

// Scenario B: the full delivery lifecycle.
#[tokio::test]
async fn order_lifecycle_to_delivery() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    let order = orders.confirm_order(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    let order = orders.ship_order(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    let order = orders.deliver_order(order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);

    // a delivered order can no longer be cancelled
    let err = orders.cancel_order(order.id).await.unwrap_err();
    assert!(matches!(err, OrderApiError::InvalidTransition(_)));
}

// Scenario C: cancelling an order whose payment is still pending cancels the payment.
#[tokio::test]
async fn cancelling_order_cancels_pending_payment() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());
    let payments = PaymentApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    let payment = payments
        .create_payment(NewPayment::new(order.id, user.id, order.total_amount, PaymentMethod::CreditCard))
        .await
        .unwrap();

    orders.cancel_order(order.id).await.unwrap();
    let payment = payments.refund_payment_by_order_id(order.id).await.unwrap().expect("payment should exist");
    assert_eq!(payment.status, PaymentStatus::Cancelled);
    assert!(payment.refunded_at.is_none());
}

// Scenario D: cancelling an order whose payment completed refunds the payment.
#[tokio::test]
async fn cancelling_order_refunds_completed_payment() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());
    let payments = PaymentApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    let payment = payments
        .create_payment(NewPayment::new(order.id, user.id, order.total_amount, PaymentMethod::CreditCard))
        .await
        .unwrap();
    let payment = payments.process_payment(payment.id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);

    orders.cancel_order(order.id).await.unwrap();
    let payment = payments.refund_payment_by_order_id(order.id).await.unwrap().expect("payment should exist");
    assert_eq!(payment.status, PaymentStatus::Refunded);
    assert!(payment.refunded_at.is_some());
}

// Scenario E: a missing buyer fails order creation and persists nothing.
#[tokio::test]
async fn create_order_with_unknown_buyer_fails() {
    let db = new_db().await;
    let (_user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let order = NewOrder::new(999, shop.id, "Mechanical keyboard", 1, Money::from(10_000), "123 Delivery Lane");
    let err = orders.create_order(order).await.unwrap_err();
    match err {
        OrderApiError::UserNotFound(id) => assert_eq!(id, 999),
        other => panic!("Expected UserNotFound, got {other}"),
    }
    assert!(orders.all_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_order_with_unknown_shop_fails() {
    let db = new_db().await;
    let (user, _shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let order = NewOrder::new(user.id, 999, "Mechanical keyboard", 1, Money::from(10_000), "123 Delivery Lane");
    let err = orders.create_order(order).await.unwrap_err();
    assert!(matches!(err, OrderApiError::ShopNotFound(999)));
}

#[tokio::test]
async fn create_order_rejects_nonpositive_quantity() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let mut order = default_order(&user, &shop);
    order.quantity = 0;
    let err = orders.create_order(order).await.unwrap_err();
    assert!(matches!(err, OrderApiError::InvalidOrder(_)));
}

#[tokio::test]
async fn cancel_order_twice_fails_on_the_second_call() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    orders.cancel_order(order.id).await.unwrap();
    let err = orders.cancel_order(order.id).await.unwrap_err();
    assert!(matches!(err, OrderApiError::InvalidTransition(_)));
}

#[tokio::test]
async fn refund_by_order_id_is_a_noop_without_a_payment() {
    let db = new_db().await;
    let payments = PaymentApi::new(db.clone(), EventProducers::default());
    assert!(payments.refund_payment_by_order_id(12345).await.unwrap().is_none());
}

struct DecliningGateway;

impl PaymentGateway for DecliningGateway {
    fn authorize(&self, _payment: &Payment) -> Result<(), String> {
        Err("the card issuer declined the charge".to_string())
    }
}

#[tokio::test]
async fn declined_payment_is_failed_with_a_reason() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());
    let payments = PaymentApi::with_gateway(db.clone(), DecliningGateway, EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    let payment = payments
        .create_payment(NewPayment::new(order.id, user.id, order.total_amount, PaymentMethod::CreditCard))
        .await
        .unwrap();
    let payment = payments.process_payment(payment.id).await.unwrap();
    assert_eq!(payment.status, PaymentStatus::Failed);
    assert_eq!(payment.failure_reason.as_deref(), Some("the card issuer declined the charge"));
    // the transaction id was still assigned when processing started
    assert!(payment.transaction_id.is_some());

    // a failed payment is left untouched by the cancellation path
    let unchanged = payments.refund_payment_by_order_id(order.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, PaymentStatus::Failed);
}

#[tokio::test]
async fn reads_filter_by_user_shop_and_status() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());

    let o1 = orders.create_order(default_order(&user, &shop)).await.unwrap();
    let o2 = orders.create_order(default_order(&user, &shop)).await.unwrap();
    orders.confirm_order(o2.id).await.unwrap();

    assert_eq!(orders.orders_for_user(user.id).await.unwrap().len(), 2);
    assert_eq!(orders.orders_for_shop(shop.id).await.unwrap().len(), 2);
    let pending = orders.orders_with_status(OrderStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, o1.id);
    assert!(orders.orders_for_user(999).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_order_leaves_payment_alone() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;
    let orders = OrderApi::new(db.clone(), EventProducers::default());
    let payments = PaymentApi::new(db.clone(), EventProducers::default());

    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();
    payments
        .create_payment(NewPayment::new(order.id, user.id, order.total_amount, PaymentMethod::CreditCard))
        .await
        .unwrap();
    orders.delete_order(order.id).await.unwrap();

    let err = orders.order_by_id(order.id).await.unwrap_err();
    assert!(matches!(err, OrderApiError::OrderNotFound(_)));
    // deletion does not cascade into the payment domain
    assert_eq!(payments.payment_for_order(order.id).await.unwrap().status, PaymentStatus::Pending);

    let err = orders.delete_order(order.id).await.unwrap_err();
    assert!(matches!(err, OrderApiError::OrderNotFound(_)));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = new_db().await;
    let users = UserApi::new(db.clone(), EventProducers::default());
    users.create_user(NewUser::new("A", "same@example.com", "010-0000-0001", UserRole::User)).await.unwrap();
    let err =
        users.create_user(NewUser::new("B", "same@example.com", "010-0000-0002", UserRole::User)).await.unwrap_err();
    assert!(matches!(err, UserApiError::DuplicateEmail(_)));
}

#[tokio::test]
async fn payment_lookup_errors_name_the_missing_id() {
    let db = new_db().await;
    let payments = PaymentApi::new(db.clone(), EventProducers::default());
    assert!(matches!(payments.payment_by_id(77).await.unwrap_err(), PaymentApiError::PaymentNotFound(77)));
    assert!(matches!(
        payments.payment_for_order(88).await.unwrap_err(),
        PaymentApiError::PaymentForOrderNotFound(88)
    ));
}

/// Wires the cross-domain hooks the way the server does and drives the whole chain through the
/// event system: order created → payment created, order cancelled → payment compensated.
#[tokio::test]
async fn order_events_drive_the_payment_lifecycle() {
    let db = new_db().await;
    let (user, shop) = seed_user_and_shop(&db).await;

    let listener_api = Arc::new(PaymentApi::new(db.clone(), EventProducers::default()));
    let mut hooks = EventHooks::default();
    let api = listener_api.clone();
    hooks.on_order_created(move |ev: OrderCreatedEvent| {
        let api = api.clone();
        Box::pin(async move {
            let payment = NewPayment::new(ev.order_id, ev.user_id, ev.total_amount, PaymentMethod::CreditCard);
            if let Err(e) = api.create_payment(payment).await {
                error!("Payment listener failed for order {}: {e}", ev.order_id);
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    let api = listener_api.clone();
    hooks.on_order_cancelled(move |ev: OrderCancelledEvent| {
        let api = api.clone();
        Box::pin(async move {
            if let Err(e) = api.refund_payment_by_order_id(ev.order_id).await {
                error!("Refund listener failed for order {}: {e}", ev.order_id);
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    });
    let handlers = EventHandlers::new(16, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let orders = OrderApi::new(db.clone(), producers);
    let order = orders.create_order(default_order(&user, &shop)).await.unwrap();

    let payment = wait_for_payment(&db, order.id, None).await.expect("payment was never created by the listener");
    assert_eq!(payment.status, PaymentStatus::Pending);
    assert_eq!(payment.amount, order.total_amount);
    assert_eq!(payment.method, PaymentMethod::CreditCard);

    orders.cancel_order(order.id).await.unwrap();
    let payment = wait_for_payment(&db, order.id, Some(PaymentStatus::Cancelled))
        .await
        .expect("payment was never compensated by the listener");
    assert_eq!(payment.status, PaymentStatus::Cancelled);
}

async fn wait_for_payment(db: &SqliteDatabase, order_id: i64, status: Option<PaymentStatus>) -> Option<Payment> {
    for _ in 0..200 {
        if let Ok(Some(payment)) = db.fetch_payment_for_order(order_id).await {
            if status.map(|s| payment.status == s).unwrap_or(true) {
                return Some(payment);
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    None
}
