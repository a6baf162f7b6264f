use actix_web::{http::StatusCode, test, web, App};
use bazaar_engine::{
    db_types::{Payment, PaymentStatus},
    events::EventProducers,
    PaymentApi,
};

use crate::{
    endpoint_tests::mocks::{sample_payment, MockBackend},
    routes::{PaymentForOrderRoute, PaymentsWithStatusRoute, ProcessPaymentRoute, RefundPaymentRoute},
};

macro_rules! payments_app {
    ($backend:expr, $($route:ident),+) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(PaymentApi::new($backend, EventProducers::default())))
                $( .service($route::<MockBackend>::new()) )+
        )
        .await
    };
}

#[actix_web::test]
async fn processing_a_pending_payment_completes_it() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_payment().returning(|id| Ok(Some(sample_payment(id, PaymentStatus::Pending))));
    backend.expect_update_payment().returning(|p| Ok(p.clone()));
    let app = payments_app!(backend, ProcessPaymentRoute);

    let req = test::TestRequest::post().uri("/payments/1/process").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let payment: Payment = test::read_body_json(resp).await;
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert!(payment.transaction_id.unwrap().starts_with("TXN-"));
    assert!(payment.completed_at.is_some());
}

#[actix_web::test]
async fn processing_a_completed_payment_is_409() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_payment().returning(|id| Ok(Some(sample_payment(id, PaymentStatus::Completed))));
    let app = payments_app!(backend, ProcessPaymentRoute);

    let req = test::TestRequest::post().uri("/payments/1/process").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn refunding_a_pending_payment_is_409() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_payment().returning(|id| Ok(Some(sample_payment(id, PaymentStatus::Pending))));
    let app = payments_app!(backend, RefundPaymentRoute);

    let req = test::TestRequest::post().uri("/payments/1/refund").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("payment cannot be refunded in its current state"), "unexpected body: {body}");
}

#[actix_web::test]
async fn missing_payment_for_order_is_404() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_payment_for_order().returning(|_| Ok(None));
    let app = payments_app!(backend, PaymentForOrderRoute);

    let req = test::TestRequest::get().uri("/payments/order/7").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn payments_filter_by_status() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend
        .expect_fetch_payments_with_status()
        .returning(|status| Ok(vec![sample_payment(1, status), sample_payment(2, status)]));
    let app = payments_app!(backend, PaymentsWithStatusRoute);

    let req = test::TestRequest::get().uri("/payments/status/refunded").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let payments: Vec<Payment> = test::read_body_json(resp).await;
    assert_eq!(payments.len(), 2);
    assert!(payments.iter().all(|p| p.status == PaymentStatus::Refunded));
}
