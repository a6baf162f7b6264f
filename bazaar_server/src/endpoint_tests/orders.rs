use actix_web::{http::StatusCode, test, web, App};
use bazaar_engine::{
    db_types::{Order, OrderStatus},
    events::EventProducers,
    OrderApi,
};
use serde_json::json;

use crate::{
    endpoint_tests::mocks::{sample_order, MockBackend},
    routes::{ConfirmOrderRoute, CreateOrderRoute, DeleteOrderRoute, OrderByIdRoute, OrdersWithStatusRoute},
};

macro_rules! orders_app {
    ($backend:expr, $($route:ident),+) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(OrderApi::new($backend, EventProducers::default())))
                $( .service($route::<MockBackend>::new()) )+
        )
        .await
    };
}

#[actix_web::test]
async fn create_order_returns_201() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_user_exists().returning(|_| Ok(true));
    backend.expect_shop_exists().returning(|_| Ok(true));
    backend.expect_insert_order().returning(|_| Ok(sample_order(1, OrderStatus::Pending)));
    let app = orders_app!(backend, CreateOrderRoute);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "user_id": 1,
            "shop_id": 1,
            "product_name": "Mechanical keyboard",
            "quantity": 2,
            "total_amount": 50000,
            "delivery_address": "123 Delivery Lane"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Order = test::read_body_json(resp).await;
    assert_eq!(order.id, 1);
    assert_eq!(order.status, OrderStatus::Pending);
}

#[actix_web::test]
async fn create_order_with_unknown_buyer_is_404() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_user_exists().returning(|_| Ok(false));
    let app = orders_app!(backend, CreateOrderRoute);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "user_id": 99,
            "shop_id": 1,
            "product_name": "Mechanical keyboard",
            "quantity": 2,
            "total_amount": 50000,
            "delivery_address": "123 Delivery Lane"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("User ID: 99"), "unexpected body: {body}");
}

#[actix_web::test]
async fn create_order_with_zero_quantity_is_400() {
    let _ = env_logger::try_init();
    let backend = MockBackend::new();
    let app = orders_app!(backend, CreateOrderRoute);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(json!({
            "user_id": 1,
            "shop_id": 1,
            "product_name": "Mechanical keyboard",
            "quantity": 0,
            "total_amount": 50000,
            "delivery_address": "123 Delivery Lane"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn missing_order_is_404() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_order().returning(|_| Ok(None));
    let app = orders_app!(backend, OrderByIdRoute);

    let req = test::TestRequest::get().uri("/orders/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn confirming_a_shipped_order_is_409() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Shipped))));
    let app = orders_app!(backend, ConfirmOrderRoute);

    let req = test::TestRequest::patch().uri("/orders/1/confirm").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("only a pending order may be confirmed"), "unexpected body: {body}");
}

#[actix_web::test]
async fn unknown_status_segment_is_400() {
    let _ = env_logger::try_init();
    let backend = MockBackend::new();
    let app = orders_app!(backend, OrdersWithStatusRoute);

    let req = test::TestRequest::get().uri("/orders/status/preparing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_order_returns_204() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_order().returning(|id| Ok(Some(sample_order(id, OrderStatus::Pending))));
    backend.expect_delete_order().returning(|_| Ok(true));
    let app = orders_app!(backend, DeleteOrderRoute);

    let req = test::TestRequest::delete().uri("/orders/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
