use actix_web::{http::StatusCode, test, web, App};
use bazaar_engine::{db_types::Shop, events::EventProducers, ShopApi};
use serde_json::json;

use crate::{
    endpoint_tests::mocks::{sample_shop, MockBackend},
    routes::{ActivateShopRoute, ActiveShopsRoute, CreateShopRoute, ShopByIdRoute},
};

macro_rules! shops_app {
    ($backend:expr, $($route:ident),+) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(ShopApi::new($backend, EventProducers::default())))
                $( .service($route::<MockBackend>::new()) )+
        )
        .await
    };
}

#[actix_web::test]
async fn create_shop_returns_201() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_insert_shop().returning(|_| Ok(sample_shop(1)));
    let app = shops_app!(backend, CreateShopRoute);

    let req = test::TestRequest::post()
        .uri("/shops")
        .set_json(json!({
            "name": "Test Shop",
            "category": "Electronics",
            "description": "Gadgets and parts",
            "address": "1 Market Street",
            "phone_number": "02-555-0100",
            "owner_id": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let shop: Shop = test::read_body_json(resp).await;
    assert_eq!(shop.id, 1);
    assert!(shop.is_active);
}

#[actix_web::test]
async fn activating_a_missing_shop_is_404() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_set_shop_active().returning(|_, _| Ok(None));
    let app = shops_app!(backend, ActivateShopRoute);

    let req = test::TestRequest::patch().uri("/shops/9/activate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn active_route_is_not_shadowed_by_the_id_route() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_active_shops().returning(|| Ok(vec![sample_shop(1), sample_shop(2)]));
    // register /shops/active ahead of /shops/{id}, as the server does
    let app = shops_app!(backend, ActiveShopsRoute, ShopByIdRoute);

    let req = test::TestRequest::get().uri("/shops/active").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let shops: Vec<Shop> = test::read_body_json(resp).await;
    assert_eq!(shops.len(), 2);
}
