use actix_web::{http::StatusCode, test, web, App};
use bazaar_engine::{
    db_types::{User, UserRole},
    events::EventProducers,
    UserApi,
};
use serde_json::json;

use crate::{
    endpoint_tests::mocks::{sample_user, MockBackend},
    routes::{CreateUserRoute, UpdateUserRoleRoute, UserByEmailRoute},
};

macro_rules! users_app {
    ($backend:expr, $($route:ident),+) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(UserApi::new($backend, EventProducers::default())))
                $( .service($route::<MockBackend>::new()) )+
        )
        .await
    };
}

#[actix_web::test]
async fn create_user_returns_201_and_defaults_the_role() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_email_exists().returning(|_| Ok(false));
    backend.expect_insert_user().returning(|new_user| {
        assert_eq!(new_user.role, UserRole::User);
        Ok(sample_user(1))
    });
    let app = users_app!(backend, CreateUserRoute);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "name": "Test Buyer",
            "email": "buyer@example.com",
            "phone_number": "010-1234-5678"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: User = test::read_body_json(resp).await;
    assert_eq!(user.email, "buyer@example.com");
}

#[actix_web::test]
async fn duplicate_email_is_400() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_email_exists().returning(|_| Ok(true));
    let app = users_app!(backend, CreateUserRoute);

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({
            "name": "Test Buyer",
            "email": "buyer@example.com",
            "phone_number": "010-1234-5678"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("already exists"), "unexpected body: {body}");
}

#[actix_web::test]
async fn user_lookup_by_email() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_fetch_user_by_email().returning(|email| {
        let mut user = sample_user(1);
        user.email = email.to_string();
        Ok(Some(user))
    });
    let app = users_app!(backend, UserByEmailRoute);

    let req = test::TestRequest::get().uri("/users/email/someone@example.com").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = test::read_body_json(resp).await;
    assert_eq!(user.email, "someone@example.com");
}

#[actix_web::test]
async fn role_update_for_missing_user_is_404() {
    let _ = env_logger::try_init();
    let mut backend = MockBackend::new();
    backend.expect_update_user_role().returning(|_, _| Ok(None));
    let app = users_app!(backend, UpdateUserRoleRoute);

    let req = test::TestRequest::patch().uri("/users/5/role").set_json(json!({"role": "Admin"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
