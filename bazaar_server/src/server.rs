use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bazaar_engine::{events::EventProducers, OrderApi, PaymentApi, ShopApi, SqliteDatabase, UserApi};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    listeners::start_event_pipeline,
    routes::{
        health,
        ActivateShopRoute,
        ActiveShopsRoute,
        AllOrdersRoute,
        AllPaymentsRoute,
        AllShopsRoute,
        AllUsersRoute,
        CancelOrderRoute,
        CancelPaymentRoute,
        ConfirmOrderRoute,
        CreateOrderRoute,
        CreateShopRoute,
        CreateUserRoute,
        DeactivateShopRoute,
        DeleteOrderRoute,
        DeleteShopRoute,
        DeleteUserRoute,
        DeliverOrderRoute,
        OrderByIdRoute,
        OrdersForShopRoute,
        OrdersForUserRoute,
        OrdersWithStatusRoute,
        PaymentByIdRoute,
        PaymentForOrderRoute,
        PaymentsForUserRoute,
        PaymentsWithStatusRoute,
        ProcessPaymentRoute,
        RefundPaymentRoute,
        ShipOrderRoute,
        ShopByIdRoute,
        ShopsForOwnerRoute,
        ShopsWithCategoryRoute,
        UpdateShopCategoryRoute,
        UpdateShopRoute,
        UpdateUserProfileRoute,
        UpdateUserRoleRoute,
        UserByEmailRoute,
        UserByIdRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let producers = start_event_pipeline(db.clone(), config.event_buffer_size).await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderApi::new(db.clone(), producers.clone());
        let payments_api = PaymentApi::new(db.clone(), producers.clone());
        let shops_api = ShopApi::new(db.clone(), producers.clone());
        let users_api = UserApi::new(db.clone(), producers.clone());
        // Routes with literal segments are registered before their `{id}` siblings so that
        // e.g. /shops/active never matches the id pattern.
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("bazaar::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(shops_api))
            .app_data(web::Data::new(users_api))
            .service(health)
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(AllOrdersRoute::<SqliteDatabase>::new())
            .service(OrdersForUserRoute::<SqliteDatabase>::new())
            .service(OrdersForShopRoute::<SqliteDatabase>::new())
            .service(OrdersWithStatusRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(ConfirmOrderRoute::<SqliteDatabase>::new())
            .service(ShipOrderRoute::<SqliteDatabase>::new())
            .service(DeliverOrderRoute::<SqliteDatabase>::new())
            .service(CancelOrderRoute::<SqliteDatabase>::new())
            .service(DeleteOrderRoute::<SqliteDatabase>::new())
            .service(AllPaymentsRoute::<SqliteDatabase>::new())
            .service(PaymentForOrderRoute::<SqliteDatabase>::new())
            .service(PaymentsForUserRoute::<SqliteDatabase>::new())
            .service(PaymentsWithStatusRoute::<SqliteDatabase>::new())
            .service(PaymentByIdRoute::<SqliteDatabase>::new())
            .service(ProcessPaymentRoute::<SqliteDatabase>::new())
            .service(RefundPaymentRoute::<SqliteDatabase>::new())
            .service(CancelPaymentRoute::<SqliteDatabase>::new())
            .service(CreateShopRoute::<SqliteDatabase>::new())
            .service(AllShopsRoute::<SqliteDatabase>::new())
            .service(ActiveShopsRoute::<SqliteDatabase>::new())
            .service(ShopsWithCategoryRoute::<SqliteDatabase>::new())
            .service(ShopsForOwnerRoute::<SqliteDatabase>::new())
            .service(ShopByIdRoute::<SqliteDatabase>::new())
            .service(UpdateShopRoute::<SqliteDatabase>::new())
            .service(UpdateShopCategoryRoute::<SqliteDatabase>::new())
            .service(ActivateShopRoute::<SqliteDatabase>::new())
            .service(DeactivateShopRoute::<SqliteDatabase>::new())
            .service(DeleteShopRoute::<SqliteDatabase>::new())
            .service(CreateUserRoute::<SqliteDatabase>::new())
            .service(AllUsersRoute::<SqliteDatabase>::new())
            .service(UserByEmailRoute::<SqliteDatabase>::new())
            .service(UserByIdRoute::<SqliteDatabase>::new())
            .service(UpdateUserProfileRoute::<SqliteDatabase>::new())
            .service(UpdateUserRoleRoute::<SqliteDatabase>::new())
            .service(DeleteUserRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
