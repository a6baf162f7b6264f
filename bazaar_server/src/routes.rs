//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go
//! into a separate module. Keep this module neat and tidy 🙏
//!
//! Since each worker thread processes its requests sequentially, handlers which block the
//! current thread will stall that worker. Every handler here awaits the engine instead of
//! blocking, so workers keep serving other requests while the database does its work.
use std::str::FromStr;

use actix_web::{get, web, HttpResponse, Responder};
use log::*;

use bazaar_engine::{
    db_types::{OrderStatus, PaymentStatus, ShopCategory},
    traits::{OrderStore, PaymentStore, ShopStore, UserStore},
    OrderApi,
    PaymentApi,
    ShopApi,
    UserApi,
};

use crate::{
    data_objects::{
        CreateOrderRequest,
        CreateShopRequest,
        CreateUserRequest,
        UpdateShopCategoryRequest,
        UpdateShopRequest,
        UpdateUserProfileRequest,
        UpdateUserRoleRequest,
    },
    errors::ServerError,
};

// Actix cannot handle generics in handlers, so the registration glue is generated with the
// `route!` macro: one unit struct per route, implementing `HttpServiceFactory` for any backend
// that satisfies the listed store traits.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>); }
        paste::paste! {
            impl<B> [<$name:camel Route>]<B> {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self {
                    Self(core::marker::PhantomData)
                }
            }
        }
        paste::paste! {
            impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
            where B: $($bounds +)+ 'static
            {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name::<B>);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };
}

// ----------------------------------------------   Health  -----------------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

// ----------------------------------------------   Orders  -----------------------------------------------------------
route!(create_order => Post "/orders" impl OrderStore, UserStore, ShopStore);
/// Creates a new order in `Pending` status.
///
/// The buyer and shop references are validated against their domains; a dangling reference is a
/// 404. The payment for the order is opened asynchronously by the order-created listener, not by
/// this handler.
pub async fn create_order<B>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderStore + UserStore + ShopStore,
{
    let req = body.into_inner();
    debug!("💻️ POST order for user {} at shop {}", req.user_id, req.shop_id);
    let order = api.create_order(req.into()).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(all_orders => Get "/orders" impl OrderStore, UserStore, ShopStore);
pub async fn all_orders<B>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let orders = api.all_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_for_user => Get "/orders/user/{id}" impl OrderStore, UserStore, ShopStore);
pub async fn orders_for_user<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let orders = api.orders_for_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_for_shop => Get "/orders/shop/{id}" impl OrderStore, UserStore, ShopStore);
pub async fn orders_for_shop<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let orders = api.orders_for_shop(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_with_status => Get "/orders/status/{status}" impl OrderStore, UserStore, ShopStore);
pub async fn orders_with_status<B>(
    path: web::Path<String>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: OrderStore + UserStore + ShopStore,
{
    let status =
        OrderStatus::from_str(&path.into_inner()).map_err(|e| ServerError::InvalidRequestPath(e.to_string()))?;
    let orders = api.orders_with_status(status).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/orders/{id}" impl OrderStore, UserStore, ShopStore);
pub async fn order_by_id<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let order = api.order_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(confirm_order => Patch "/orders/{id}/confirm" impl OrderStore, UserStore, ShopStore);
pub async fn confirm_order<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let id = path.into_inner();
    debug!("💻️ PATCH confirm order {id}");
    let order = api.confirm_order(id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(ship_order => Patch "/orders/{id}/ship" impl OrderStore, UserStore, ShopStore);
pub async fn ship_order<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let id = path.into_inner();
    debug!("💻️ PATCH ship order {id}");
    let order = api.ship_order(id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(deliver_order => Patch "/orders/{id}/deliver" impl OrderStore, UserStore, ShopStore);
pub async fn deliver_order<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let id = path.into_inner();
    debug!("💻️ PATCH deliver order {id}");
    let order = api.deliver_order(id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(cancel_order => Patch "/orders/{id}/cancel" impl OrderStore, UserStore, ShopStore);
pub async fn cancel_order<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let id = path.into_inner();
    debug!("💻️ PATCH cancel order {id}");
    let order = api.cancel_order(id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(delete_order => Delete "/orders/{id}" impl OrderStore, UserStore, ShopStore);
pub async fn delete_order<B>(path: web::Path<i64>, api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError>
where B: OrderStore + UserStore + ShopStore {
    let id = path.into_inner();
    debug!("💻️ DELETE order {id}");
    api.delete_order(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---------------------------------------------   Payments  ----------------------------------------------------------
route!(all_payments => Get "/payments" impl PaymentStore);
pub async fn all_payments<B: PaymentStore>(api: web::Data<PaymentApi<B>>) -> Result<HttpResponse, ServerError> {
    let payments = api.all_payments().await?;
    Ok(HttpResponse::Ok().json(payments))
}

route!(payment_for_order => Get "/payments/order/{order_id}" impl PaymentStore);
pub async fn payment_for_order<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payment = api.payment_for_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(payments_for_user => Get "/payments/user/{id}" impl PaymentStore);
pub async fn payments_for_user<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payments = api.payments_for_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payments))
}

route!(payments_with_status => Get "/payments/status/{status}" impl PaymentStore);
pub async fn payments_with_status<B: PaymentStore>(
    path: web::Path<String>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let status =
        PaymentStatus::from_str(&path.into_inner()).map_err(|e| ServerError::InvalidRequestPath(e.to_string()))?;
    let payments = api.payments_with_status(status).await?;
    Ok(HttpResponse::Ok().json(payments))
}

route!(payment_by_id => Get "/payments/{id}" impl PaymentStore);
pub async fn payment_by_id<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payment = api.payment_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(process_payment => Post "/payments/{id}/process" impl PaymentStore);
/// Runs a pending payment through the gateway; the response carries the final `Completed` or
/// `Failed` state.
pub async fn process_payment<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ POST process payment {id}");
    let payment = api.process_payment(id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(refund_payment => Post "/payments/{id}/refund" impl PaymentStore);
pub async fn refund_payment<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ POST refund payment {id}");
    let payment = api.refund_payment(id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(cancel_payment => Post "/payments/{id}/cancel" impl PaymentStore);
pub async fn cancel_payment<B: PaymentStore>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ POST cancel payment {id}");
    let payment = api.cancel_payment(id).await?;
    Ok(HttpResponse::Ok().json(payment))
}

// -----------------------------------------------   Shops  -----------------------------------------------------------
route!(create_shop => Post "/shops" impl ShopStore);
pub async fn create_shop<B: ShopStore>(
    body: web::Json<CreateShopRequest>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST shop {} for owner {}", req.name, req.owner_id);
    let shop = api.create_shop(req.into()).await?;
    Ok(HttpResponse::Created().json(shop))
}

route!(all_shops => Get "/shops" impl ShopStore);
pub async fn all_shops<B: ShopStore>(api: web::Data<ShopApi<B>>) -> Result<HttpResponse, ServerError> {
    let shops = api.all_shops().await?;
    Ok(HttpResponse::Ok().json(shops))
}

route!(shops_with_category => Get "/shops/category/{category}" impl ShopStore);
pub async fn shops_with_category<B: ShopStore>(
    path: web::Path<String>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let category =
        ShopCategory::from_str(&path.into_inner()).map_err(|e| ServerError::InvalidRequestPath(e.to_string()))?;
    let shops = api.shops_with_category(category).await?;
    Ok(HttpResponse::Ok().json(shops))
}

route!(active_shops => Get "/shops/active" impl ShopStore);
pub async fn active_shops<B: ShopStore>(api: web::Data<ShopApi<B>>) -> Result<HttpResponse, ServerError> {
    let shops = api.active_shops().await?;
    Ok(HttpResponse::Ok().json(shops))
}

route!(shops_for_owner => Get "/shops/owner/{id}" impl ShopStore);
pub async fn shops_for_owner<B: ShopStore>(
    path: web::Path<i64>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shops = api.shops_for_owner(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shops))
}

route!(shop_by_id => Get "/shops/{id}" impl ShopStore);
pub async fn shop_by_id<B: ShopStore>(
    path: web::Path<i64>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shop = api.shop_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shop))
}

route!(update_shop => Put "/shops/{id}" impl ShopStore);
pub async fn update_shop<B: ShopStore>(
    path: web::Path<i64>,
    body: web::Json<UpdateShopRequest>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let req = body.into_inner();
    debug!("💻️ PUT shop {id}");
    let shop = api.update_shop_info(id, &req.name, &req.description, &req.address, &req.phone_number).await?;
    Ok(HttpResponse::Ok().json(shop))
}

route!(update_shop_category => Patch "/shops/{id}/category" impl ShopStore);
pub async fn update_shop_category<B: ShopStore>(
    path: web::Path<i64>,
    body: web::Json<UpdateShopCategoryRequest>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shop = api.update_shop_category(path.into_inner(), body.into_inner().category).await?;
    Ok(HttpResponse::Ok().json(shop))
}

route!(activate_shop => Patch "/shops/{id}/activate" impl ShopStore);
pub async fn activate_shop<B: ShopStore>(
    path: web::Path<i64>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shop = api.activate_shop(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shop))
}

route!(deactivate_shop => Patch "/shops/{id}/deactivate" impl ShopStore);
pub async fn deactivate_shop<B: ShopStore>(
    path: web::Path<i64>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shop = api.deactivate_shop(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shop))
}

route!(delete_shop => Delete "/shops/{id}" impl ShopStore);
pub async fn delete_shop<B: ShopStore>(
    path: web::Path<i64>,
    api: web::Data<ShopApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE shop {id}");
    api.delete_shop(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// -----------------------------------------------   Users  -----------------------------------------------------------
route!(create_user => Post "/users" impl UserStore);
pub async fn create_user<B: UserStore>(
    body: web::Json<CreateUserRequest>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST user with email {}", req.email);
    let user = api.create_user(req.into()).await?;
    Ok(HttpResponse::Created().json(user))
}

route!(all_users => Get "/users" impl UserStore);
pub async fn all_users<B: UserStore>(api: web::Data<UserApi<B>>) -> Result<HttpResponse, ServerError> {
    let users = api.all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(user_by_email => Get "/users/email/{email}" impl UserStore);
pub async fn user_by_email<B: UserStore>(
    path: web::Path<String>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.user_by_email(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(user_by_id => Get "/users/{id}" impl UserStore);
pub async fn user_by_id<B: UserStore>(
    path: web::Path<i64>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.user_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(update_user_profile => Patch "/users/{id}/profile" impl UserStore);
pub async fn update_user_profile<B: UserStore>(
    path: web::Path<i64>,
    body: web::Json<UpdateUserProfileRequest>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let user = api.update_user_profile(path.into_inner(), &req.name, &req.phone_number).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(update_user_role => Patch "/users/{id}/role" impl UserStore);
pub async fn update_user_role<B: UserStore>(
    path: web::Path<i64>,
    body: web::Json<UpdateUserRoleRequest>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = api.update_user_role(path.into_inner(), body.into_inner().role).await?;
    Ok(HttpResponse::Ok().json(user))
}

route!(delete_user => Delete "/users/{id}" impl UserStore);
pub async fn delete_user<B: UserStore>(
    path: web::Path<i64>,
    api: web::Data<UserApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ DELETE user {id}");
    api.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
