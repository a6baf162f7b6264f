//! Bazaar Engine
//!
//! The Bazaar engine is the domain core of a multi-domain e-commerce backend: users, shops,
//! orders and payments. It is HTTP-framework agnostic; the REST surface lives in the
//! `bazaar_server` crate.
//!
//! The library is divided into three main sections:
//! 1. Storage management ([`mod@traits`] and the SQLite backend). Low-level access lives behind
//!    four store traits, one per aggregate, so that the orchestration layer never speaks SQL.
//!    The data types used by the stores are defined in [`mod@db_types`] and are public; the
//!    `Order` and `Payment` types carry their own state machines.
//! 2. The public API ([`mod@api`]). [`OrderApi`] and [`PaymentApi`] orchestrate the order and
//!    payment lifecycles (cross-domain validation, transitions, event publication);
//!    [`ShopApi`] and [`UserApi`] provide the supporting CRUD surfaces.
//! 3. The event system ([`mod@events`]). Services publish domain events (order created, order
//!    cancelled, payment completed, …) over bounded in-process channels; subscribers react
//!    asynchronously. The order → payment glue (create a payment when an order is created,
//!    refund or cancel it when the order is cancelled) is wired through these hooks.
mod api;

pub mod db_types;
pub mod events;
pub mod helpers;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use api::{
    errors::{OrderApiError, PaymentApiError, ShopApiError, UserApiError},
    order_api::OrderApi,
    payment_api::{AutoApprovingGateway, PaymentApi, PaymentGateway},
    shop_api::ShopApi,
    user_api::UserApi,
};
