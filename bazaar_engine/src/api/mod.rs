//! # Bazaar engine public API
//!
//! The `api` module exposes the programmatic API of the commerce engine. The API is modular so
//! that clients can pick the functionality they need, or run different domains against different
//! backends.
//!
//! * [`order_api`] orchestrates the order lifecycle: creation (with buyer and shop validation),
//!   the confirm/ship/deliver/cancel transitions, reads and deletion.
//! * [`payment_api`] orchestrates payments: creation, processing against a
//!   [`payment_api::PaymentGateway`], refunds and cancellation — including the order-cancellation
//!   reconciliation in [`payment_api::PaymentApi::refund_payment_by_order_id`].
//! * [`shop_api`] and [`user_api`] are thin orchestration over their stores.
//!
//! The pattern for using all the APIs is the same: an instance is created by supplying a storage
//! backend that implements the required store traits, plus the [`EventProducers`] the API should
//! publish its domain events to.
//!
//! ```rust,ignore
//! use bazaar_engine::{events::EventProducers, OrderApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/bazaar.db", 5).await?;
//! let api = OrderApi::new(db, EventProducers::default());
//! let order = api.order_by_id(42).await?;
//! ```
//!
//! [`EventProducers`]: crate::events::EventProducers
pub mod errors;
pub mod order_api;
pub mod payment_api;
pub mod shop_api;
pub mod user_api;
