use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::OrderApiError,
    db_types::{NewOrder, Order, OrderStatus},
    events::{EventProducers, OrderCancelledEvent, OrderCreatedEvent},
    traits::{OrderStore, ShopStore, UserStore},
};

/// `OrderApi` is the primary API for the order lifecycle. It validates cross-domain
/// preconditions, drives the [`Order`] state machine, persists the results and publishes the
/// order domain events.
///
/// Creation and cancellation publish events; the intermediate confirm/ship/deliver transitions
/// do not.
pub struct OrderApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi")
    }
}

impl<B> OrderApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderApi<B>
where B: OrderStore + UserStore + ShopStore
{
    /// Submit a new order.
    ///
    /// The buyer and the shop must both exist: their domains expose existence checks precisely so
    /// that order creation can validate the references without reading any other user or shop
    /// data. The order is stored in `Pending` status and an [`OrderCreatedEvent`] is published;
    /// the payment domain reacts to that event by opening a payment for the order.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        if order.quantity <= 0 {
            return Err(OrderApiError::InvalidOrder(format!("quantity must be positive, got {}", order.quantity)));
        }
        if order.total_amount.is_negative() {
            return Err(OrderApiError::InvalidOrder(format!(
                "total amount must not be negative, got {}",
                order.total_amount
            )));
        }
        if !self.db.user_exists(order.user_id).await? {
            return Err(OrderApiError::UserNotFound(order.user_id));
        }
        if !self.db.shop_exists(order.shop_id).await? {
            return Err(OrderApiError::ShopNotFound(order.shop_id));
        }
        let order = self.db.insert_order(order).await?;
        debug!("🛒️ Order #{} created for user {} at shop {}", order.id, order.user_id, order.shop_id);
        self.call_order_created_hook(&order).await;
        Ok(order)
    }

    async fn call_order_created_hook(&self, order: &Order) {
        for emitter in &self.producers.order_created {
            trace!("🛒️ Notifying order created subscribers for order #{}", order.id);
            emitter.publish_event(OrderCreatedEvent::from(order)).await;
        }
    }

    /// Confirm a pending order.
    pub async fn confirm_order(&self, id: i64) -> Result<Order, OrderApiError> {
        let mut order = self.order_by_id(id).await?;
        order.confirm()?;
        let order = self.db.update_order_status(order.id, order.status).await?;
        debug!("🛒️ Order #{id} confirmed");
        Ok(order)
    }

    /// Start delivery of a confirmed order.
    pub async fn ship_order(&self, id: i64) -> Result<Order, OrderApiError> {
        let mut order = self.order_by_id(id).await?;
        order.ship()?;
        let order = self.db.update_order_status(order.id, order.status).await?;
        debug!("🛒️ Order #{id} shipped");
        Ok(order)
    }

    /// Mark a shipped order as delivered.
    pub async fn deliver_order(&self, id: i64) -> Result<Order, OrderApiError> {
        let mut order = self.order_by_id(id).await?;
        order.deliver()?;
        let order = self.db.update_order_status(order.id, order.status).await?;
        debug!("🛒️ Order #{id} delivered");
        Ok(order)
    }

    /// Cancel an order that has not shipped yet, and publish an [`OrderCancelledEvent`].
    ///
    /// The payment domain listens for the event and refunds or cancels the associated payment;
    /// this API does not touch payments itself.
    pub async fn cancel_order(&self, id: i64) -> Result<Order, OrderApiError> {
        let mut order = self.order_by_id(id).await?;
        order.cancel()?;
        let order = self.db.update_order_status(order.id, order.status).await?;
        debug!("🛒️ Order #{id} cancelled");
        for emitter in &self.producers.order_cancelled {
            trace!("🛒️ Notifying order cancelled subscribers for order #{id}");
            emitter.publish_event(OrderCancelledEvent::from(&order)).await;
        }
        Ok(order)
    }

    pub async fn order_by_id(&self, id: i64) -> Result<Order, OrderApiError> {
        self.db.fetch_order(id).await?.ok_or(OrderApiError::OrderNotFound(id))
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderApiError> {
        Ok(self.db.fetch_all_orders().await?)
    }

    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderApiError> {
        Ok(self.db.fetch_orders_for_user(user_id).await?)
    }

    pub async fn orders_for_shop(&self, shop_id: i64) -> Result<Vec<Order>, OrderApiError> {
        Ok(self.db.fetch_orders_for_shop(shop_id).await?)
    }

    pub async fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderApiError> {
        Ok(self.db.fetch_orders_with_status(status).await?)
    }

    /// Delete the order row outright. No payment cleanup happens here; compensation for open
    /// payments only runs on the cancellation path.
    pub async fn delete_order(&self, id: i64) -> Result<(), OrderApiError> {
        let order = self.order_by_id(id).await?;
        self.db.delete_order(order.id).await?;
        info!("🛒️ Order #{id} deleted");
        Ok(())
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
