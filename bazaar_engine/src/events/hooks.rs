use std::sync::Arc;

use crate::events::{
    EventHandler,
    EventProducer,
    Handler,
    OrderCancelledEvent,
    OrderCreatedEvent,
    PaymentCompletedEvent,
    PaymentFailedEvent,
    RefundCompletedEvent,
    ShopCreatedEvent,
    UserCreatedEvent,
};

/// The write half of the event system. Service APIs hold one of these and publish to every
/// subscribed producer; an empty producer list makes publication a no-op.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub order_created: Vec<EventProducer<OrderCreatedEvent>>,
    pub order_cancelled: Vec<EventProducer<OrderCancelledEvent>>,
    pub payment_completed: Vec<EventProducer<PaymentCompletedEvent>>,
    pub payment_failed: Vec<EventProducer<PaymentFailedEvent>>,
    pub refund_completed: Vec<EventProducer<RefundCompletedEvent>>,
    pub user_created: Vec<EventProducer<UserCreatedEvent>>,
    pub shop_created: Vec<EventProducer<ShopCreatedEvent>>,
}

impl EventProducers {
    /// Folds another producer set into this one. Used when hooks are registered in stages (the
    /// payment listeners must exist before the order hooks that feed them can be built).
    pub fn merge(&mut self, other: EventProducers) {
        self.order_created.extend(other.order_created);
        self.order_cancelled.extend(other.order_cancelled);
        self.payment_completed.extend(other.payment_completed);
        self.payment_failed.extend(other.payment_failed);
        self.refund_completed.extend(other.refund_completed);
        self.user_created.extend(other.user_created);
        self.shop_created.extend(other.shop_created);
    }
}

/// The read half: one running [`EventHandler`] per registered hook.
pub struct EventHandlers {
    pub on_order_created: Option<EventHandler<OrderCreatedEvent>>,
    pub on_order_cancelled: Option<EventHandler<OrderCancelledEvent>>,
    pub on_payment_completed: Option<EventHandler<PaymentCompletedEvent>>,
    pub on_payment_failed: Option<EventHandler<PaymentFailedEvent>>,
    pub on_refund_completed: Option<EventHandler<RefundCompletedEvent>>,
    pub on_user_created: Option<EventHandler<UserCreatedEvent>>,
    pub on_shop_created: Option<EventHandler<ShopCreatedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        Self {
            on_order_created: hooks.on_order_created.map(|f| EventHandler::new(buffer_size, f)),
            on_order_cancelled: hooks.on_order_cancelled.map(|f| EventHandler::new(buffer_size, f)),
            on_payment_completed: hooks.on_payment_completed.map(|f| EventHandler::new(buffer_size, f)),
            on_payment_failed: hooks.on_payment_failed.map(|f| EventHandler::new(buffer_size, f)),
            on_refund_completed: hooks.on_refund_completed.map(|f| EventHandler::new(buffer_size, f)),
            on_user_created: hooks.on_user_created.map(|f| EventHandler::new(buffer_size, f)),
            on_shop_created: hooks.on_shop_created.map(|f| EventHandler::new(buffer_size, f)),
        }
    }

    /// One producer per registered handler. Hand the result to the service APIs.
    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_order_created {
            result.order_created.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_order_cancelled {
            result.order_cancelled.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_payment_completed {
            result.payment_completed.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_payment_failed {
            result.payment_failed.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_refund_completed {
            result.refund_completed.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_user_created {
            result.user_created.push(handler.subscribe());
        }
        if let Some(handler) = &self.on_shop_created {
            result.shop_created.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_order_created {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_order_cancelled {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_payment_completed {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_payment_failed {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_refund_completed {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_user_created {
            tokio::spawn(handler.start_handler());
        }
        if let Some(handler) = self.on_shop_created {
            tokio::spawn(handler.start_handler());
        }
    }
}

/// Collects the async closures to run when each event fires. Every slot is optional; an
/// unregistered slot means the event is published into the void.
#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_order_created: Option<Handler<OrderCreatedEvent>>,
    pub on_order_cancelled: Option<Handler<OrderCancelledEvent>>,
    pub on_payment_completed: Option<Handler<PaymentCompletedEvent>>,
    pub on_payment_failed: Option<Handler<PaymentFailedEvent>>,
    pub on_refund_completed: Option<Handler<RefundCompletedEvent>>,
    pub on_user_created: Option<Handler<UserCreatedEvent>>,
    pub on_shop_created: Option<Handler<ShopCreatedEvent>>,
}

macro_rules! hook_setter {
    ($name:ident, $ev:ty) => {
        pub fn $name<F>(&mut self, f: F) -> &mut Self
        where F: (Fn($ev) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>) + Send + Sync + 'static
        {
            self.$name = Some(Arc::new(f));
            self
        }
    };
}

impl EventHooks {
    hook_setter!(on_order_created, OrderCreatedEvent);

    hook_setter!(on_order_cancelled, OrderCancelledEvent);

    hook_setter!(on_payment_completed, PaymentCompletedEvent);

    hook_setter!(on_payment_failed, PaymentFailedEvent);

    hook_setter!(on_refund_completed, RefundCompletedEvent);

    hook_setter!(on_user_created, UserCreatedEvent);

    hook_setter!(on_shop_created, ShopCreatedEvent);
}
