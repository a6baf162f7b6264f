use crate::{
    db_types::{NewOrder, Order, OrderStatus},
    traits::StoreError,
};

/// Persistence contract for the order aggregate.
///
/// The store persists whatever status the caller hands it; the legality of the transition has
/// already been checked by the [`Order`] state machine before `update_order_status` is called.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Inserts a new order in `Pending` status and returns the stored row.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError>;

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StoreError>;

    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError>;

    async fn fetch_orders_for_shop(&self, shop_id: i64) -> Result<Vec<Order>, StoreError>;

    async fn fetch_orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>, StoreError>;

    /// Persists a status change, bumping `updated_at`. Fails with
    /// [`StoreError::OrderNotFound`] if the row has vanished.
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, StoreError>;

    /// Deletes the row. Returns `false` if there was nothing to delete.
    async fn delete_order(&self, id: i64) -> Result<bool, StoreError>;
}
