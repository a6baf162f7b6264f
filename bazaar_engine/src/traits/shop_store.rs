use crate::{
    db_types::{NewShop, Shop, ShopCategory},
    traits::StoreError,
};

/// Persistence contract for the shop aggregate. `shop_exists` is the capability the order domain
/// consumes when validating a new order.
#[allow(async_fn_in_trait)]
pub trait ShopStore {
    async fn insert_shop(&self, shop: NewShop) -> Result<Shop, StoreError>;

    async fn fetch_shop(&self, id: i64) -> Result<Option<Shop>, StoreError>;

    async fn fetch_all_shops(&self) -> Result<Vec<Shop>, StoreError>;

    async fn fetch_shops_with_category(&self, category: ShopCategory) -> Result<Vec<Shop>, StoreError>;

    async fn fetch_shops_for_owner(&self, owner_id: i64) -> Result<Vec<Shop>, StoreError>;

    async fn fetch_active_shops(&self) -> Result<Vec<Shop>, StoreError>;

    async fn shop_exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Replaces the descriptive fields of a shop. Returns `None` if the shop does not exist.
    async fn update_shop_info(
        &self,
        id: i64,
        name: &str,
        description: &str,
        address: &str,
        phone_number: &str,
    ) -> Result<Option<Shop>, StoreError>;

    async fn update_shop_category(&self, id: i64, category: ShopCategory) -> Result<Option<Shop>, StoreError>;

    /// Flips the active flag. Returns `None` if the shop does not exist.
    async fn set_shop_active(&self, id: i64, active: bool) -> Result<Option<Shop>, StoreError>;

    async fn delete_shop(&self, id: i64) -> Result<bool, StoreError>;
}
