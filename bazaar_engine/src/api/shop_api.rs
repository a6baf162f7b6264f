use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::ShopApiError,
    db_types::{NewShop, Shop, ShopCategory},
    events::{EventProducers, ShopCreatedEvent},
    traits::ShopStore,
};

/// CRUD orchestration for the shop domain. Creation publishes a [`ShopCreatedEvent`]; everything
/// else is lookups and field updates.
pub struct ShopApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for ShopApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShopApi")
    }
}

impl<B> ShopApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> ShopApi<B>
where B: ShopStore
{
    pub async fn create_shop(&self, shop: NewShop) -> Result<Shop, ShopApiError> {
        let shop = self.db.insert_shop(shop).await?;
        debug!("🏪️ Shop #{} ({}) registered", shop.id, shop.name);
        let event = ShopCreatedEvent {
            shop_id: shop.id,
            name: shop.name.clone(),
            category: shop.category,
            owner_id: shop.owner_id,
        };
        for emitter in &self.producers.shop_created {
            emitter.publish_event(event.clone()).await;
        }
        Ok(shop)
    }

    pub async fn shop_by_id(&self, id: i64) -> Result<Shop, ShopApiError> {
        self.db.fetch_shop(id).await?.ok_or(ShopApiError::ShopNotFound(id))
    }

    pub async fn all_shops(&self) -> Result<Vec<Shop>, ShopApiError> {
        Ok(self.db.fetch_all_shops().await?)
    }

    pub async fn shops_with_category(&self, category: ShopCategory) -> Result<Vec<Shop>, ShopApiError> {
        Ok(self.db.fetch_shops_with_category(category).await?)
    }

    pub async fn shops_for_owner(&self, owner_id: i64) -> Result<Vec<Shop>, ShopApiError> {
        Ok(self.db.fetch_shops_for_owner(owner_id).await?)
    }

    pub async fn active_shops(&self) -> Result<Vec<Shop>, ShopApiError> {
        Ok(self.db.fetch_active_shops().await?)
    }

    pub async fn update_shop_info(
        &self,
        id: i64,
        name: &str,
        description: &str,
        address: &str,
        phone_number: &str,
    ) -> Result<Shop, ShopApiError> {
        self.db
            .update_shop_info(id, name, description, address, phone_number)
            .await?
            .ok_or(ShopApiError::ShopNotFound(id))
    }

    pub async fn update_shop_category(&self, id: i64, category: ShopCategory) -> Result<Shop, ShopApiError> {
        self.db.update_shop_category(id, category).await?.ok_or(ShopApiError::ShopNotFound(id))
    }

    pub async fn activate_shop(&self, id: i64) -> Result<Shop, ShopApiError> {
        let shop = self.db.set_shop_active(id, true).await?.ok_or(ShopApiError::ShopNotFound(id))?;
        debug!("🏪️ Shop #{id} activated");
        Ok(shop)
    }

    pub async fn deactivate_shop(&self, id: i64) -> Result<Shop, ShopApiError> {
        let shop = self.db.set_shop_active(id, false).await?.ok_or(ShopApiError::ShopNotFound(id))?;
        debug!("🏪️ Shop #{id} deactivated");
        Ok(shop)
    }

    pub async fn delete_shop(&self, id: i64) -> Result<(), ShopApiError> {
        let shop = self.shop_by_id(id).await?;
        self.db.delete_shop(shop.id).await?;
        info!("🏪️ Shop #{id} deleted");
        Ok(())
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
