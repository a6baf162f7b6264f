//! `SqliteDatabase` is the concrete SQLite storage backend for the Bazaar engine.
//!
//! It holds a connection pool and implements all four store traits by delegating to the
//! low-level functions in [`super::db`].
use std::fmt::Debug;

use log::info;
use sqlx::SqlitePool;

use super::db::{new_pool, orders, payments, shops, users};
use crate::{
    db_types::{
        NewOrder,
        NewPayment,
        NewShop,
        NewUser,
        Order,
        OrderStatus,
        Payment,
        PaymentStatus,
        Shop,
        ShopCategory,
        User,
        UserRole,
    },
    traits::{OrderStore, PaymentStore, ShopStore, StoreError, UserStore},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new connection pool against the given URL.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Applies any pending schema migrations.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./src/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        info!("🗃️ Migrations complete");
        Ok(())
    }
}

impl UserStore for SqliteDatabase {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut conn = self.pool.acquire().await?;
        users::insert_user(user, &mut conn).await
    }

    async fn fetch_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_user_by_id(id, &mut conn).await?)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_user_by_email(email, &mut conn).await?)
    }

    async fn fetch_all_users(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::fetch_all_users(&mut conn).await?)
    }

    async fn user_exists(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::user_exists(id, &mut conn).await?)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::email_exists(email, &mut conn).await?)
    }

    async fn update_user_profile(&self, id: i64, name: &str, phone_number: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        users::update_user_profile(id, name, phone_number, &mut conn).await
    }

    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        users::update_user_role(id, role, &mut conn).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::delete_user(id, &mut conn).await?)
    }
}

impl ShopStore for SqliteDatabase {
    async fn insert_shop(&self, shop: NewShop) -> Result<Shop, StoreError> {
        let mut conn = self.pool.acquire().await?;
        shops::insert_shop(shop, &mut conn).await
    }

    async fn fetch_shop(&self, id: i64) -> Result<Option<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::fetch_shop_by_id(id, &mut conn).await?)
    }

    async fn fetch_all_shops(&self) -> Result<Vec<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::fetch_all_shops(&mut conn).await?)
    }

    async fn fetch_shops_with_category(&self, category: ShopCategory) -> Result<Vec<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::fetch_shops_with_category(category, &mut conn).await?)
    }

    async fn fetch_shops_for_owner(&self, owner_id: i64) -> Result<Vec<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::fetch_shops_for_owner(owner_id, &mut conn).await?)
    }

    async fn fetch_active_shops(&self) -> Result<Vec<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::fetch_active_shops(&mut conn).await?)
    }

    async fn shop_exists(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::shop_exists(id, &mut conn).await?)
    }

    async fn update_shop_info(
        &self,
        id: i64,
        name: &str,
        description: &str,
        address: &str,
        phone_number: &str,
    ) -> Result<Option<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        shops::update_shop_info(id, name, description, address, phone_number, &mut conn).await
    }

    async fn update_shop_category(&self, id: i64, category: ShopCategory) -> Result<Option<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        shops::update_shop_category(id, category, &mut conn).await
    }

    async fn set_shop_active(&self, id: i64, active: bool) -> Result<Option<Shop>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        shops::set_shop_active(id, active, &mut conn).await
    }

    async fn delete_shop(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(shops::delete_shop(id, &mut conn).await?)
    }
}

impl OrderStore for SqliteDatabase {
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_by_id(id, &mut conn).await?)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_all_orders(&mut conn).await?)
    }

    async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders_for_user(user_id, &mut conn).await?)
    }

    async fn fetch_orders_for_shop(&self, shop_id: i64) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders_for_shop(shop_id, &mut conn).await?)
    }

    async fn fetch_orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_orders_with_status(status, &mut conn).await?)
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::update_order_status(id, status, &mut conn).await
    }

    async fn delete_order(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::delete_order(id, &mut conn).await?)
    }
}

impl PaymentStore for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_payment_by_id(id, &mut conn).await?)
    }

    async fn fetch_payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_payment_for_order(order_id, &mut conn).await?)
    }

    async fn fetch_all_payments(&self) -> Result<Vec<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_all_payments(&mut conn).await?)
    }

    async fn fetch_payments_for_user(&self, user_id: i64) -> Result<Vec<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_payments_for_user(user_id, &mut conn).await?)
    }

    async fn fetch_payments_with_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_payments_with_status(status, &mut conn).await?)
    }

    async fn update_payment(&self, payment: &Payment) -> Result<Payment, StoreError> {
        let mut conn = self.pool.acquire().await?;
        payments::update_payment(payment, &mut conn).await
    }
}
