use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewShop, Shop, ShopCategory},
    traits::StoreError,
};

pub async fn insert_shop(shop: NewShop, conn: &mut SqliteConnection) -> Result<Shop, StoreError> {
    let shop: Shop = sqlx::query_as(
        r#"
            INSERT INTO shops (name, category, description, address, phone_number, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(shop.name)
    .bind(shop.category)
    .bind(shop.description)
    .bind(shop.address)
    .bind(shop.phone_number)
    .bind(shop.owner_id)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Shop [{}] inserted with id {}", shop.name, shop.id);
    Ok(shop)
}

pub async fn fetch_shop_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Shop>, sqlx::Error> {
    let shop = sqlx::query_as("SELECT * FROM shops WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(shop)
}

pub async fn fetch_all_shops(conn: &mut SqliteConnection) -> Result<Vec<Shop>, sqlx::Error> {
    let shops = sqlx::query_as("SELECT * FROM shops ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(shops)
}

pub async fn fetch_shops_with_category(
    category: ShopCategory,
    conn: &mut SqliteConnection,
) -> Result<Vec<Shop>, sqlx::Error> {
    let shops = sqlx::query_as("SELECT * FROM shops WHERE category = $1 ORDER BY created_at ASC")
        .bind(category)
        .fetch_all(conn)
        .await?;
    Ok(shops)
}

pub async fn fetch_shops_for_owner(owner_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Shop>, sqlx::Error> {
    let shops = sqlx::query_as("SELECT * FROM shops WHERE owner_id = $1 ORDER BY created_at ASC")
        .bind(owner_id)
        .fetch_all(conn)
        .await?;
    Ok(shops)
}

pub async fn fetch_active_shops(conn: &mut SqliteConnection) -> Result<Vec<Shop>, sqlx::Error> {
    let shops =
        sqlx::query_as("SELECT * FROM shops WHERE is_active = 1 ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(shops)
}

pub async fn shop_exists(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shops WHERE id = $1)").bind(id).fetch_one(conn).await?;
    Ok(exists)
}

pub async fn update_shop_info(
    id: i64,
    name: &str,
    description: &str,
    address: &str,
    phone_number: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Shop>, StoreError> {
    let shop = sqlx::query_as(
        r#"
            UPDATE shops
            SET name = $1, description = $2, address = $3, phone_number = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $5
            RETURNING *;
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(address)
    .bind(phone_number)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(shop)
}

pub async fn update_shop_category(
    id: i64,
    category: ShopCategory,
    conn: &mut SqliteConnection,
) -> Result<Option<Shop>, StoreError> {
    let shop = sqlx::query_as("UPDATE shops SET category = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
        .bind(category)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(shop)
}

pub async fn set_shop_active(id: i64, active: bool, conn: &mut SqliteConnection) -> Result<Option<Shop>, StoreError> {
    let shop =
        sqlx::query_as("UPDATE shops SET is_active = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
            .bind(active)
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(shop)
}

pub async fn delete_shop(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM shops WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
