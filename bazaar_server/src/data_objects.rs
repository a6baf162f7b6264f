//! Request payloads for the REST surface.
//!
//! Responses are the engine's own row types serialized as-is, so only the inbound shapes live
//! here.
use bazaar_engine::db_types::{NewOrder, NewShop, NewUser, ShopCategory, UserRole};
use bzr_common::Money;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub shop_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub total_amount: Money,
    pub delivery_address: String,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(req: CreateOrderRequest) -> Self {
        NewOrder {
            user_id: req.user_id,
            shop_id: req.shop_id,
            product_name: req.product_name,
            quantity: req.quantity,
            total_amount: req.total_amount,
            delivery_address: req.delivery_address,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        NewUser {
            name: req.name,
            email: req.email,
            phone_number: req.phone_number,
            role: req.role.unwrap_or(UserRole::User),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserProfileRequest {
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub category: ShopCategory,
    #[serde(default)]
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub owner_id: i64,
}

impl From<CreateShopRequest> for NewShop {
    fn from(req: CreateShopRequest) -> Self {
        NewShop {
            name: req.name,
            category: req.category,
            description: req.description,
            address: req.address,
            phone_number: req.phone_number,
            owner_id: req.owner_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShopRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShopCategoryRequest {
    pub category: ShopCategory,
}
