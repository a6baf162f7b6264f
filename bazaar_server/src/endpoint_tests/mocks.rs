use bazaar_engine::{
    db_types::{
        NewOrder,
        NewPayment,
        NewShop,
        NewUser,
        Order,
        OrderStatus,
        Payment,
        PaymentMethod,
        PaymentStatus,
        Shop,
        ShopCategory,
        User,
        UserRole,
    },
    traits::{OrderStore, PaymentStore, ShopStore, StoreError, UserStore},
};
use bzr_common::Money;
use chrono::Utc;
use mockall::mock;

mock! {
    pub Backend {}

    impl OrderStore for Backend {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;
        async fn fetch_order(&self, id: i64) -> Result<Option<Order>, StoreError>;
        async fn fetch_all_orders(&self) -> Result<Vec<Order>, StoreError>;
        async fn fetch_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError>;
        async fn fetch_orders_for_shop(&self, shop_id: i64) -> Result<Vec<Order>, StoreError>;
        async fn fetch_orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>, StoreError>;
        async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, StoreError>;
        async fn delete_order(&self, id: i64) -> Result<bool, StoreError>;
    }

    impl PaymentStore for Backend {
        async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, StoreError>;
        async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, StoreError>;
        async fn fetch_payment_for_order(&self, order_id: i64) -> Result<Option<Payment>, StoreError>;
        async fn fetch_all_payments(&self) -> Result<Vec<Payment>, StoreError>;
        async fn fetch_payments_for_user(&self, user_id: i64) -> Result<Vec<Payment>, StoreError>;
        async fn fetch_payments_with_status(&self, status: PaymentStatus) -> Result<Vec<Payment>, StoreError>;
        async fn update_payment(&self, payment: &Payment) -> Result<Payment, StoreError>;
    }

    impl ShopStore for Backend {
        async fn insert_shop(&self, shop: NewShop) -> Result<Shop, StoreError>;
        async fn fetch_shop(&self, id: i64) -> Result<Option<Shop>, StoreError>;
        async fn fetch_all_shops(&self) -> Result<Vec<Shop>, StoreError>;
        async fn fetch_shops_with_category(&self, category: ShopCategory) -> Result<Vec<Shop>, StoreError>;
        async fn fetch_shops_for_owner(&self, owner_id: i64) -> Result<Vec<Shop>, StoreError>;
        async fn fetch_active_shops(&self) -> Result<Vec<Shop>, StoreError>;
        async fn shop_exists(&self, id: i64) -> Result<bool, StoreError>;
        async fn update_shop_info(
            &self,
            id: i64,
            name: &str,
            description: &str,
            address: &str,
            phone_number: &str,
        ) -> Result<Option<Shop>, StoreError>;
        async fn update_shop_category(&self, id: i64, category: ShopCategory) -> Result<Option<Shop>, StoreError>;
        async fn set_shop_active(&self, id: i64, active: bool) -> Result<Option<Shop>, StoreError>;
        async fn delete_shop(&self, id: i64) -> Result<bool, StoreError>;
    }

    impl UserStore for Backend {
        async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
        async fn fetch_user(&self, id: i64) -> Result<Option<User>, StoreError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
        async fn fetch_all_users(&self) -> Result<Vec<User>, StoreError>;
        async fn user_exists(&self, id: i64) -> Result<bool, StoreError>;
        async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
        async fn update_user_profile(&self, id: i64, name: &str, phone_number: &str) -> Result<Option<User>, StoreError>;
        async fn update_user_role(&self, id: i64, role: UserRole) -> Result<Option<User>, StoreError>;
        async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;
    }
}

pub fn sample_order(id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        user_id: 1,
        shop_id: 1,
        product_name: "Mechanical keyboard".to_string(),
        quantity: 2,
        total_amount: Money::from(50_000),
        delivery_address: "123 Delivery Lane".to_string(),
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_payment(id: i64, status: PaymentStatus) -> Payment {
    Payment {
        id,
        order_id: 1,
        user_id: 1,
        amount: Money::from(50_000),
        method: PaymentMethod::CreditCard,
        status,
        transaction_id: None,
        failure_reason: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        completed_at: None,
        refunded_at: None,
    }
}

pub fn sample_shop(id: i64) -> Shop {
    Shop {
        id,
        name: "Test Shop".to_string(),
        category: ShopCategory::Electronics,
        description: "Gadgets and parts".to_string(),
        address: "1 Market Street".to_string(),
        phone_number: "02-555-0100".to_string(),
        owner_id: 1,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_user(id: i64) -> User {
    User {
        id,
        name: "Test Buyer".to_string(),
        email: "buyer@example.com".to_string(),
        phone_number: "010-1234-5678".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
