use crate::{
    db_types::{NewUser, User, UserRole},
    traits::StoreError,
};

/// Persistence contract for the user aggregate.
///
/// `user_exists` and `email_exists` are the capabilities other domains consume: order creation
/// verifies the buyer through `user_exists`, and user creation guards the email uniqueness rule
/// through `email_exists`.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn fetch_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn fetch_all_users(&self) -> Result<Vec<User>, StoreError>;

    async fn user_exists(&self, id: i64) -> Result<bool, StoreError>;

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Replaces the user's name and phone number. Returns `None` if the user does not exist.
    async fn update_user_profile(&self, id: i64, name: &str, phone_number: &str) -> Result<Option<User>, StoreError>;

    /// Replaces the user's role. Returns `None` if the user does not exist.
    async fn update_user_role(&self, id: i64, role: UserRole) -> Result<Option<User>, StoreError>;

    /// Deletes the row. Returns `false` if there was nothing to delete.
    async fn delete_user(&self, id: i64) -> Result<bool, StoreError>;
}
