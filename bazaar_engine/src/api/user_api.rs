use std::fmt::Debug;

use log::*;

use crate::{
    api::errors::UserApiError,
    db_types::{NewUser, User, UserRole},
    events::{EventProducers, UserCreatedEvent},
    traits::UserStore,
};

/// CRUD orchestration for the user domain.
///
/// The only business rule here is email uniqueness, enforced with a lookup before the insert
/// (the schema carries a UNIQUE constraint as a backstop, but the friendly error comes from the
/// check).
pub struct UserApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for UserApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UserApi")
    }
}

impl<B> UserApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> UserApi<B>
where B: UserStore
{
    pub async fn create_user(&self, user: NewUser) -> Result<User, UserApiError> {
        if self.db.email_exists(&user.email).await? {
            return Err(UserApiError::DuplicateEmail(user.email));
        }
        let user = self.db.insert_user(user).await?;
        debug!("👤️ User #{} registered with email {}", user.id, user.email);
        let event =
            UserCreatedEvent { user_id: user.id, name: user.name.clone(), email: user.email.clone(), role: user.role };
        for emitter in &self.producers.user_created {
            emitter.publish_event(event.clone()).await;
        }
        Ok(user)
    }

    pub async fn user_by_id(&self, id: i64) -> Result<User, UserApiError> {
        self.db.fetch_user(id).await?.ok_or(UserApiError::UserNotFound(id))
    }

    pub async fn user_by_email(&self, email: &str) -> Result<User, UserApiError> {
        self.db.fetch_user_by_email(email).await?.ok_or_else(|| UserApiError::EmailNotFound(email.to_string()))
    }

    pub async fn all_users(&self) -> Result<Vec<User>, UserApiError> {
        Ok(self.db.fetch_all_users().await?)
    }

    pub async fn update_user_profile(&self, id: i64, name: &str, phone_number: &str) -> Result<User, UserApiError> {
        self.db.update_user_profile(id, name, phone_number).await?.ok_or(UserApiError::UserNotFound(id))
    }

    pub async fn update_user_role(&self, id: i64, role: UserRole) -> Result<User, UserApiError> {
        let user = self.db.update_user_role(id, role).await?.ok_or(UserApiError::UserNotFound(id))?;
        debug!("👤️ User #{id} role changed to {role}");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), UserApiError> {
        let user = self.user_by_id(id).await?;
        self.db.delete_user(user.id).await?;
        info!("👤️ User #{id} deleted");
        Ok(())
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
