use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewUser, User, UserRole},
    traits::StoreError,
};

pub async fn insert_user(user: NewUser, conn: &mut SqliteConnection) -> Result<User, StoreError> {
    let user: User = sqlx::query_as(
        r#"
            INSERT INTO users (name, email, phone_number, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *;
        "#,
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.phone_number)
    .bind(user.role)
    .fetch_one(conn)
    .await?;
    debug!("📝️ User [{}] inserted with id {}", user.email, user.id);
    Ok(user)
}

pub async fn fetch_user_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_user_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await?;
    Ok(user)
}

pub async fn fetch_all_users(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as("SELECT * FROM users ORDER BY created_at ASC").fetch_all(conn).await?;
    Ok(users)
}

pub async fn user_exists(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)").bind(id).fetch_one(conn).await?;
    Ok(exists)
}

pub async fn email_exists(email: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)").bind(email).fetch_one(conn).await?;
    Ok(exists)
}

pub async fn update_user_profile(
    id: i64,
    name: &str,
    phone_number: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as(
        "UPDATE users SET name = $1, phone_number = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $3 RETURNING *",
    )
    .bind(name)
    .bind(phone_number)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(user)
}

pub async fn update_user_role(id: i64, role: UserRole, conn: &mut SqliteConnection) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as("UPDATE users SET role = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *")
        .bind(role)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(user)
}

pub async fn delete_user(id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
