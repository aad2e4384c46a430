use async_trait::async_trait;

use crate::auth::repo_types::{User, UserRow};
use crate::db::Database;
use crate::error::StoreError;

/// Persistence for user credentials.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user; fails with [`StoreError::Duplicate`] if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, email, hashed_password, is_active
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row.into())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, hashed_password, is_active
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn create_then_find_by_email(pool: PgPool) {
        let db = Database::from_pool(pool);
        let created = db.create_user("ada@example.com", "$argon2id$fake").await.unwrap();
        assert!(created.is_active);

        let found = db.find_user_by_email("ada@example.com").await.unwrap();
        assert_eq!(found, Some(created));
        assert!(db.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn second_user_with_same_email_is_duplicate(pool: PgPool) {
        let db = Database::from_pool(pool);
        db.create_user("ada@example.com", "h1").await.unwrap();
        let err = db.create_user("ada@example.com", "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate), "got {err:?}");
    }
}
