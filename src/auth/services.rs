use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        repo::UserStore,
        repo_types::User,
    },
    error::{AppError, StoreError},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Validates the credentials, hashes the password and stores the new user.
pub async fn register(
    users: &dyn UserStore,
    email: &str,
    password: String,
) -> Result<User, AppError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }

    if users.find_user_by_email(email).await?.is_some() {
        warn!(email, "email already registered");
        return Err(AppError::DuplicateEmail);
    }

    let hash = hash_password_blocking(password).await?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = users.create_user(email, &hash).await.map_err(|e| {
        if matches!(e, StoreError::Duplicate) {
            warn!(email, "email already registered");
        }
        AppError::from(e)
    })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Returns the user if the password matches the stored hash.
pub async fn authenticate_user(
    users: &dyn UserStore,
    email: &str,
    password: String,
) -> Result<Option<User>, AppError> {
    let Some(user) = users.find_user_by_email(email).await? else {
        warn!(email, "login unknown email");
        return Ok(None);
    };

    if !verify_password_blocking(password, user.password_hash.clone()).await? {
        warn!(email, user_id = user.id, "login invalid password");
        return Ok(None);
    }
    Ok(Some(user))
}

/// Verifies the credentials and mints an access token for the user.
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    email: &str,
    password: String,
) -> Result<String, AppError> {
    let user = authenticate_user(users, email.trim(), password)
        .await?
        .ok_or(AppError::Unauthorized("Incorrect username or password"))?;

    let token = keys.issue_access(&user.email)?;
    info!(user_id = user.id, "user logged in");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::state::test_jwt_config;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("u1@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[tokio::test]
    async fn register_keeps_email_and_assigns_id() {
        let store = MemoryStore::default();
        let user = register(&store, "u1@example.com", "pw1".into()).await.unwrap();
        assert_eq!(user.email, "u1@example.com");
        assert!(user.id > 0);
        assert!(user.is_active);
        assert_ne!(user.password_hash, "pw1");
    }

    #[tokio::test]
    async fn register_rejects_bad_input() {
        let store = MemoryStore::default();
        let err = register(&store, "nope", "pw1".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = register(&store, "u1@example.com", String::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn register_twice_is_a_conflict() {
        let store = MemoryStore::default();
        register(&store, "u1@example.com", "pw1".into()).await.unwrap();
        let err = register(&store, "u1@example.com", "pw2".into()).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn login_issues_token_for_the_user() {
        let store = MemoryStore::default();
        let keys = JwtKeys::new(&test_jwt_config());
        register(&store, "u1@example.com", "pw1".into()).await.unwrap();

        let token = login(&store, &keys, "u1@example.com", "pw1".into()).await.unwrap();
        assert_eq!(keys.verify(&token).unwrap().sub, "u1@example.com");
    }

    #[tokio::test]
    async fn login_with_bad_credentials_is_unauthorized() {
        let store = MemoryStore::default();
        let keys = JwtKeys::new(&test_jwt_config());
        register(&store, "u1@example.com", "pw1".into()).await.unwrap();

        let err = login(&store, &keys, "u1@example.com", "wrong".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let err = login(&store, &keys, "ghost@example.com", "pw1".into()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
