use std::sync::Arc;

use crate::auth::{jwt::JwtKeys, repo::UserStore};
use crate::books::repo::BookStore;
use crate::config::{AppConfig, JwtConfig};
use crate::db::Database;

/// Shared, read-only handles threaded through every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let db = Database::connect(config).await?;
        db.migrate().await?;

        let db = Arc::new(db);
        Ok(Self::from_parts(db.clone(), db, &config.jwt))
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        books: Arc<dyn BookStore>,
        jwt: &JwtConfig,
    ) -> Self {
        Self {
            users,
            books,
            keys: Arc::new(JwtKeys::new(jwt)),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let store = Arc::new(crate::memory::MemoryStore::default());
        Self::from_parts(store.clone(), store, &test_jwt_config())
    }
}

#[cfg(test)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".into(),
        algorithm: jsonwebtoken::Algorithm::HS256,
        issuer: "test-issuer".into(),
        audience: "test-aud".into(),
        ttl_minutes: 5,
    }
}
