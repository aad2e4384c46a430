use std::str::FromStr;

use anyhow::Context;
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10)?;

        let algorithm = std::env::var("ALGORITHM").unwrap_or_else(|_| "HS256".into());
        let jwt = JwtConfig {
            secret: std::env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            algorithm: parse_algorithm(&algorithm)?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "bookshelf".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "bookshelf-users".into()),
            ttl_minutes: parse_ttl_minutes(parse_or("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?)?,
        };

        Ok(Self {
            database_url,
            max_connections,
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("APP_PORT", 8080)?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<T>().with_context(|| format!("invalid value for {key}")),
        Err(_) => Ok(default),
    }
}

/// Upper bound for token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

pub fn parse_ttl_minutes(minutes: i64) -> anyhow::Result<i64> {
    if !(1..=MAX_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
        );
    }
    Ok(minutes)
}

/// Tokens are signed with a shared secret, so only the HMAC family is usable.
pub fn parse_algorithm(name: &str) -> anyhow::Result<Algorithm> {
    let alg = Algorithm::from_str(name.trim())
        .map_err(|e| anyhow::anyhow!("invalid ALGORITHM {name:?}: {e}"))?;
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(alg),
        other => anyhow::bail!("ALGORITHM {other:?} is not supported with a shared secret"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hmac_algorithms() {
        assert_eq!(parse_algorithm("HS256").unwrap(), Algorithm::HS256);
        assert_eq!(parse_algorithm(" HS512 ").unwrap(), Algorithm::HS512);
    }

    #[test]
    fn token_lifetime_must_be_positive_and_bounded() {
        assert_eq!(parse_ttl_minutes(30).unwrap(), 30);
        assert_eq!(parse_ttl_minutes(MAX_TTL_MINUTES).unwrap(), MAX_TTL_MINUTES);
        for bad in [0, -5, MAX_TTL_MINUTES + 1, 10_000_000_000_000, i64::MAX] {
            let err = parse_ttl_minutes(bad).unwrap_err();
            assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"), "{bad}");
        }
    }

    #[test]
    fn rejects_asymmetric_and_unknown_algorithms() {
        assert!(parse_algorithm("RS256").is_err());
        assert!(parse_algorithm("none").is_err());
    }
}
