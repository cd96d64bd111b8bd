use std::env;
use std::fmt;
use std::net::SocketAddr;
use wheel_shared::constants::{PROVISIONAL_PRODUCTS_COLLECTION, REWARDS_COLLECTION};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";
const DEFAULT_REWARDS: &str = "10% off,Free shipping,2x1,Mystery gift,5% off,Free sample";
const DEFAULT_PRODUCTS: &str = "Headphones,Smart watch,Backpack,Water bottle";

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "{} must be set", key),
            Self::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// Prize labels in wheel order; the spin index points into this list.
    pub rewards: Vec<String>,
    /// Giveaway products for the product wheel, in wheel order.
    pub products: Vec<String>,
    pub cors_origins: Vec<String>,
    pub static_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("BIND_ADDR", bind_raw.clone()))?;

        let jwt_secret = lookup("JWT_SECRET_KEY")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let rewards = read_catalogue(&lookup, "WHEEL_REWARDS", DEFAULT_REWARDS)?;
        let products = read_catalogue(&lookup, "WHEEL_PRODUCTS", DEFAULT_PRODUCTS)?;

        let cors_origins = lookup("CORS_ORIGIN")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(|| vec!["http://127.0.0.1:8080".to_string(), "http://127.0.0.1:3000".to_string()]);

        Ok(Self {
            bind_addr,
            jwt_secret,
            rewards,
            products,
            cors_origins,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }

    /// Labels of the named collection, in the order the wheel draws them.
    pub fn catalogue(&self, collection: &str) -> Option<&[String]> {
        match collection {
            REWARDS_COLLECTION => Some(self.rewards.as_slice()),
            PROVISIONAL_PRODUCTS_COLLECTION => Some(self.products.as_slice()),
            _ => None,
        }
    }
}

fn read_catalogue<F>(lookup: &F, key: &'static str, default: &str) -> Result<Vec<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let items = split_list(&lookup(key).unwrap_or_else(|| default.to_string()));
    if items.is_empty() {
        return Err(ConfigError::Invalid(key, "empty list".to_string()));
    }
    Ok(items)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.rewards.len(), 6);
        assert_eq!(config.products.len(), 4);
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_secret_is_required() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET_KEY")));
    }

    #[test]
    fn test_reward_list_is_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("WHEEL_REWARDS", " A , B,,C "),
        ]))
        .unwrap();
        assert_eq!(config.rewards, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_catalogue_by_collection_name() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("WHEEL_REWARDS", "A,B"),
            ("WHEEL_PRODUCTS", "X,Y,Z"),
        ]))
        .unwrap();
        assert_eq!(config.catalogue("rewards").map(<[String]>::len), Some(2));
        assert_eq!(config.catalogue("provisional-products").map(<[String]>::len), Some(3));
        assert!(config.catalogue("users").is_none());
    }

    #[test]
    fn test_empty_product_list_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("WHEEL_PRODUCTS", " , "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("WHEEL_PRODUCTS", _)));
    }

    #[test]
    fn test_bad_bind_addr() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET_KEY", "s3cret"),
            ("BIND_ADDR", "nowhere"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("BIND_ADDR", _)));
    }
}
