use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// Collection names for the marketplace documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
    pub products: String,
    pub sellers: String,
    pub buyers: String,
    pub categories: String,
    pub quote_requests: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        CollectionNames {
            products: "products".to_string(),
            sellers: "sellers".to_string(),
            buyers: "buyers".to_string(),
            categories: "categories".to_string(),
            quote_requests: "quoteRequests".to_string(),
        }
    }
}

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    pub collections: CollectionNames,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGO_URI: MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (required)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_PRODUCT_COLLECTION, MONGO_SELLER_COLLECTION,
    ///   MONGO_BUYER_COLLECTION, MONGO_CATEGORY_COLLECTION,
    ///   MONGO_QUOTE_REQUEST_COLLECTION: collection overrides (optional)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGO_URI").map_err(|_| {
            error!("MONGO_URI environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_URI".to_string())
        })?;

        let database = env::var("MONGO_DATABASE").map_err(|_| {
            error!("MONGO_DATABASE environment variable not found");
            ConfigError::EnvVarNotFound("MONGO_DATABASE".to_string())
        })?;
        debug!("MongoDB database: {}", database);

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();
        if username.is_some() {
            debug!("MongoDB credentials provided");
        } else {
            debug!("No MongoDB credentials specified");
        }

        let defaults = CollectionNames::default();
        let collection = |var: &str, default: String| {
            env::var(var).map(|name| {
                debug!("{} = {}", var, name);
                name
            }).unwrap_or(default)
        };
        let collections = CollectionNames {
            products: collection("MONGO_PRODUCT_COLLECTION", defaults.products),
            sellers: collection("MONGO_SELLER_COLLECTION", defaults.sellers),
            buyers: collection("MONGO_BUYER_COLLECTION", defaults.buyers),
            categories: collection("MONGO_CATEGORY_COLLECTION", defaults.categories),
            quote_requests: collection("MONGO_QUOTE_REQUEST_COLLECTION", defaults.quote_requests),
        };

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            collections,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            error!("MongoDB URI is empty");
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if self.database.is_empty() {
            error!("MongoDB database is empty");
            return Err(ConfigError::ValidationError("MongoDB database cannot be empty".to_string()));
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if matches!(self.username.as_deref(), Some("")) || matches!(self.password.as_deref(), Some("")) {
            error!("MongoDB credentials set but empty");
            return Err(ConfigError::ValidationError("MongoDB credentials cannot be empty if set".to_string()));
        }

        let c = &self.collections;
        for name in [&c.products, &c.sellers, &c.buyers, &c.categories, &c.quote_requests] {
            if name.is_empty() {
                return Err(ConfigError::ValidationError("MongoDB collection names cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "hairbuysell".to_string(),
            username: None,
            password: None,
            collections: CollectionNames::default(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.database, "hairbuysell");
        assert_eq!(config.collections.quote_requests, "quoteRequests");
        assert_eq!(config.pool_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_uri() {
        let mut config = MongoConfig::default();
        config.uri = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_pool_size() {
        let mut config = MongoConfig::default();
        config.pool_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_password() {
        let mut config = MongoConfig::default();
        config.username = Some("reader".to_string());
        config.password = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_collection() {
        let mut config = MongoConfig::default();
        config.collections.products = String::new();
        assert!(config.validate().is_err());
    }
}
