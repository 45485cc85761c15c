pub mod in_memory;
pub mod marketplace_repo;
pub mod quote_request_repo;
pub mod repository_error;

use mongodb::{
    options::{ClientOptions, Credential},
    Client, Database,
};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

pub use in_memory::{InMemoryMarketplaceRepository, InMemoryQuoteRequestRepository};
pub use marketplace_repo::{MarketplaceRepository, MongoMarketplaceRepository};
pub use quote_request_repo::{MongoQuoteRequestRepository, QuoteRequestRepository};
pub use repository_error::{RepositoryError, RepositoryResult};

/// Opens a client for `config` and returns its database handle.
pub async fn connect(config: &MongoConfig) -> RepositoryResult<Database> {
    let mut client_options = ClientOptions::parse(&config.uri).await?;
    client_options.app_name = Some("HairBuySellQuotes".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout =
        Some(std::time::Duration::from_secs(config.connection_timeout_secs));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "Connected MongoDB client");
    Ok(client.database(&config.database))
}
