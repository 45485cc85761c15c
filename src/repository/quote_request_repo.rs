use async_trait::async_trait;
use mongodb::{Collection, Database};
use tracing::{error, info};

use crate::model::QuoteRequest;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait QuoteRequestRepository: Send + Sync {
    /// Persists a new request and returns it with the store-owned fields set.
    async fn add_quote_request(&self, request: QuoteRequest) -> RepositoryResult<QuoteRequest>;
}

pub struct MongoQuoteRequestRepository {
    collection: Collection<QuoteRequest>,
}

impl MongoQuoteRequestRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoQuoteRequestRepository {
            collection: db.collection(collection_name),
        }
    }
}

#[async_trait]
impl QuoteRequestRepository for MongoQuoteRequestRepository {
    #[tracing::instrument(skip(self, request), fields(product_id = %request.product_id, buyer_id = %request.buyer_id))]
    async fn add_quote_request(&self, request: QuoteRequest) -> RepositoryResult<QuoteRequest> {
        let new_request = request.stamped();
        match self.collection.insert_one(&new_request, None).await {
            Ok(_) => {
                info!("Quote request created");
                Ok(new_request)
            }
            Err(e) => {
                error!("Failed to create quote request: {}", e);
                Err(RepositoryError::database(format!("Failed to create quote request: {}", e)))
            }
        }
    }
}
