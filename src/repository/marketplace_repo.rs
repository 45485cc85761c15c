use async_trait::async_trait;
use bson::doc;
use futures::stream::StreamExt;
use mongodb::{options::FindOptions, Collection, Database};
use tracing::{debug, error, info};

use crate::config::mongo_conf::CollectionNames;
use crate::model::{Buyer, Category, Product, Seller};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Read side of the marketplace store: listings, profiles and the category
/// reference list. A missing record is `Ok(None)`, not an error.
#[async_trait]
pub trait MarketplaceRepository: Send + Sync {
    async fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>>;
    async fn get_seller_by_id(&self, id: &str) -> RepositoryResult<Option<Seller>>;
    async fn get_buyer_by_id(&self, id: &str) -> RepositoryResult<Option<Buyer>>;
    /// Categories in display order.
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

pub struct MongoMarketplaceRepository {
    products: Collection<Product>,
    sellers: Collection<Seller>,
    buyers: Collection<Buyer>,
    categories: Collection<Category>,
}

impl MongoMarketplaceRepository {
    pub fn new(db: &Database, names: &CollectionNames) -> Self {
        MongoMarketplaceRepository {
            products: db.collection(&names.products),
            sellers: db.collection(&names.sellers),
            buyers: db.collection(&names.buyers),
            categories: db.collection(&names.categories),
        }
    }
}

#[async_trait]
impl MarketplaceRepository for MongoMarketplaceRepository {
    #[tracing::instrument(skip(self))]
    async fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let found = self.products.find_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to fetch product: {}", e);
            RepositoryError::from(e)
        })?;
        debug!(found = found.is_some(), "Product lookup finished");
        Ok(found)
    }

    #[tracing::instrument(skip(self))]
    async fn get_seller_by_id(&self, id: &str) -> RepositoryResult<Option<Seller>> {
        let found = self.sellers.find_one(doc! { "_id": id }, None).await?;
        debug!(found = found.is_some(), "Seller lookup finished");
        Ok(found)
    }

    #[tracing::instrument(skip(self))]
    async fn get_buyer_by_id(&self, id: &str) -> RepositoryResult<Option<Buyer>> {
        let found = self.buyers.find_one(doc! { "_id": id }, None).await?;
        debug!(found = found.is_some(), "Buyer lookup finished");
        Ok(found)
    }

    #[tracing::instrument(skip(self))]
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let options = FindOptions::builder().sort(doc! { "position": 1 }).build();
        let mut cursor = self.categories.find(None, options).await?;
        let mut categories = Vec::new();
        while let Some(category) = cursor.next().await {
            match category {
                Ok(c) => categories.push(c),
                Err(e) => {
                    error!("Failed to deserialize category: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize category: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} categories", categories.len());
        Ok(categories)
    }
}
