//! In-memory marketplace and quote stores.
//!
//! Backed by `Arc<RwLock<..>>` maps so they can be shared between the form
//! controller and the code inspecting them. Optional delays make it possible
//! to hold a lookup or submission in flight, and the quote store can be told
//! to fail so error paths can be driven without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Buyer, Category, Product, QuoteRequest, Seller};
use crate::repository::marketplace_repo::MarketplaceRepository;
use crate::repository::quote_request_repo::QuoteRequestRepository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketplaceRepository {
    products: Arc<RwLock<HashMap<String, Product>>>,
    sellers: Arc<RwLock<HashMap<String, Seller>>>,
    buyers: Arc<RwLock<HashMap<String, Buyer>>>,
    categories: Arc<RwLock<Vec<Category>>>,
    product_delays: Arc<RwLock<HashMap<String, Duration>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryMarketplaceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_product(&self, product: Product) {
        self.products.write().await.insert(product.id.clone(), product);
    }

    pub async fn insert_seller(&self, seller: Seller) {
        self.sellers.write().await.insert(seller.id.clone(), seller);
    }

    pub async fn insert_buyer(&self, buyer: Buyer) {
        self.buyers.write().await.insert(buyer.id.clone(), buyer);
    }

    pub async fn set_categories(&self, categories: Vec<Category>) {
        *self.categories.write().await = categories;
    }

    /// Makes lookups of `product_id` take `delay` before answering.
    pub async fn delay_product(&self, product_id: &str, delay: Duration) {
        self.product_delays
            .write()
            .await
            .insert(product_id.to_string(), delay);
    }

    /// While set, every lookup fails with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::connection("marketplace store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MarketplaceRepository for InMemoryMarketplaceRepository {
    async fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        let delay = self.product_delays.read().await.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_available()?;
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn get_seller_by_id(&self, id: &str) -> RepositoryResult<Option<Seller>> {
        self.check_available()?;
        Ok(self.sellers.read().await.get(id).cloned())
    }

    async fn get_buyer_by_id(&self, id: &str) -> RepositoryResult<Option<Buyer>> {
        self.check_available()?;
        Ok(self.buyers.read().await.get(id).cloned())
    }

    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.check_available()?;
        Ok(self.categories.read().await.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuoteRequestRepository {
    storage: Arc<RwLock<Vec<QuoteRequest>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryQuoteRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored request, oldest first.
    pub async fn requests(&self) -> Vec<QuoteRequest> {
        self.storage.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    /// While set, submissions fail with a database error and store nothing.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuoteRequestRepository for InMemoryQuoteRequestRepository {
    async fn add_quote_request(&self, request: QuoteRequest) -> RepositoryResult<QuoteRequest> {
        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::database("write rejected"));
        }
        let stored = request.stamped();
        self.storage.write().await.push(stored.clone());
        Ok(stored)
    }
}
