use bson::doc;
use hairbuysell_quotes::config::mongo_conf::MongoConfig;
use hairbuysell_quotes::model::{Product, ProductSpecs, QuoteRequest};
use hairbuysell_quotes::repository::{
    self, MarketplaceRepository, MongoMarketplaceRepository, MongoQuoteRequestRepository,
    QuoteRequestRepository,
};

// Needs MONGO_URI / MONGO_DATABASE pointing at a disposable database.
#[tokio::test]
#[ignore = "requires a running MongoDB"]
async fn test_mongo_quote_workflow() {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().expect("mongo config");
    let db = repository::connect(&config).await.expect("connect");

    let products = db.collection::<Product>(&config.collections.products);
    products.delete_one(doc! { "_id": "test-p1" }, None).await.expect("cleanup");
    products
        .insert_one(
            Product {
                id: "test-p1".to_string(),
                name: "Test Bundle".to_string(),
                category: "Virgin Hair".to_string(),
                seller_id: "test-s1".to_string(),
                specs: ProductSpecs {
                    length: "18 inches".to_string(),
                    color: "Natural Black".to_string(),
                    texture: "Body Wave".to_string(),
                },
            },
            None,
        )
        .await
        .expect("insert product");

    let marketplace = MongoMarketplaceRepository::new(&db, &config.collections);
    let found = marketplace.get_product_by_id("test-p1").await.expect("lookup");
    assert_eq!(found.map(|p| p.seller_id), Some("test-s1".to_string()));
    assert!(marketplace.get_seller_by_id("no-such-seller").await.expect("lookup").is_none());

    let quotes = MongoQuoteRequestRepository::new(&db, &config.collections.quote_requests);
    let stored = quotes
        .add_quote_request(QuoteRequest {
            id: None,
            buyer_id: "anonymous".to_string(),
            buyer_name: "Test Buyer".to_string(),
            buyer_email: "buyer@example.com".to_string(),
            product_id: "test-p1".to_string(),
            product_name: "Test Bundle".to_string(),
            seller_id: "test-s1".to_string(),
            quantity: "2 bundles".to_string(),
            details: None,
            status: None,
            created_at: None,
            updated_at: None,
        })
        .await
        .expect("add quote request");
    assert!(stored.id.is_some());
    assert_eq!(stored.status.as_deref(), Some("pending"));
}
