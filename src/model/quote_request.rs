use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Buyer id used when nobody is signed in.
pub const ANONYMOUS_BUYER_ID: &str = "anonymous";

/// Product and seller id of a request not tied to a listing.
pub const UNROUTED_ID: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<ObjectId>,
    pub buyer_id: String,
    pub buyer_name: String,
    pub buyer_email: String,
    pub product_id: String,
    pub product_name: String,
    pub seller_id: String,
    pub quantity: String,
    pub details: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl QuoteRequest {
    pub fn is_general_inquiry(&self) -> bool {
        self.product_id == UNROUTED_ID && self.seller_id == UNROUTED_ID
    }

    /// Fills the fields the store owns: id, status and timestamps.
    pub fn stamped(mut self) -> Self {
        let time = chrono::Utc::now().to_rfc3339();
        self.id = Some(ObjectId::new());
        self.status = Some("pending".to_string());
        self.created_at = Some(time.clone());
        self.updated_at = Some(time);
        self
    }
}
