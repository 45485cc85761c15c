pub mod product;
pub mod profile;
pub mod quote_request;

pub use product::{Category, Product, ProductSpecs};
pub use profile::{AuthUser, Buyer, Seller};
pub use quote_request::{QuoteRequest, ANONYMOUS_BUYER_ID, UNROUTED_ID};
