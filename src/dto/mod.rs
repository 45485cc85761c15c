pub mod quote_dto;

pub use quote_dto::{QuoteField, QuoteFormValues, TEXTURE_OPTIONS};
