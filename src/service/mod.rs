pub mod auth_state;
pub mod prefill;
pub mod quote_form;

pub use auth_state::{AuthStateProvider, WatchAuthProvider};
pub use quote_form::{ProductLoadState, QuoteFormController, SubmitOutcome};
