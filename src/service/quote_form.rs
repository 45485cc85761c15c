use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use crate::dto::quote_dto::{QuoteField, QuoteFormValues};
use crate::model::{AuthUser, Product, QuoteRequest, ANONYMOUS_BUYER_ID, UNROUTED_ID};
use crate::repository::marketplace_repo::MarketplaceRepository;
use crate::repository::quote_request_repo::QuoteRequestRepository;
use crate::repository::repository_error::RepositoryResult;
use crate::service::auth_state::AuthStateProvider;
use crate::service::prefill;
use crate::util::error::{QuoteError, ValidationError};
use crate::util::notify::{Notification, Notifier};

/// Where the form stands with respect to its product context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLoadState {
    /// The form was opened without a product id.
    NotRequested,
    Loading,
    Loaded(Product),
    /// A product id was given but no such listing exists.
    NotFound,
}

impl ProductLoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ProductLoadState::Loading)
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductLoadState::Loaded(product) => Some(product),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The request was accepted by the store.
    Sent(QuoteRequest),
    /// Another submission was still in flight; nothing was done.
    AlreadySubmitting,
}

struct FormState {
    values: QuoteFormValues,
    edited: HashSet<QuoteField>,
    errors: Vec<ValidationError>,
    user: Option<AuthUser>,
    product: ProductLoadState,
    product_generation: u64,
    submitting: bool,
    torn_down: bool,
}

impl FormState {
    fn new() -> Self {
        FormState {
            values: QuoteFormValues::default(),
            edited: HashSet::new(),
            errors: Vec::new(),
            user: None,
            product: ProductLoadState::NotRequested,
            product_generation: 0,
            submitting: false,
            torn_down: false,
        }
    }

    /// Clears a previous teardown. Bumping the generation keeps responses
    /// that were in flight at teardown from landing.
    fn reopen(&mut self) {
        if !self.torn_down {
            return;
        }
        self.torn_down = false;
        self.product_generation += 1;
        if self.product.is_loading() {
            self.product = ProductLoadState::NotRequested;
        }
    }

    /// Back to defaults after a successful submission. Listing fields are
    /// re-applied while a product is loaded; identity fields survive only for
    /// a signed-in user.
    fn reset_after_submit(&mut self, keep_identity: bool) {
        let mut fresh = QuoteFormValues::default();
        if keep_identity {
            fresh.name = std::mem::take(&mut self.values.name);
            fresh.email = std::mem::take(&mut self.values.email);
        }
        if let Some(product) = self.product.product() {
            prefill::apply_product(&mut fresh, product);
        }
        self.values = fresh;
        self.edited.clear();
        self.errors.clear();
    }
}

struct Inner {
    marketplace: Arc<dyn MarketplaceRepository>,
    quotes: Arc<dyn QuoteRequestRepository>,
    auth: Arc<dyn AuthStateProvider>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<FormState>,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn profile_name(&self, uid: &str) -> Option<String> {
        match self.marketplace.get_seller_by_id(uid).await {
            Ok(Some(seller)) => return Some(seller.name),
            Ok(None) => {}
            Err(e) => warn!(uid, "Seller profile lookup failed: {}", e),
        }
        match self.marketplace.get_buyer_by_id(uid).await {
            Ok(found) => found.map(|buyer| buyer.name),
            Err(e) => {
                warn!(uid, "Buyer profile lookup failed: {}", e);
                None
            }
        }
    }

    /// A signed-out buyer must leave an email to be reached at.
    fn require_contact(
        &self,
        user: Option<&AuthUser>,
        values: &QuoteFormValues,
    ) -> Result<(), QuoteError> {
        if user.is_some() || !values.email.trim().is_empty() {
            return Ok(());
        }
        self.notifier.notify(Notification::destructive(
            "Email required",
            "Please enter your email to submit a quote.",
        ));
        Err(QuoteError::MissingContact(
            "an email address is required when not signed in".to_string(),
        ))
    }

    async fn apply_auth(&self, user: Option<AuthUser>) {
        let Some(user) = user else {
            let mut state = self.state();
            if state.user.take().is_some() {
                info!("Auth state cleared");
            }
            return;
        };

        self.state().user = Some(user.clone());
        let profile_name = self.profile_name(&user.uid).await;

        let mut state = self.state();
        if state.torn_down || state.user.as_ref().map(|u| u.uid.as_str()) != Some(user.uid.as_str()) {
            debug!(uid = %user.uid, "Dropping profile for a user no longer signed in");
            return;
        }
        if let Some(name) = profile_name {
            let typed = state.edited.contains(&QuoteField::Name) && !state.values.name.is_empty();
            if typed {
                debug!("Keeping the name the user typed");
            } else {
                state.values.name = name;
            }
        }
        if let Some(email) = &user.email {
            state.values.email = email.clone();
        }
        info!(uid = %user.uid, "Pre-filled contact fields from auth state");
    }
}

/// Clears the busy flag on every exit from a submission.
struct SubmittingGuard<'a> {
    inner: &'a Inner,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.inner.state().submitting = false;
    }
}

/// Controller behind the quote request form.
///
/// Holds the form values and reflects auth state and the product listing
/// into them. Clones share the same form.
#[derive(Clone)]
pub struct QuoteFormController {
    inner: Arc<Inner>,
}

impl QuoteFormController {
    pub fn new(
        marketplace: Arc<dyn MarketplaceRepository>,
        quotes: Arc<dyn QuoteRequestRepository>,
        auth: Arc<dyn AuthStateProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        QuoteFormController {
            inner: Arc::new(Inner {
                marketplace,
                quotes,
                auth,
                notifier,
                state: Mutex::new(FormState::new()),
                subscription: Mutex::new(None),
            }),
        }
    }

    /// Subscribes to auth state. The current user is applied before this
    /// returns; later sign-ins and sign-outs are applied in the background
    /// until [`teardown`](Self::teardown). Calling it after a teardown
    /// reopens the form; product loads started before the teardown stay
    /// discarded.
    pub async fn initialize(&self) {
        self.inner.state().reopen();

        let mut rx = self.inner.auth.subscribe();
        let current = rx.borrow_and_update().clone();
        self.inner.apply_auth(current).await;

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let user = rx.borrow_and_update().clone();
                let Some(inner) = weak.upgrade() else { break };
                inner.apply_auth(user).await;
            }
            debug!("Auth listener stopped");
        });

        let previous = self
            .inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Stops listening to auth state and ignores product responses that are
    /// still on their way.
    pub fn teardown(&self) {
        let handle = self
            .inner
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
        self.inner.state().torn_down = true;
        debug!("Quote form torn down");
    }

    /// Loads the listing the form was opened against, if any, and fills the
    /// listing fields from it. A response that was overtaken by a newer call
    /// or that arrives after teardown changes nothing.
    #[instrument(skip(self))]
    pub async fn load_product(&self, product_id: Option<&str>) -> ProductLoadState {
        let generation = {
            let mut state = self.inner.state();
            state.product_generation += 1;
            state.product = match product_id {
                Some(_) => ProductLoadState::Loading,
                None => ProductLoadState::NotRequested,
            };
            state.product_generation
        };
        let Some(product_id) = product_id else {
            debug!("No product requested");
            return ProductLoadState::NotRequested;
        };

        let found = match self.inner.marketplace.get_product_by_id(product_id).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Product lookup failed: {}", e);
                None
            }
        };

        let mut state = self.inner.state();
        if state.torn_down || state.product_generation != generation {
            debug!(generation, "Discarding stale product response");
            return state.product.clone();
        }
        state.product = match found {
            Some(product) => {
                prefill::apply_product(&mut state.values, &product);
                for field in QuoteField::PRODUCT_DERIVED {
                    state.edited.remove(&field);
                }
                state.edited.remove(&QuoteField::Quantity);
                state.edited.remove(&QuoteField::Details);
                state.errors.clear();
                info!(product = %product.name, "Product context loaded");
                ProductLoadState::Loaded(product)
            }
            None => {
                info!("Requested product not found, continuing as general inquiry");
                ProductLoadState::NotFound
            }
        };
        state.product.clone()
    }

    /// Sets a field on behalf of the user. Returns `false` when the field is
    /// locked by the loaded product.
    pub fn set_value(&self, field: QuoteField, value: impl Into<String>) -> bool {
        let mut state = self.inner.state();
        if field.is_product_derived() && state.product.product().is_some() {
            debug!(%field, "Ignoring edit to a field locked by the product");
            return false;
        }
        state.values.set(field, value);
        state.edited.insert(field);
        true
    }

    /// Sets every editable field from `values`; locked fields keep the
    /// listing's values.
    pub fn fill(&self, values: &QuoteFormValues) {
        for field in QuoteField::ALL {
            let value = values.get(field);
            if !value.is_empty() {
                self.set_value(field, value);
            }
        }
    }

    pub fn is_field_locked(&self, field: QuoteField) -> bool {
        field.is_product_derived() && self.inner.state().product.product().is_some()
    }

    pub fn values(&self) -> QuoteFormValues {
        self.inner.state().values.clone()
    }

    /// Field errors from the last submit attempt.
    pub fn errors(&self) -> Vec<ValidationError> {
        self.inner.state().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.state().submitting
    }

    pub fn product_state(&self) -> ProductLoadState {
        self.inner.state().product.clone()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.inner.state().user.clone()
    }

    /// Names for the category selector, in display order.
    pub async fn category_options(&self) -> RepositoryResult<Vec<String>> {
        let categories = self.inner.marketplace.list_categories().await?;
        Ok(categories.into_iter().map(|c| c.name).collect())
    }

    /// Validates the form and sends one quote request.
    ///
    /// Returns [`SubmitOutcome::AlreadySubmitting`] without side effects while
    /// a previous call is in flight. On success the form is reset, but the
    /// listing fields are refilled while a product is loaded.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<SubmitOutcome, QuoteError> {
        let (values, user, product) = {
            let mut state = self.inner.state();
            if state.submitting {
                debug!("Submit ignored, a request is already in flight");
                return Ok(SubmitOutcome::AlreadySubmitting);
            }
            if let Err(errors) = state.values.check() {
                debug!(count = errors.len(), "Quote form failed validation");
                state.errors = errors.clone();
                return Err(QuoteError::Validation(errors));
            }
            state.errors.clear();
            state.submitting = true;
            (
                state.values.clone(),
                state.user.clone(),
                state.product.product().cloned(),
            )
        };
        let _busy = SubmittingGuard { inner: &self.inner };

        self.inner.require_contact(user.as_ref(), &values)?;
        let buyer_id = user
            .as_ref()
            .map(|u| u.uid.clone())
            .unwrap_or_else(|| ANONYMOUS_BUYER_ID.to_string());

        let (request, description) = match &product {
            Some(product) => {
                let seller = match self.inner.marketplace.get_seller_by_id(&product.seller_id).await {
                    Ok(seller) => seller,
                    Err(e) => {
                        warn!(seller_id = %product.seller_id, "Seller lookup failed: {}", e);
                        None
                    }
                };
                let description = prefill::product_request_sent(
                    &product.name,
                    seller.as_ref().and_then(|s| s.company_name.as_deref()),
                );
                let request = QuoteRequest {
                    id: None,
                    buyer_id,
                    buyer_name: values.name.clone(),
                    buyer_email: values.email.clone(),
                    product_id: product.id.clone(),
                    product_name: product.name.clone(),
                    seller_id: product.seller_id.clone(),
                    quantity: values.quantity.clone(),
                    details: values.details_opt(),
                    status: None,
                    created_at: None,
                    updated_at: None,
                };
                (request, description)
            }
            None => {
                let request = QuoteRequest {
                    id: None,
                    buyer_id,
                    buyer_name: values.name.clone(),
                    buyer_email: values.email.clone(),
                    product_id: UNROUTED_ID.to_string(),
                    product_name: prefill::general_inquiry_product_name(&values),
                    seller_id: UNROUTED_ID.to_string(),
                    quantity: values.quantity.clone(),
                    details: Some(prefill::general_inquiry_details(&values)),
                    status: None,
                    created_at: None,
                    updated_at: None,
                };
                (request, prefill::GENERAL_INQUIRY_SENT.to_string())
            }
        };

        match self.inner.quotes.add_quote_request(request).await {
            Ok(stored) => {
                info!(product_id = %stored.product_id, "Quote request sent");
                self.inner
                    .notifier
                    .notify(Notification::success("Quote Request Sent!", description));
                self.inner.state().reset_after_submit(user.is_some());
                Ok(SubmitOutcome::Sent(stored))
            }
            Err(e) => {
                error!("Failed to submit quote request: {}", e);
                self.inner.notifier.notify(Notification::destructive(
                    "Submission Failed",
                    "There was an error submitting your request. Please try again.",
                ));
                Err(QuoteError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::in_memory::{InMemoryMarketplaceRepository, InMemoryQuoteRequestRepository};
    use crate::service::auth_state::WatchAuthProvider;
    use crate::util::notify::{RecordingNotifier, Severity};

    fn inner_with(notifier: Arc<RecordingNotifier>) -> Inner {
        Inner {
            marketplace: Arc::new(InMemoryMarketplaceRepository::new()),
            quotes: Arc::new(InMemoryQuoteRequestRepository::new()),
            auth: Arc::new(WatchAuthProvider::anonymous()),
            notifier,
            state: Mutex::new(FormState::new()),
            subscription: Mutex::new(None),
        }
    }

    #[test]
    fn test_blank_email_without_user_requires_contact() {
        let notifier = Arc::new(RecordingNotifier::new());
        let inner = inner_with(notifier.clone());
        let values = QuoteFormValues {
            email: "  ".to_string(),
            ..Default::default()
        };

        let err = inner.require_contact(None, &values).unwrap_err();
        assert!(matches!(err, QuoteError::MissingContact(_)));
        let notice = notifier.last().expect("a notice");
        assert_eq!(notice.title, "Email required");
        assert_eq!(notice.severity, Severity::Destructive);
    }

    #[test]
    fn test_contact_present_passes_silently() {
        let notifier = Arc::new(RecordingNotifier::new());
        let inner = inner_with(notifier.clone());
        let user = AuthUser::new("b1", None);

        assert!(inner.require_contact(Some(&user), &QuoteFormValues::default()).is_ok());
        let values = QuoteFormValues {
            email: "jo@example.com".to_string(),
            ..Default::default()
        };
        assert!(inner.require_contact(None, &values).is_ok());
        assert!(notifier.notifications().is_empty());
    }

    #[test]
    fn test_reopen_drops_a_load_left_in_flight() {
        let mut state = FormState::new();
        state.product = ProductLoadState::Loading;
        state.torn_down = true;
        let generation = state.product_generation;

        state.reopen();
        assert!(!state.torn_down);
        assert_eq!(state.product, ProductLoadState::NotRequested);
        assert_eq!(state.product_generation, generation + 1);
    }
}
