use std::env;
use tracing::{debug, info};

use crate::config::ConfigError;
use crate::model::AuthUser;

/// Settings for one headless quote submission.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Listing the quote is opened against, the `productId` query value.
    pub product_id: Option<String>,
    /// JSON file holding the form values to submit.
    pub form_file: String,
    pub auth_uid: Option<String>,
    pub auth_email: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let non_empty = |var: &str| env::var(var).ok().filter(|v| !v.trim().is_empty());

        let form_file = non_empty("QUOTE_FORM_FILE")
            .ok_or_else(|| ConfigError::EnvVarNotFound("QUOTE_FORM_FILE".to_string()))?;
        let product_id = non_empty("QUOTE_PRODUCT_ID");
        let auth_uid = non_empty("AUTH_UID");
        let auth_email = non_empty("AUTH_EMAIL");

        if auth_email.is_some() && auth_uid.is_none() {
            return Err(ConfigError::InvalidValue("AUTH_EMAIL requires AUTH_UID".to_string()));
        }

        debug!(?product_id, form_file = %form_file, signed_in = auth_uid.is_some(), "App config");
        info!("App configuration loaded");
        Ok(AppConfig { product_id, form_file, auth_uid, auth_email })
    }

    /// The account to sign in with, if one was configured.
    pub fn auth_user(&self) -> Option<AuthUser> {
        self.auth_uid
            .as_ref()
            .map(|uid| AuthUser::new(uid.clone(), self.auth_email.as_deref()))
    }
}
