use hairbuysell_quotes::config::{AppConfig, ConfigError};

// Env vars are process-wide, so every case runs in this one test.
#[test]
fn test_app_config_from_env() {
    std::env::remove_var("QUOTE_FORM_FILE");
    std::env::remove_var("QUOTE_PRODUCT_ID");
    std::env::remove_var("AUTH_UID");
    std::env::remove_var("AUTH_EMAIL");
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::EnvVarNotFound(_))));

    std::env::set_var("QUOTE_FORM_FILE", "form.json");
    std::env::set_var("QUOTE_PRODUCT_ID", "  ");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.form_file, "form.json");
    assert_eq!(config.product_id, None);
    assert!(config.auth_user().is_none());

    std::env::set_var("AUTH_EMAIL", "jane@example.com");
    assert!(matches!(AppConfig::from_env(), Err(ConfigError::InvalidValue(_))));

    std::env::set_var("AUTH_UID", "b1");
    std::env::set_var("QUOTE_PRODUCT_ID", "p1");
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.product_id.as_deref(), Some("p1"));
    let user = config.auth_user().unwrap();
    assert_eq!(user.uid, "b1");
    assert_eq!(user.email.as_deref(), Some("jane@example.com"));
}
