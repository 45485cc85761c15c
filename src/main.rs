use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::{error, info, warn};

use hairbuysell_quotes::config::{AppConfig, ConfigError, MongoConfig};
use hairbuysell_quotes::dto::QuoteFormValues;
use hairbuysell_quotes::repository::{self, MongoMarketplaceRepository, MongoQuoteRequestRepository};
use hairbuysell_quotes::service::{QuoteFormController, SubmitOutcome, WatchAuthProvider};
use hairbuysell_quotes::util::logger::Logger;
use hairbuysell_quotes::util::notify::TracingNotifier;

fn read_form(path: &str) -> Result<QuoteFormValues, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::InvalidValue(format!("Cannot read {}: {}", path, e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError(format!("{}: {}", path, e)))
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to set up logging: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = dotenv_result {
        warn!("Failed to load .env file: {} (using system env vars)", e);
    }

    info!("Starting headless quote submission");

    let (app_config, mongo_config, form) = match AppConfig::from_env().and_then(|app| {
        let mongo = MongoConfig::from_env()?;
        let form = read_form(&app.form_file)?;
        Ok((app, mongo, form))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let db = match repository::connect(&mongo_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to MongoDB: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let marketplace = Arc::new(MongoMarketplaceRepository::new(&db, &mongo_config.collections));
    let quotes = Arc::new(MongoQuoteRequestRepository::new(
        &db,
        &mongo_config.collections.quote_requests,
    ));
    let auth = Arc::new(WatchAuthProvider::new(app_config.auth_user()));

    let controller = QuoteFormController::new(marketplace, quotes, auth, Arc::new(TracingNotifier));
    controller.initialize().await;
    controller.load_product(app_config.product_id.as_deref()).await;
    controller.fill(&form);

    let result = controller.submit().await;
    controller.teardown();

    match result {
        Ok(SubmitOutcome::Sent(request)) => {
            info!(id = ?request.id, "Quote request stored");
            ExitCode::SUCCESS
        }
        Ok(SubmitOutcome::AlreadySubmitting) => ExitCode::FAILURE,
        Err(e) => {
            for field_error in e.field_errors() {
                error!(field = %field_error.field, "{}", field_error.message);
            }
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
