//! Premium quoting from the command line
//!
//! Reads one rating request as JSON, prices it against the product catalog,
//! and returns the rating result as pretty-printed JSON.
//!
//! # Request Format
//!
//! ```json
//! {
//!   "productId": "00000000-0000-0000-0000-000000000001",
//!   "age": 30,
//!   "coverageAmount": 500000,
//!   "vehicleDetails": { "vehicleType": "SUV", "city": "METRO" }
//! }
//! ```

pub mod config;
pub mod error;

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncReadExt;

use domain_policy::{InMemoryProductCatalog, ProductCatalog, RatingRequest, RatingService};

use crate::config::QuoteConfig;
pub use crate::error::QuoteError;

/// Builds the catalog from `catalog_path`, or the built-in products
pub async fn load_catalog(config: &QuoteConfig) -> Result<InMemoryProductCatalog, QuoteError> {
    match &config.catalog_path {
        Some(path) => {
            let json = read_file(path).await?;
            let catalog = InMemoryProductCatalog::from_json(&json)?;
            tracing::info!(path = %path.display(), products = catalog.len(), "Loaded product catalog");
            Ok(catalog)
        }
        None => {
            tracing::debug!("Using built-in product catalog");
            Ok(InMemoryProductCatalog::seeded())
        }
    }
}

/// Reads the request JSON from `request_path`, or stdin
pub async fn read_request(config: &QuoteConfig) -> Result<String, QuoteError> {
    match &config.request_path {
        Some(path) => read_file(path).await,
        None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .map_err(|e| QuoteError::io("<stdin>", e))?;
            Ok(input)
        }
    }
}

async fn read_file(path: &Path) -> Result<String, QuoteError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| QuoteError::io(path, e))
}

/// Decodes a rating request
pub fn parse_request(json: &str) -> Result<RatingRequest, QuoteError> {
    serde_json::from_str(json).map_err(QuoteError::InvalidRequest)
}

/// Prices one request and renders the result as pretty JSON
pub fn quote_json(service: &RatingService, request_json: &str) -> Result<String, QuoteError> {
    let request = parse_request(request_json)?;
    let result = service.quote(&request)?;
    serde_json::to_string_pretty(&result).map_err(|e| QuoteError::Policy(e.into()))
}

/// Loads the catalog and request named by `config` and returns the quote JSON
pub async fn run(config: &QuoteConfig) -> Result<String, QuoteError> {
    let catalog: Arc<dyn ProductCatalog> = Arc::new(load_catalog(config).await?);
    let service = RatingService::new(catalog);
    let request_json = read_request(config).await?;
    quote_json(&service, &request_json)
}
