//! Premium quote binary
//!
//! # Usage
//!
//! ```bash
//! echo '{"productId":"00000000-0000-0000-0000-000000000005","age":35}' | premium-quote
//!
//! QUOTE_REQUEST_PATH=request.json QUOTE_CATALOG_PATH=products.json premium-quote
//! ```
//!
//! # Environment Variables
//!
//! * `QUOTE_LOG_LEVEL` - Log level when RUST_LOG is unset (default: info)
//! * `QUOTE_LOG_JSON` - Emit JSON log lines (default: false)
//! * `QUOTE_CATALOG_PATH` - Product catalog JSON file (default: built-in products)
//! * `QUOTE_REQUEST_PATH` - Request JSON file (default: stdin)

use anyhow::Context;
use interface_quote::config::QuoteConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = QuoteConfig::from_env().context("loading QUOTE_* configuration")?;
    init_tracing(&config);

    let output = interface_quote::run(&config).await?;
    println!("{output}");
    Ok(())
}

/// Logs go to stderr so stdout carries only the quote
fn init_tracing(config: &QuoteConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text = (!config.log_json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}
