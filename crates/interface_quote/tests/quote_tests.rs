//! Quote Tool Tests
//!
//! Drives the library entry points the binary uses: request decoding,
//! quoting against the built-in catalog, and file-based configuration.

use std::path::PathBuf;
use std::sync::Arc;

use domain_policy::{InMemoryProductCatalog, RatingService};
use interface_quote::config::QuoteConfig;
use interface_quote::{parse_request, quote_json, run, QuoteError};

fn service() -> RatingService {
    RatingService::new(Arc::new(InMemoryProductCatalog::seeded()))
}

/// Writes `contents` to a per-test file in the temp directory
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("premium-quote-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

mod request_tests {
    use super::*;

    /// Numbers and strings are both accepted for amounts
    #[test]
    fn test_amounts_as_numbers_or_strings() {
        let request = parse_request(
            r#"{
                "productId": "00000000-0000-0000-0000-000000000005",
                "age": 35,
                "coverageAmount": "2500000",
                "lifeDetails": { "sumAssured": 1000000, "occupation": "MEDIUM" }
            }"#,
        )
        .unwrap();

        assert_eq!(request.age, Some(35));
        assert_eq!(request.coverage_amount.map(|c| c.to_string()), Some("2500000".to_string()));
    }

    /// Garbage input is an invalid request
    #[test]
    fn test_malformed_request() {
        assert!(matches!(parse_request("[1, 2"), Err(QuoteError::InvalidRequest(_))));
    }
}

mod quote_tests {
    use super::*;

    /// The seeded car product quotes the SUV example
    #[test]
    fn test_quote_json_seeded_car() {
        let output = quote_json(
            &service(),
            r#"{
                "productId": "00000000-0000-0000-0000-000000000001",
                "age": 30,
                "vehicleDetails": { "vehicleType": "SUV" }
            }"#,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["productName"], "Comprehensive Car Insurance");
        assert_eq!(json["premiumAmount"], 7500.0);
        assert_eq!(json["breakdown"]["Vehicle Type Factor"], 2500.0);
        assert_eq!(json["coverageAmount"], 5000000.0);
    }

    /// Unknown products fail with the catalog's not-found message
    #[test]
    fn test_quote_json_unknown_product() {
        let err = quote_json(
            &service(),
            r#"{ "productId": "00000000-0000-0000-0000-0000000000ff" }"#,
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Product not found"));
    }
}

mod run_tests {
    use super::*;

    /// Catalog and request are read from the configured files
    #[tokio::test]
    async fn test_run_with_files() {
        let catalog = temp_file(
            "catalog.json",
            r#"[{
                "id": "00000000-0000-0000-0000-000000000abc",
                "name": "Travel Cover",
                "type": "TRAVEL",
                "base_price": 2000,
                "coverage_min": 10000,
                "coverage_max": 400000
            }]"#,
        );
        let request = temp_file(
            "request.json",
            r#"{ "productId": "00000000-0000-0000-0000-000000000abc", "coverageAmount": 250000 }"#,
        );
        let config = QuoteConfig {
            catalog_path: Some(catalog.clone()),
            request_path: Some(request.clone()),
            ..QuoteConfig::default()
        };

        let output = run(&config).await.unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["productType"], "TRAVEL");
        assert_eq!(json["premiumAmount"], 2300.0);
        assert_eq!(json["breakdown"]["Coverage Amount"], 300.0);

        std::fs::remove_file(catalog).ok();
        std::fs::remove_file(request).ok();
    }

    /// A missing request file is an I/O error naming the path
    #[tokio::test]
    async fn test_run_missing_request_file() {
        let config = QuoteConfig {
            request_path: Some(PathBuf::from("/nonexistent/request.json")),
            ..QuoteConfig::default()
        };

        let err = run(&config).await.unwrap_err();

        assert!(matches!(err, QuoteError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/request.json"));
    }
}
