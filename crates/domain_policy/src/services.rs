//! Policy domain services
//!
//! This module contains the application-facing services that combine the
//! product catalog with the pure rating engine.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::PolicyError;
use crate::product::{Product, ProductCatalog};
use crate::rating::{rate, RatingRequest, RatingResult};

/// Service for rating (premium calculation)
///
/// The RatingService resolves the requested product and runs the rating
/// engine against it. It holds no mutable state and can be shared freely
/// between threads.
#[derive(Clone)]
pub struct RatingService {
    catalog: Arc<dyn ProductCatalog>,
}

impl RatingService {
    /// Creates a new rating service over a product catalog
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Calculates a premium quote
    ///
    /// # Arguments
    ///
    /// * `request` - Product identifier plus applicant details
    ///
    /// # Returns
    ///
    /// The rated premium with its itemised breakdown
    ///
    /// # Errors
    ///
    /// Returns `ProductNotFound` if the catalog has no such product
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let service = RatingService::new(Arc::new(InMemoryProductCatalog::seeded()));
    /// let quote = service.quote(&RatingRequest::new(seed::TERM_LIFE).with_age(35))?;
    /// println!("premium: {}", quote.premium_amount);
    /// ```
    pub fn quote(&self, request: &RatingRequest) -> Result<RatingResult, PolicyError> {
        let product = self.catalog.find(&request.product_id).ok_or_else(|| {
            warn!(product_id = %request.product_id, "Quote requested for unknown product");
            PolicyError::ProductNotFound(request.product_id)
        })?;

        if !product.product_type.is_known() {
            debug!(
                product_id = %product.id,
                product_type = %product.product_type,
                "No line-specific rules for product type"
            );
        }

        let result = rate(&product, request);

        for entry in &result.breakdown {
            debug!(label = %entry.label, amount = %entry.amount, "Rating adjustment");
        }
        info!(
            product_id = %product.id,
            product_type = %product.product_type,
            premium = %result.premium_amount,
            coverage = %result.coverage_amount,
            "Premium calculated"
        );

        Ok(result)
    }

    /// Lists the products available for quoting
    pub fn products(&self) -> Vec<Product> {
        self.catalog.list()
    }
}
