//! Product catalog
//!
//! Products are read-only inputs to rating. The catalog is the lookup
//! boundary: the rating engine is only ever invoked with a resolved product.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::ProductId;

use crate::error::PolicyError;

/// Line of business a product belongs to
///
/// Codes outside the three known lines are kept verbatim in `Unknown`; no
/// type-specific rating rules apply to them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    Vehicle,
    Health,
    Life,
    Unknown(String),
}

impl ProductType {
    /// Returns the upper-case product type code
    pub fn code(&self) -> &str {
        match self {
            ProductType::Vehicle => "VEHICLE",
            ProductType::Health => "HEALTH",
            ProductType::Life => "LIFE",
            ProductType::Unknown(code) => code,
        }
    }

    /// Returns true for the three rated lines of business
    pub fn is_known(&self) -> bool {
        !matches!(self, ProductType::Unknown(_))
    }
}

impl From<&str> for ProductType {
    fn from(code: &str) -> Self {
        match code {
            "VEHICLE" => ProductType::Vehicle,
            "HEALTH" => ProductType::Health,
            "LIFE" => ProductType::Life,
            other => ProductType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ProductType {
    fn from(code: String) -> Self {
        ProductType::from(code.as_str())
    }
}

impl From<ProductType> for String {
    fn from(product_type: ProductType) -> Self {
        match product_type {
            ProductType::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An insurance product offered for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub category: Option<String>,
    /// Annual base premium before any rating factor
    pub base_price: Decimal,
    pub coverage_min: Decimal,
    /// Coverage quoted when the applicant does not ask for a specific amount
    pub coverage_max: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Creates a product with no category, description, or features
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        product_type: ProductType,
        base_price: Decimal,
        coverage_min: Decimal,
        coverage_max: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            product_type,
            category: None,
            base_price,
            coverage_min,
            coverage_max,
            description: None,
            features: Vec::new(),
        }
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the marketing description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the list of coverage features
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the catalog invariants for a product
    ///
    /// # Errors
    ///
    /// Returns `InvalidProduct` if the base price is not positive or the
    /// coverage bounds are inverted
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.base_price <= Decimal::ZERO {
            return Err(PolicyError::invalid_product(format!(
                "{}: base price must be positive, got {}",
                self.name, self.base_price
            )));
        }
        if self.coverage_min > self.coverage_max {
            return Err(PolicyError::invalid_product(format!(
                "{}: coverage_min {} exceeds coverage_max {}",
                self.name, self.coverage_min, self.coverage_max
            )));
        }
        Ok(())
    }
}

/// Product lookup used by the rating service
pub trait ProductCatalog: Send + Sync {
    /// Finds a product by identifier
    fn find(&self, id: &ProductId) -> Option<Product>;

    /// Lists every product in the catalog
    fn list(&self) -> Vec<Product>;
}

/// Catalog held in memory, keyed by product id
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductCatalog {
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryProductCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product after validating it
    pub fn insert(&mut self, product: Product) -> Result<(), PolicyError> {
        product.validate()?;
        self.products.insert(product.id, product);
        Ok(())
    }

    /// Builds a catalog from a list of products
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Result<Self, PolicyError> {
        let mut catalog = Self::new();
        for product in products {
            catalog.insert(product)?;
        }
        Ok(catalog)
    }

    /// Parses a JSON array of products
    ///
    /// # Errors
    ///
    /// Returns `Serialization` for malformed JSON and `InvalidProduct` for
    /// products that fail validation
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::from_products(products)
    }

    /// The standard product line-up
    pub fn seeded() -> Self {
        let products = seed_products();
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True if the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryProductCatalog {
    fn find(&self, id: &ProductId) -> Option<Product> {
        self.products.get(id).cloned()
    }

    fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }
}

/// Identifiers of the seeded products
pub mod seed {
    use core_kernel::ProductId;

    pub const COMPREHENSIVE_CAR: ProductId = ProductId::from_u128(1);
    pub const TWO_WHEELER: ProductId = ProductId::from_u128(2);
    pub const FAMILY_HEALTH_SHIELD: ProductId = ProductId::from_u128(3);
    pub const SENIOR_CITIZEN_HEALTH: ProductId = ProductId::from_u128(4);
    pub const TERM_LIFE: ProductId = ProductId::from_u128(5);
    pub const WHOLE_LIFE: ProductId = ProductId::from_u128(6);
}

fn seed_products() -> Vec<Product> {
    vec![
        Product::new(seed::COMPREHENSIVE_CAR, "Comprehensive Car Insurance", ProductType::Vehicle, dec!(5000), dec!(100000), dec!(5000000))
            .with_category("AUTO")
            .with_description("Complete protection for your vehicle including third-party liability, own damage, and theft coverage")
            .with_features(["Own Damage Cover", "Third Party Liability", "Personal Accident Cover", "Zero Depreciation", "Roadside Assistance"]),
        Product::new(seed::TWO_WHEELER, "Two Wheeler Insurance", ProductType::Vehicle, dec!(1500), dec!(50000), dec!(500000))
            .with_category("BIKE")
            .with_description("Affordable insurance for your two-wheeler with comprehensive coverage")
            .with_features(["Own Damage", "Third Party", "Personal Accident", "Accessories Cover"]),
        Product::new(seed::FAMILY_HEALTH_SHIELD, "Family Health Shield", ProductType::Health, dec!(8000), dec!(200000), dec!(10000000))
            .with_category("MEDICAL")
            .with_description("Comprehensive health coverage for you and your family")
            .with_features(["Hospitalization Cover", "Pre & Post Hospitalization", "Day Care Procedures", "Ambulance Charges", "No Claim Bonus"]),
        Product::new(seed::SENIOR_CITIZEN_HEALTH, "Senior Citizen Health Plan", ProductType::Health, dec!(15000), dec!(300000), dec!(5000000))
            .with_category("SENIOR")
            .with_description("Specialized health insurance for senior citizens with pre-existing disease cover")
            .with_features(["Pre-existing Disease Cover", "No Medical Tests", "Domiciliary Hospitalization", "AYUSH Treatment"]),
        Product::new(seed::TERM_LIFE, "Term Life Insurance", ProductType::Life, dec!(10000), dec!(1000000), dec!(50000000))
            .with_category("TERM")
            .with_description("Pure life protection with high coverage at affordable premiums")
            .with_features(["Death Benefit", "Terminal Illness Benefit", "Accidental Death Benefit", "Tax Benefits"]),
        Product::new(seed::WHOLE_LIFE, "Whole Life Insurance", ProductType::Life, dec!(25000), dec!(500000), dec!(10000000))
            .with_category("WHOLE_LIFE")
            .with_description("Lifetime protection with savings component")
            .with_features(["Lifetime Coverage", "Maturity Benefit", "Loan Facility", "Bonus Additions"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_type_codes() {
        assert_eq!(ProductType::from("VEHICLE"), ProductType::Vehicle);
        assert_eq!(ProductType::from("vehicle"), ProductType::Unknown("vehicle".to_string()));
        assert_eq!(String::from(ProductType::Unknown("TRAVEL".to_string())), "TRAVEL");
    }

    #[test]
    fn test_seeded_catalog() {
        let catalog = InMemoryProductCatalog::seeded();
        assert_eq!(catalog.len(), 6);
        let car = catalog.find(&seed::COMPREHENSIVE_CAR).unwrap();
        assert_eq!(car.base_price, dec!(5000));
        assert_eq!(car.product_type, ProductType::Vehicle);
        assert!(catalog.list().iter().all(|p| p.validate().is_ok()));
    }

    #[test]
    fn test_insert_rejects_non_positive_base_price() {
        let mut catalog = InMemoryProductCatalog::new();
        let product = Product::new(ProductId::new(), "Free", ProductType::Life, dec!(0), dec!(1), dec!(2));
        assert!(matches!(catalog.insert(product), Err(PolicyError::InvalidProduct(_))));
        assert!(catalog.is_empty());
    }
}
