//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::NaiveDate;
use core_kernel::ProductId;
use domain_policy::{PolicyHolder, PolicyRecord, PolicyStatus, Product, ProductType, RatingResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{DateFixtures, PartyFixtures};

/// Builder for catalog products
pub struct ProductBuilder {
    id: ProductId,
    name: String,
    product_type: ProductType,
    base_price: Decimal,
    coverage_min: Decimal,
    coverage_max: Decimal,
    features: Vec<String>,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates a health product priced at 8000
    pub fn new() -> Self {
        Self {
            id: ProductId::new(),
            name: "Test Health Plan".to_string(),
            product_type: ProductType::Health,
            base_price: dec!(8000),
            coverage_min: dec!(200000),
            coverage_max: dec!(10000000),
            features: vec!["Hospitalization Cover".to_string()],
        }
    }

    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_base_price(mut self, base_price: Decimal) -> Self {
        self.base_price = base_price;
        self
    }

    pub fn with_coverage(mut self, min: Decimal, max: Decimal) -> Self {
        self.coverage_min = min;
        self.coverage_max = max;
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Product {
        Product::new(
            self.id,
            self.name,
            self.product_type,
            self.base_price,
            self.coverage_min,
            self.coverage_max,
        )
        .with_features(self.features)
    }
}

/// Builder for stored policies
pub struct PolicyRecordBuilder {
    holder: PolicyHolder,
    quote: RatingResult,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    policy_number: Option<String>,
    status: PolicyStatus,
    reminder_sent: bool,
}

impl Default for PolicyRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRecordBuilder {
    /// Creates an active one-year health policy for the standard holder
    pub fn new() -> Self {
        Self {
            holder: PartyFixtures::holder(),
            quote: RatingResult {
                product_id: ProductId::new(),
                product_name: "Test Health Plan".to_string(),
                product_type: ProductType::Health,
                premium_amount: dec!(8000.00),
                breakdown: [("Base Premium", dec!(8000.00))].into_iter().collect(),
                coverage_amount: dec!(10000000),
            },
            start_date: DateFixtures::policy_start(),
            end_date: None,
            policy_number: Some("POL-2026-0001".to_string()),
            status: PolicyStatus::Active,
            reminder_sent: false,
        }
    }

    pub fn with_holder(mut self, holder: PolicyHolder) -> Self {
        self.holder = holder;
        self
    }

    /// Uses the product, premium, and breakdown of a quote
    pub fn from_quote(mut self, quote: RatingResult) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    /// Overrides the one-year end date
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = Some(number.into());
        self
    }

    /// Leaves the policy pending payment, without a number
    pub fn pending(mut self) -> Self {
        self.status = PolicyStatus::PendingPayment;
        self.policy_number = None;
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.status = status;
        self
    }

    pub fn reminded(mut self) -> Self {
        self.reminder_sent = true;
        self
    }

    pub fn build(self) -> PolicyRecord {
        let mut policy = PolicyRecord::from_quote(self.holder, &self.quote, self.start_date);
        if let Some(end_date) = self.end_date {
            policy.end_date = end_date;
        }
        policy.policy_number = self.policy_number;
        policy.status = self.status;
        policy.renewal_reminder_sent = self.reminder_sent;
        policy
    }
}
