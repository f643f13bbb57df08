//! Premium breakdown
//!
//! An ordered list of labelled deltas. Each entry is the amount one rating
//! step added to (or, when negative, removed from) the running premium; the
//! first entry is always the base premium.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use core_kernel::round_currency;

/// One labelled adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownEntry {
    pub label: String,
    pub amount: Decimal,
}

/// Ordered mapping from adjustment label to signed amount
///
/// Serialises as a JSON object whose keys keep insertion order and whose
/// values are plain numbers. Amounts read back from either numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    /// Creates an empty breakdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an amount under a label
    ///
    /// Writing an existing label replaces its amount in place, keeping the
    /// label's original position.
    pub fn record(&mut self, label: impl Into<String>, amount: Decimal) {
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => entry.amount = amount,
            None => self.entries.push(BreakdownEntry { label, amount }),
        }
    }

    /// Returns the amount recorded under a label
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.amount)
    }

    /// True if the label was recorded with a non-zero amount
    pub fn has_nonzero(&self, label: &str) -> bool {
        self.get(label).is_some_and(|amount| !amount.is_zero())
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &BreakdownEntry> {
        self.entries.iter()
    }

    /// Labels in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all recorded amounts, saturating at the bounds of `Decimal`
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |sum, e| sum.saturating_add(e.amount))
    }

    /// Returns a copy with every amount rounded to two decimals independently
    pub fn rounded(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|e| BreakdownEntry {
                    label: e.label.clone(),
                    amount: round_currency(e.amount),
                })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Breakdown {
    type Item = &'a BreakdownEntry;
    type IntoIter = std::slice::Iter<'a, BreakdownEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<L: Into<String>> FromIterator<(L, Decimal)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (L, Decimal)>>(iter: I) -> Self {
        let mut breakdown = Breakdown::new();
        for (label, amount) in iter {
            breakdown.record(label, amount);
        }
        breakdown
    }
}

struct NumericAmount<'a>(&'a Decimal);

impl Serialize for NumericAmount<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(self.0, serializer)
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &NumericAmount(&entry.amount))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Breakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = Breakdown;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of adjustment labels to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Breakdown, A::Error> {
                let mut breakdown = Breakdown::new();
                while let Some((label, amount)) = access.next_entry::<String, Decimal>()? {
                    breakdown.record(label, amount);
                }
                Ok(breakdown)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}
