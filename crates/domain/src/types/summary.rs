//! Sales summary payload returned by `GET /sales/summary`
//!
//! Every field is optional on the wire. Missing or `null` values deserialize
//! to empty collections / zeroes so that the view-model builder never has to
//! special-case them.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// One month of actual or projected figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyPoint {
    /// Sortable month key, `YYYY-MM`
    pub month: String,
    pub count: u64,
    pub revenue: f64,
}

/// Name → value mapping that remembers the order keys were received in.
///
/// Ties in the revenue sort keep this encounter order, which a `HashMap`
/// would lose.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals<V>(Vec<(String, V)>);

impl<V> CategoryTotals<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(name, _)| name == key).map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Insert or overwrite; a new key goes to the end.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }
}

impl<V> Default for CategoryTotals<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for CategoryTotals<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (key, value) in iter {
            totals.insert(key, value);
        }
        totals
    }
}

impl<V: Serialize> Serialize for CategoryTotals<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V> Deserialize<'de> for CategoryTotals<V>
where
    V: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryTotalsVisitor(PhantomData))
    }
}

struct CategoryTotalsVisitor<V>(PhantomData<V>);

impl<'de, V> Visitor<'de> for CategoryTotalsVisitor<V>
where
    V: Deserialize<'de> + Default,
{
    type Value = CategoryTotals<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of category name to value, or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut totals = CategoryTotals::new();
        while let Some((key, value)) = access.next_entry::<String, Option<V>>()? {
            totals.insert(key, value.unwrap_or_default());
        }
        Ok(totals)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryTotals::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryTotals::new())
    }
}

/// Order value extremes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub highest_order_value: f64,
    pub lowest_order_value: f64,
    /// Number of records with a sale price set
    pub orders_with_price: u64,
}

/// Aggregate statistics for the sales summary view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPayload {
    pub total_records: u64,
    pub total_revenue: f64,
    pub average_order_value: f64,

    /// Actual history, oldest month first
    pub monthly_trend: Vec<MonthlyPoint>,
    /// Forward-looking estimates, continuing after `monthly_trend`
    pub monthly_projection: Vec<MonthlyPoint>,

    pub by_zone: CategoryTotals<u64>,
    pub revenue_by_zone: CategoryTotals<f64>,
    pub by_lead_source: CategoryTotals<u64>,
    pub revenue_by_lead_source: CategoryTotals<f64>,
    pub by_sold_by: CategoryTotals<u64>,
    pub revenue_by_sold_by: CategoryTotals<f64>,

    pub order_details: OrderDetails,
}

/// Query parameters accepted by `GET /sales/summary`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilter {
    pub zone: Option<String>,
    pub sold_by: Option<String>,
    /// Inclusive, `YYYY-MM-DD`
    pub date_from: Option<String>,
    /// Inclusive, `YYYY-MM-DD`
    pub date_to: Option<String>,
}

impl SummaryFilter {
    /// Present, non-blank parameters in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("zone", &self.zone),
            ("sold_by", &self.sold_by),
            ("date_from", &self.date_from),
            ("date_to", &self.date_to),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(|v| (name, v))
        })
        .collect()
    }
}
