//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Product entity as served by the product source
///
/// Optional fields are defaulted here, at the deserialization boundary:
/// absent or `null` tags/reviews become empty lists, absent strings become `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// 0-5 stars
    pub rating: f64,
    pub stock: u32,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    /// Opaque review records, only counted
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reviews: Vec<serde_json::Value>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
}

/// Product list plus the pagination metadata reported upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
