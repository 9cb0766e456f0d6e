use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Id;

/// Catalog classification carried in `Product::catalogs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Regular,
    /// Priced per subsidy region; the server computes the price for a chosen region.
    Certificate,
}

impl Catalog {
    pub const REGULAR_CODE: i64 = 1;
    pub const CERTIFICATE_CODE: i64 = 2;

    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(Self::CERTIFICATE_CODE) => Catalog::Certificate,
            _ => Catalog::Regular,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub id: Id,
    /// File name relative to the pictures root.
    pub name: String,
}

/// A characteristic attached to a product, e.g. size or colour, with its allowed values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductCharacteristic {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_values")]
    pub value: Vec<String>,
    /// Per-value prices, positionally aligned with `value`. Only sizes carry them.
    pub prices: Option<Vec<f64>>,
}

impl ProductCharacteristic {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name
    }
}

/// Category reference embedded in a product.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductCategory {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Id,
    #[serde(default)]
    pub article: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub old_price: Option<f64>,
    pub preview: Option<String>,
    pub nameplate: Option<String>,
    pub catalogs: Option<i64>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub description: Option<String>,
    #[serde(default)]
    pub characteristic: Vec<ProductCharacteristic>,
    /// Price for the region the product was fetched with (certificate catalog only).
    pub certificate_price: Option<f64>,
    #[serde(default)]
    pub categories: Vec<ProductCategory>,
}

impl Product {
    pub fn catalog(&self) -> Catalog {
        Catalog::from_code(self.catalogs)
    }

    /// Find a characteristic by case-insensitive name.
    pub fn characteristic_named(&self, name: &str) -> Option<&ProductCharacteristic> {
        let name = name.to_lowercase();
        self.characteristic.iter().find(|c| c.is_named(&name))
    }
}

/// Query parameters for `GET /product`.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// JSON-encoded characteristic filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    pub offset: u64,
    pub limit: u64,
    /// Comma-separated catalog codes, e.g. "1,2".
    pub catalogs: String,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(rename = "article", skip_serializing_if = "Option::is_none")]
    pub search_article: Option<String>,
}

impl ProductQuery {
    /// Query for one page of `limit` products, numbering pages from 1.
    pub fn page(page: u64, limit: u64) -> Self {
        ProductQuery {
            offset: page.saturating_sub(1) * limit,
            limit,
            catalogs: format!("{},{}", Catalog::REGULAR_CODE, Catalog::CERTIFICATE_CODE),
            ..Default::default()
        }
    }
}

/// Characteristic values arrive as strings, numbers, booleans or null.
fn lenient_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    let items = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(single) => vec![single],
    };
    Ok(items
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_codes() {
        assert_eq!(Catalog::from_code(Some(2)), Catalog::Certificate);
        assert_eq!(Catalog::from_code(Some(1)), Catalog::Regular);
        assert_eq!(Catalog::from_code(None), Catalog::Regular);
    }

    #[test]
    fn test_product_decodes_loose_characteristics() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 15,
                "name": "Костыли подмышечные",
                "price": 2400,
                "catalogs": 1,
                "characteristic": [
                    {"id": 3, "name": "Размер", "value": ["S", "M", 52], "prices": [2400, 2600, 2800]},
                    {"id": 4, "name": "Складные", "value": true},
                    {"id": 5, "name": "Цвет", "value": null}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(product.id, Id::from(15));
        let size = product.characteristic_named("размер").unwrap();
        assert_eq!(size.value, vec!["S", "M", "52"]);
        assert_eq!(product.characteristic[1].value, vec!["true"]);
        assert!(product.characteristic[2].value.is_empty());
    }

    #[test]
    fn test_query_page_offsets() {
        let query = ProductQuery::page(3, 20);
        assert_eq!(query.offset, 40);
        assert_eq!(query.catalogs, "1,2");
        assert_eq!(ProductQuery::page(0, 20).offset, 0);
    }
}
