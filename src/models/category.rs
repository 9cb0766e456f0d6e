use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Id;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryImage {
    pub id: Id,
    pub product_id: Option<i64>,
    pub category_id: i64,
    pub url: Option<String>,
    pub name: String,
}

/// A characteristic declared on a category; products in it fill in values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Characteristic {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default = "default_data_type")]
    pub data_type: String,
    pub values: Option<Value>,
}

fn default_data_type() -> String {
    "string".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub characteristic: Vec<Characteristic>,
    #[serde(default)]
    pub images: Vec<CategoryImage>,
}

/// A filterable characteristic of a category and the values present in its products.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryFilter {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

/// `/product/filter/:id` payload; the list key is spelled both ways.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FilterSet {
    pub characteristics: Option<Vec<CategoryFilter>>,
    pub characteristic: Option<Vec<CategoryFilter>>,
}

impl FilterSet {
    pub fn into_filters(self) -> Vec<CategoryFilter> {
        self.characteristics
            .or(self.characteristic)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_set_accepts_either_key() {
        let a: FilterSet =
            serde_json::from_str(r#"{"characteristic": [{"id": 1, "name": "Размер", "values": ["S"]}]}"#)
                .unwrap();
        let b: FilterSet = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.into_filters().len(), 1);
        assert!(b.into_filters().is_empty());
    }
}
