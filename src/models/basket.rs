use serde::{Deserialize, Serialize};

use super::Id;

/// A chosen product option (size, colour, ...) keyed by characteristic id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DynamicOption {
    pub id: i64,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BasketItem {
    /// Basket line id, not the product id.
    pub id: Id,
    pub product_id: Id,
    pub name: String,
    pub article: Option<String>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub total_price: f64,
    pub iso: Option<String>,
    pub selected_options: Option<Vec<DynamicOption>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Basket {
    #[serde(default)]
    pub items: Vec<BasketItem>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total_price: f64,
    pub total_price_with_promotion: Option<f64>,
}

/// Body of `POST /basket`. A negative `quantity` decrements an existing line.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AddToBasket {
    pub product_id: Id,
    pub quantity: i64,
    pub iso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_options: Option<Vec<DynamicOption>>,
}
