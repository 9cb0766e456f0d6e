use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Id;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Paid,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "paid" => Ok(OrderStatus::Paid),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: Id,
    pub product_id: Option<Id>,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub total_price: f64,
    pub selected_options: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Id,
    #[serde(default)]
    pub fio: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub address: Option<String>,
    pub total_price: f64,
    /// Kept as text: the back-office may introduce states this client doesn't know.
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub fragment_link: Option<String>,
    pub payment_url: Option<String>,
}

impl Order {
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

/// Contact and delivery data sent when paying for an order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaymentDetails {
    pub email: String,
    pub fio: String,
    pub phone_number: String,
    pub address: String,
}

/// Where to send the buyer to complete payment.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentLink {
    pub url: Option<String>,
}
