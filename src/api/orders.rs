use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::gateway::{ApiRequest, ApiResponse, Gateway};
use crate::models::{Id, Order, OrderStatus, PaymentDetails, PaymentLink};

#[derive(Serialize)]
struct StatusChange<'a> {
    order_id: &'a Id,
    status: OrderStatus,
}

pub struct OrdersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> OrdersApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        OrdersApi { gateway }
    }

    /// Every order in the shop. Admin only; the server enforces it.
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        self.gateway.send(&ApiRequest::get("/order")).await?.data()
    }

    /// Orders of the logged-in user.
    pub async fn mine(&self) -> Result<Vec<Order>, ApiError> {
        self.gateway.send(&ApiRequest::get("/order/my")).await?.data()
    }

    /// Turn the basket into an order and get the payment page to send the buyer to.
    pub async fn checkout(&self, details: &PaymentDetails) -> Result<String, ApiError> {
        let request = ApiRequest::post("/order").json(details)?;
        let url = payment_url(self.gateway.send(&request).await?)?;
        info!(
            event_name = "order.checkout",
            event_domain = "order",
            "order created; payment link issued"
        );
        Ok(url)
    }

    /// Retry payment of an existing order, optionally with new contact details.
    pub async fn pay(&self, id: &Id, details: Option<&PaymentDetails>) -> Result<String, ApiError> {
        let mut request = ApiRequest::post(format!("/order/{}", id));
        if let Some(details) = details {
            request = request.json(details)?;
        }
        payment_url(self.gateway.send(&request).await?)
    }

    pub async fn change_status(&self, id: &Id, status: OrderStatus) -> Result<(), ApiError> {
        let request = ApiRequest::put("/order/status").json(&StatusChange {
            order_id: id,
            status,
        })?;
        self.gateway.send(&request).await?.ensure_success()
    }
}

/// A successful answer without a link is still a failed payment start.
fn payment_url(response: ApiResponse) -> Result<String, ApiError> {
    let link: PaymentLink = response.data()?;
    link.url
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Application {
            message: Some("payment link missing".to_string()),
        })
}
