use tracing::debug;

use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{AddToBasket, Basket, Id};

/// The logged-in user's basket. Mutations return the basket as the server
/// recomputed it, never a locally patched copy.
pub struct BasketApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> BasketApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        BasketApi { gateway }
    }

    pub async fn fetch(&self) -> Result<Basket, ApiError> {
        self.gateway.send(&ApiRequest::get("/basket")).await?.data()
    }

    pub async fn add(&self, item: &AddToBasket) -> Result<Basket, ApiError> {
        let request = ApiRequest::post("/basket").json(item)?;
        self.gateway.send(&request).await?.ensure_success()?;
        debug!("Added product '{}' x{} to basket", item.product_id, item.quantity);
        self.fetch().await
    }

    /// Change a line's quantity by `delta`, which may be negative.
    pub async fn update_quantity(
        &self,
        product_id: &Id,
        delta: i64,
        iso: Option<&str>,
    ) -> Result<Basket, ApiError> {
        let change = AddToBasket {
            product_id: product_id.clone(),
            quantity: delta,
            iso: iso.map(str::to_string),
            dynamic_options: None,
        };
        self.add(&change).await
    }

    /// Remove a basket line by its line id.
    pub async fn remove(&self, id: &Id) -> Result<Basket, ApiError> {
        self.gateway
            .send(&ApiRequest::delete(format!("/basket/{}", id)))
            .await?
            .ensure_success()?;
        self.fetch().await
    }
}
