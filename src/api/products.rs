use serde::Serialize;

use super::Upload;
use crate::error::ApiError;
use crate::gateway::{ApiRequest, FormPart, Gateway};
use crate::models::category::FilterSet;
use crate::models::envelope::OneOrMany;
use crate::models::{CategoryFilter, Id, Page, Product, ProductImage, ProductQuery};

/// Values a product takes for one category characteristic.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CharacteristicValue {
    pub characteristic_id: i64,
    pub value: Vec<String>,
    /// Per-size prices aligned with `value`; only sent for the size characteristic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<f64>>,
}

/// The `json` part of a product create/update form.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub article: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameplate: Option<String>,
    pub category_id: i64,
    pub catalogs: i64,
    pub characteristic_values: Vec<CharacteristicValue>,
    /// Existing images to delete on update.
    pub del_images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub payload: ProductPayload,
    pub files: Vec<Upload>,
}

impl ProductForm {
    fn into_parts(self) -> Result<Vec<FormPart>, ApiError> {
        let mut parts = vec![FormPart::text("json", serde_json::to_string(&self.payload)?)];
        parts.extend(self.files.into_iter().map(|file| file.into_part("files")));
        Ok(parts)
    }
}

pub struct ProductsApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> ProductsApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        ProductsApi { gateway }
    }

    /// One page of the catalog. `total` counts all matching products.
    pub async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let request = ApiRequest::get("/product").query(query)?;
        let envelope = self
            .gateway
            .send(&request)
            .await?
            .envelope::<OneOrMany<Product>>()?
            .ensure_success()?;
        let total = envelope.count.unwrap_or(0);
        let items = envelope.data.map(Vec::from).unwrap_or_default();
        Ok(Page { items, total })
    }

    /// A single product. `iso` is the subsidy region; with it the server fills in
    /// `certificate_price`.
    pub async fn get(&self, id: &Id, iso: Option<&str>) -> Result<Product, ApiError> {
        let mut request = ApiRequest::get(format!("/product/{}", id));
        if let Some(iso) = iso {
            request = request.query_param("iso", iso);
        }
        self.gateway.send(&request).await?.data()
    }

    /// Filterable characteristics of a category.
    pub async fn filters(&self, category_id: i64) -> Result<Vec<CategoryFilter>, ApiError> {
        let request = ApiRequest::get(format!("/product/filter/{}", category_id));
        let filters: FilterSet = self.gateway.send(&request).await?.data()?;
        Ok(filters.into_filters())
    }

    pub async fn create(&self, form: ProductForm) -> Result<(), ApiError> {
        let request = ApiRequest::post("/product").multipart(form.into_parts()?);
        self.gateway.send(&request).await?.ensure_success()
    }

    pub async fn update(&self, id: &Id, form: ProductForm) -> Result<(), ApiError> {
        let request = ApiRequest::put(format!("/product/{}", id)).multipart(form.into_parts()?);
        self.gateway.send(&request).await?.ensure_success()
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("/product/{}", id));
        self.gateway.send(&request).await?.ensure_success()
    }
}
