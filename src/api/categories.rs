use serde::Serialize;

use super::Upload;
use crate::error::ApiError;
use crate::gateway::{ApiRequest, FormPart, Gateway};
use crate::models::{Category, Characteristic};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewCharacteristic {
    pub name: String,
    /// `string`, `number` or `bool`.
    pub data_type: String,
}

#[derive(Serialize)]
struct NewCategory<'a> {
    name: &'a str,
    characteristics: &'a [NewCharacteristic],
}

/// A category to create, with an optional cover image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub characteristics: Vec<NewCharacteristic>,
    pub image: Option<Upload>,
}

/// Body of a category update. Characteristics with id 0 are new.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
    pub characteristics: Vec<Characteristic>,
}

pub struct CategoriesApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> CategoriesApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        CategoriesApi { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.gateway.send(&ApiRequest::get("/category")).await?.data()
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        self.gateway
            .send(&ApiRequest::get(format!("/category/{}", id)))
            .await?
            .data()
    }

    pub async fn create(&self, form: CategoryForm) -> Result<(), ApiError> {
        let json = serde_json::to_string(&NewCategory {
            name: &form.name,
            characteristics: &form.characteristics,
        })?;
        let mut parts = vec![FormPart::text("json", json)];
        if let Some(image) = form.image {
            parts.push(image.into_part("file"));
        }
        let request = ApiRequest::post("/category").multipart(parts);
        self.gateway.send(&request).await?.ensure_success()
    }

    pub async fn update(&self, id: i64, update: &CategoryUpdate) -> Result<(), ApiError> {
        let request = ApiRequest::put(format!("/category/{}", id)).json(update)?;
        self.gateway.send(&request).await?.ensure_success()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .send(&ApiRequest::delete(format!("/category/{}", id)))
            .await?
            .ensure_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::gateway;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_decodes_characteristics() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/category")
            .with_status(200)
            .with_body(
                json!({"status": "success", "data": [
                    {"id": 1, "name": "Ортопедия", "characteristic": [{"id": 3, "name": "Размер", "category_id": 1}]},
                    {"id": 2, "name": "Тонометры"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let categories = CategoriesApi::new(&gateway(&server)).list().await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].characteristic[0].data_type, "string");
        assert!(categories[1].images.is_empty());
    }

    #[tokio::test]
    async fn test_create_without_image_sends_only_json() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/category")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="json""#.to_string()),
                Matcher::Regex(r#""data_type":"number""#.to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"status": "success"}"#)
            .create_async()
            .await;

        let form = CategoryForm {
            name: "Ингаляторы".to_string(),
            characteristics: vec![NewCharacteristic {
                name: "Мощность".to_string(),
                data_type: "number".to_string(),
            }],
            image: None,
        };
        CategoriesApi::new(&gateway(&server)).create(form).await.unwrap();

        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_is_json() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/category/6")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({"name": "Массажёры"})))
            .with_status(200)
            .with_body(r#"{"status": "success"}"#)
            .create_async()
            .await;

        let update = CategoryUpdate {
            name: "Массажёры".to_string(),
            characteristics: vec![Characteristic {
                id: 0,
                name: "Тип".to_string(),
                category_id: 6,
                data_type: "string".to_string(),
                values: None,
            }],
        };
        CategoriesApi::new(&gateway(&server)).update(6, &update).await.unwrap();

        m.assert_async().await;
    }
}
