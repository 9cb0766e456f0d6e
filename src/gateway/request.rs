use http::Method;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub content: PartContent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart {
            name: name.into(),
            content: PartContent::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        FormPart {
            name: name.into(),
            content: PartContent::File {
                file_name: file_name.into(),
                mime: mime.map(str::to_string),
                bytes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    /// Kept as parts rather than a built form so the request can be sent again after a refresh.
    Multipart(Vec<FormPart>),
}

/// A request described independently of any HTTP client, so it can be re-issued verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with '/'.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Sent with every attempt of a non-idempotent request so a replay after
    /// refresh can be recognised by the server.
    pub idempotency_key: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let idempotency_key = needs_idempotency_key(&method).then(|| Uuid::new_v4().to_string());
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            idempotency_key,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Add every non-null field of `params` as a query parameter.
    pub fn query<T: Serialize>(mut self, params: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(params)? {
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
                Ok(self)
            }
            other => Err(ApiError::InvalidRequest(format!(
                "query parameters must be an object, got {}",
                other
            ))),
        }
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

fn needs_idempotency_key(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductQuery;

    #[test]
    fn test_only_mutations_get_idempotency_keys() {
        assert!(ApiRequest::get("/product").idempotency_key.is_none());
        assert!(ApiRequest::post("/order").idempotency_key.is_some());
        assert!(ApiRequest::delete("/basket/1").idempotency_key.is_some());
        assert_ne!(
            ApiRequest::post("/order").idempotency_key,
            ApiRequest::post("/order").idempotency_key
        );
    }

    #[test]
    fn test_query_skips_absent_fields() {
        let mut query = ProductQuery::page(2, 10);
        query.search_term = Some("тонометр".to_string());
        let request = ApiRequest::get("/product").query(&query).unwrap();

        assert!(request
            .query
            .contains(&("name".to_string(), "тонометр".to_string())));
        assert!(request
            .query
            .contains(&("offset".to_string(), "10".to_string())));
        assert!(!request.query.iter().any(|(k, _)| k == "article"));
    }

    #[test]
    fn test_query_rejects_non_object() {
        assert!(ApiRequest::get("/product").query(&vec![1, 2]).is_err());
    }
}
