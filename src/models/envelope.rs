use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const SUCCESS: &str = "success";

/// The `{ status, data, message?, count? }` wrapper every endpoint answers with.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
    pub count: Option<u64>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS
    }

    /// Fail unless the server reported success; the payload itself may still be absent.
    pub fn ensure_success(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Application {
                message: self.message,
            })
        }
    }

    /// The payload of a successful envelope.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.ensure_success()?
            .data
            .ok_or_else(|| ApiError::Decode("success envelope without data".to_string()))
    }
}

/// A list payload together with the total number of matching records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Some list endpoints return a single object where an array is expected.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
