//! Thin typed wrappers over the storefront REST endpoints.
//!
//! Every call goes through the [`Gateway`](crate::gateway::Gateway), so an
//! expired session is refreshed transparently before any of these see a 401.

pub mod auth;
pub mod basket;
pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

pub use auth::{AuthApi, Credentials, Registration, VerificationCode};
pub use basket::BasketApi;
pub use categories::{CategoriesApi, CategoryForm, CategoryUpdate, NewCharacteristic};
pub use orders::OrdersApi;
pub use products::{CharacteristicValue, ProductForm, ProductPayload, ProductsApi};
pub use users::UsersApi;

use crate::gateway::FormPart;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Upload {
            file_name: file_name.into(),
            mime: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub(crate) fn into_part(self, name: &str) -> FormPart {
        FormPart::file(name, self.file_name, self.mime.as_deref(), self.bytes)
    }
}
