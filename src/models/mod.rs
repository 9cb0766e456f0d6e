//! Wire types exchanged with the storefront REST API.

pub mod basket;
pub mod category;
pub mod envelope;
pub mod id;
pub mod order;
pub mod product;
pub mod user;

pub use basket::{AddToBasket, Basket, BasketItem, DynamicOption};
pub use category::{Category, CategoryFilter, CategoryImage, Characteristic};
pub use envelope::{Envelope, Page};
pub use id::Id;
pub use order::{Order, OrderItem, OrderStatus, PaymentDetails, PaymentLink};
pub use product::{Catalog, Product, ProductCharacteristic, ProductImage, ProductQuery};
pub use user::{UserPage, UserProfile, UserSummary};

/// Join the static pictures root with an image file name.
pub fn image_url(pictures_url: &str, name: &str) -> String {
    format!(
        "{}/{}",
        pictures_url.trim_end_matches('/'),
        name.trim_start_matches('/')
    )
}
