//! Client construction and wiring.
//!
//! Builds the shared cookie jar, the two HTTP clients that use it, the profile
//! storage, the session store and the gateway, and hands out the endpoint
//! wrappers bound to them.

use std::sync::Arc;

use reqwest::cookie::Jar;
use tracing::info;

use crate::api::{AuthApi, BasketApi, CategoriesApi, OrdersApi, ProductsApi, UsersApi};
use crate::config::ConfigV1;
use crate::error::ApiError;
use crate::gateway::{build_http_client, Gateway};
use crate::models::image_url;
use crate::session::{Session, SessionStore};
use crate::storage::create_storage;

pub struct Storefront {
    config: Arc<ConfigV1>,
    session: Arc<SessionStore>,
    gateway: Gateway,
}

impl Storefront {
    /// Wire a client from configuration. Nothing is sent until a call is made.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if an HTTP client cannot be built.
    pub fn new(config: &ConfigV1) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let storage = create_storage(&config.session.storage);

        // The session store's client bypasses the gateway but shares its cookies.
        let session = Arc::new(SessionStore::new(
            build_http_client(&config.api, jar.clone())?,
            &config.api,
            &config.auth,
            storage,
        ));
        let gateway = Gateway::new(
            build_http_client(&config.api, jar)?,
            &config.api,
            &config.auth,
            session.clone(),
        );

        info!("Storefront client configured for {}", config.api.base_url);

        Ok(Storefront {
            config: Arc::new(config.clone()),
            session,
            gateway,
        })
    }

    pub fn config(&self) -> &ConfigV1 {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Restore the persisted profile, if any.
    pub fn hydrate(&self) -> Session {
        self.session.hydrate();
        self.session.session()
    }

    /// Confirm the session with the server.
    pub async fn check_auth(&self) -> Session {
        self.session.check_auth(&self.gateway).await
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.gateway, &self.session)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.gateway)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(&self.gateway)
    }

    pub fn basket(&self) -> BasketApi<'_> {
        BasketApi::new(&self.gateway)
    }

    pub fn orders(&self) -> OrdersApi<'_> {
        OrdersApi::new(&self.gateway)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.gateway)
    }

    /// Absolute URL of a product or category image.
    pub fn image_url(&self, name: &str) -> String {
        image_url(&self.config.api.pictures_url, name)
    }
}
