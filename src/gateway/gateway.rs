use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::refresh::RefreshCoordinator;
use super::request::{ApiRequest, FormPart, PartContent, RequestBody, IDEMPOTENCY_KEY_HEADER};
use super::response::ApiResponse;
use crate::config::{ApiConfig, AuthEndpointsConfig};
use crate::error::ApiError;

/// What the gateway may ask of the session store during recovery.
#[async_trait]
pub trait SessionControl: Send + Sync {
    /// Renew the access credential. Must not go through the gateway.
    async fn refresh_token(&self) -> Result<(), ApiError>;
    /// Drop the local session. Never fails.
    async fn logout(&self);
}

/// Build a reqwest client that reads and writes the shared cookie jar.
pub fn build_http_client(config: &ApiConfig, jar: Arc<Jar>) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder().cookie_provider(jar);
    if let Some(ms) = config.timeout_in_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    builder
        .build()
        .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {}", e)))
}

/// Sends requests with the session cookies and transparently recovers from
/// an expired access credential.
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    endpoints: AuthEndpointsConfig,
    session: Arc<dyn SessionControl>,
    refresh: Arc<RefreshCoordinator>,
}

impl Gateway {
    pub fn new(
        http: reqwest::Client,
        api: &ApiConfig,
        endpoints: &AuthEndpointsConfig,
        session: Arc<dyn SessionControl>,
    ) -> Self {
        Gateway {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            endpoints: endpoints.clone(),
            session,
            refresh: Arc::new(RefreshCoordinator::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn refresh_coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.refresh
    }

    /// Send `request` and return the response of a successful status.
    ///
    /// A 401 triggers one refresh (shared with any concurrent caller) and a
    /// single re-issue of the request. The request counts as retried from that
    /// point, so a 401 on the re-issue is final. Transport errors and other
    /// failure statuses are returned as they are.
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let generation = self.refresh.generation();
        let response = self.execute(request).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return response.error_for_status();
        }

        if self.is_auth_endpoint(&request.path) {
            debug!(
                event_name = "gateway.unauthorized.auth_endpoint",
                event_domain = "gateway",
                path = request.path.as_str(),
                "authentication endpoint rejected the request; not refreshing"
            );
            return Err(ApiError::Unauthorized {
                path: request.path.clone(),
            });
        }

        if self.refresh.generation() == generation {
            self.refresh.refresh(Arc::clone(&self.session)).await?;
        } else {
            debug!(
                event_name = "gateway.refresh.already_done",
                event_domain = "gateway",
                path = request.path.as_str(),
                "credentials were renewed after this request was sent; retrying directly"
            );
        }

        debug!(
            event_name = "gateway.retry",
            event_domain = "gateway",
            method = %request.method,
            path = request.path.as_str(),
            "re-issuing request after refresh"
        );
        let retried = self.execute(request).await?;
        if retried.status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                path: request.path.clone(),
            });
        }
        retried.error_for_status()
    }

    /// The refresh and login calls must never themselves trigger a refresh.
    fn is_auth_endpoint(&self, path: &str) -> bool {
        path.contains(&self.endpoints.refresh_path) || path.contains(&self.endpoints.login_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(key) = &request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        debug!(
            event_name = "gateway.send",
            event_domain = "gateway",
            method = %request.method,
            path = request.path.as_str(),
            "sending request"
        );
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(
            event_name = "gateway.response",
            event_domain = "gateway",
            path = request.path.as_str(),
            status = status.as_u16(),
            "received response"
        );
        Ok(ApiResponse::new(status, body))
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        form = match &part.content {
            PartContent::Text(value) => form.text(part.name.clone(), value.clone()),
            PartContent::File {
                file_name,
                mime,
                bytes,
            } => {
                let mut file = Part::bytes(bytes.clone()).file_name(file_name.clone());
                if let Some(mime) = mime {
                    file = file.mime_str(mime).map_err(|e| {
                        ApiError::InvalidRequest(format!("bad mime type '{}': {}", mime, e))
                    })?;
                }
                form.part(part.name.clone(), file)
            }
        };
    }
    Ok(form)
}
