//! Authenticated Request Gateway.
//!
//! Every call to the storefront API goes through [`Gateway::send`], which
//! attaches the session cookies and recovers from an expired access
//! credential with at most one in-flight refresh.

pub mod gateway;
pub mod refresh;
pub mod request;
pub mod response;

pub use gateway::{build_http_client, Gateway, SessionControl};
pub use refresh::RefreshCoordinator;
pub use request::{ApiRequest, FormPart, PartContent, RequestBody, IDEMPOTENCY_KEY_HEADER};
pub use response::ApiResponse;
