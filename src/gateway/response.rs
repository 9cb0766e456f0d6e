use http::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::models::Envelope;

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        ApiResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>, ApiError> {
        self.json()
    }

    /// Payload of a `status: "success"` envelope; anything else is a failure.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        self.envelope::<T>()?.into_data()
    }

    /// Fail unless the envelope reports success, ignoring the payload.
    /// A 2xx without a body (e.g. 204 on delete) counts as success.
    pub fn ensure_success(&self) -> Result<(), ApiError> {
        if self.is_success() && self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        self.envelope::<Value>()?.ensure_success().map(|_| ())
    }

    /// The `message` field of an envelope-shaped body, if any.
    pub fn message(&self) -> Option<String> {
        serde_json::from_slice::<Envelope<Value>>(&self.body)
            .ok()
            .and_then(|envelope| envelope.message)
    }

    /// Turn a non-success HTTP status into `ApiError::Status`.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status.as_u16(),
                message: self.message(),
            })
        }
    }
}
