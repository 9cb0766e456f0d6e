//! Library exports for the storefront client, shared between the binary and tests.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod utils;

pub use client::Storefront;
pub use error::ApiError;
