//! HTTP client wrapper for the Pipeboard SDK
//!
//! This crate wraps the underlying HTTP library behind a small surface so the
//! higher-level SDK crates never depend on `reqwest` directly. It knows nothing
//! about CSRF tokens, bearer auth, or the pipeline data model; that lives in
//! `pipeboard-client`.
//!
//! # Example
//!
//! ```no_run
//! use pipeboard_http_client::{HttpClient, Response};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct ApiResponse {
//!     message: String,
//! }
//!
//! async fn example() -> Response<ApiResponse> {
//!     let client = HttpClient::new();
//!     client.fetch("https://api.example.com/data").await
//! }
//! ```

mod client;
mod error;
mod request;
mod response;

pub use client::{fetch, HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use request::RequestBuilder;
pub use response::{RawResponse, Response};
