//! HTTP client wrapper

use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::{RawResponse, Response};

/// HTTP client wrapper
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create an HttpClient from a reqwest::Client
    pub fn from_reqwest(client: reqwest::Client) -> Self {
        Self { inner: client }
    }

    // === Simple convenience methods ===

    /// GET request, returns JSON deserialized to R
    pub async fn fetch<R>(&self, url: &str) -> Response<R>
    where
        R: DeserializeOwned,
    {
        self.get(url).send_json().await
    }

    // === Raw request methods ===

    /// GET request returning raw response body
    pub async fn get_raw(&self, url: &str) -> Response<RawResponse> {
        self.get(url).send().await
    }

    // === Request builder methods ===

    /// GET request builder
    pub fn get(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), reqwest::Method::GET, url)
    }

    /// POST request builder
    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), reqwest::Method::POST, url)
    }

    /// PUT request builder
    pub fn put(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), reqwest::Method::PUT, url)
    }

    /// DELETE request builder
    pub fn delete(&self, url: &str) -> RequestBuilder {
        RequestBuilder::new(self.inner.clone(), reqwest::Method::DELETE, url)
    }
}

/// HTTP client builder for transport-level options
#[derive(Debug)]
pub struct HttpClientBuilder {
    follow_redirects: bool,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            follow_redirects: true,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    /// Follow HTTP redirects (default: true)
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Accept invalid TLS certificates (development setups only)
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let redirect_policy = if self.follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .redirect(redirect_policy)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(HttpError::from)?;

        Ok(HttpClient { inner: client })
    }
}

/// Convenience function for simple GET requests
pub async fn fetch<R: DeserializeOwned>(url: &str) -> Response<R> {
    HttpClient::new().fetch(url).await
}
