//! HTTP request builder

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::HttpError;
use crate::response::{RawResponse, Response};

/// Buffered HTTP request builder
///
/// Headers are collected in call order and collapsed at send time with
/// last-write-wins semantics, so callers can override defaults set earlier
/// (e.g. a default `Content-Type`) by setting the same header name again.
#[derive(Debug)]
pub struct RequestBuilder {
    client: reqwest::Client,
    method: reqwest::Method,
    url: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Response<Vec<u8>>>,
}

impl RequestBuilder {
    pub(crate) fn new(client: reqwest::Client, method: reqwest::Method, url: &str) -> Self {
        Self {
            client,
            method,
            url: url.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Add a header to the request
    ///
    /// Setting the same header name again replaces the earlier value.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Append a query parameter
    ///
    /// Parameters are serialized in insertion order.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append several query parameters at once, preserving their order
    pub fn query_pairs<'a, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Set the request body as JSON
    ///
    /// Also sets `Content-Type: application/json`; a later `header` call with
    /// the same name overrides it. Serialization failures surface at send time.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_vec(body).map_err(HttpError::from));
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self
    }

    /// Send the request and return a raw response
    pub async fn send(self) -> Response<RawResponse> {
        let mut request = self.client.request(self.method.clone(), &self.url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        request = request.headers(collapse_headers(&self.headers)?);

        if let Some(body) = self.body {
            request = request.body(body?);
        }

        tracing::debug!("{} {}", self.method, self.url);
        let response = request.send().await.map_err(HttpError::from)?;
        Ok(RawResponse::new(response))
    }

    /// Send the request and deserialize the response as JSON
    ///
    /// A non-2xx status yields [`HttpError::Status`] carrying the raw body
    /// text; the body is never returned to the caller on that path.
    pub async fn send_json<R: DeserializeOwned>(self) -> Response<R> {
        let response = self.send().await?;
        let status = response.status();

        if !response.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HttpError::Status { status, message });
        }

        response.json().await
    }
}

/// Collapse an ordered header list into a map, last write per name winning
fn collapse_headers(headers: &[(String, String)]) -> Response<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| HttpError::Build(format!("Invalid header name {key:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::Build(format!("Invalid header value for {key:?}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}
