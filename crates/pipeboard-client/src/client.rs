//! HTTP client for the Pipeboard API

use std::path::Path;
use std::sync::{Arc, RwLock};

use pipeboard_http_client::{HttpClient, RawResponse, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::instrument;
use url::Url;

use crate::alert::{AlertSink, AlertStack};
use crate::cookie;
use crate::error::{Error, Result};
use crate::types::{
    ExecutionMode, LaunchRequest, ListResponse, Manifest, Pipeline, PipelineExport, PipelineRun,
    PipelineValidation, RunLogs, StepLogs,
};

const API_PATH_PIPELINES: &str = "/api/pipelines/";
const API_PATH_RUNS: &str = "/api/runs/";

/// HTTP method of a request descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Successful response outcome
///
/// JSON bodies are parsed once at this boundary; anything else is handed back
/// raw so callers can stream or inspect it themselves.
#[derive(Debug)]
pub enum Outcome {
    /// Response declared `application/json` and parsed as such
    Json(Value),
    /// Response with any other content type, unparsed
    Raw(RawResponse),
}

/// Main client for interacting with the Pipeboard API
///
/// Holds the shared client configuration: base URL, CSRF token, and the
/// bearer token, which is mutable after construction via [`set_auth_token`].
/// Every failing operation records exactly one alert on the configured sink
/// and returns `Err`; success paths record nothing.
///
/// [`set_auth_token`]: ApiClient::set_auth_token
pub struct ApiClient {
    base_url: Url,
    csrf_token: Option<String>,
    auth_token: RwLock<Option<String>>,
    http: HttpClient,
    alerts: Arc<dyn AlertSink>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("csrf_token", &self.csrf_token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for a base URL with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Set the bearer token used on subsequent requests
    ///
    /// Requests already in flight are unaffected.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.write_token() = Some(token.into());
    }

    /// Remove the bearer token; subsequent requests carry no Authorization header
    pub fn clear_auth_token(&self) {
        *self.write_token() = None;
    }

    /// The sink receiving one alert per failed operation
    pub fn alert_sink(&self) -> &Arc<dyn AlertSink> {
        &self.alerts
    }

    // === Generic operations ===

    /// GET a JSON resource
    ///
    /// Query pairs are appended in insertion order, only when non-empty.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        self.report(self.request_json(Method::Get, path, query, None).await)
    }

    /// GET a list endpoint, normalizing bare and `{"results": [...]}` shapes
    #[instrument(skip(self))]
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        self.report(
            self.request_json::<ListResponse<T>>(Method::Get, path, query, None)
                .await,
        )
        .map(ListResponse::into_vec)
    }

    /// POST a JSON body, returning the parsed JSON response
    #[instrument(skip(self, body))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let result = match serde_json::to_value(body) {
            Ok(value) => self.request_json(Method::Post, path, &[], Some(value)).await,
            Err(e) => Err(Error::Serde(e)),
        };
        self.report(result)
    }

    /// PUT a JSON body, returning the parsed JSON response
    #[instrument(skip(self, body))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let result = match serde_json::to_value(body) {
            Ok(value) => self.request_json(Method::Put, path, &[], Some(value)).await,
            Err(e) => Err(Error::Serde(e)),
        };
        self.report(result)
    }

    /// DELETE a resource
    ///
    /// Returns the outcome rather than a typed value because delete endpoints
    /// commonly answer 204 No Content.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Outcome> {
        self.report(self.execute(Method::Delete, path, &[], None, &[]).await)
    }

    /// Execute a full request descriptor
    ///
    /// The low-level entry point behind the typed helpers: explicit method,
    /// query pairs, optional JSON body, and header overrides (caller-supplied
    /// headers replace defaults on name collision).
    #[instrument(skip(self, body, headers))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<Outcome> {
        self.report(
            self.execute(method, path, query, body.cloned(), headers)
                .await,
        )
    }

    /// Download binary content to a destination path
    ///
    /// Bypasses the JSON path entirely. On a non-2xx status the body is used
    /// only to derive the error message and is never read as bytes; nothing is
    /// written to `dest`. Returns the number of bytes written.
    #[instrument(skip(self))]
    pub async fn download(&self, path: &str, dest: &Path) -> Result<u64> {
        self.report(self.download_inner(path, dest).await)
    }

    // === Typed pipeline/run operations ===

    /// List all pipelines
    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        self.get_list(API_PATH_PIPELINES, &[]).await
    }

    /// Fetch a single pipeline
    pub async fn get_pipeline(&self, id: &str) -> Result<Pipeline> {
        self.get(&format!("{API_PATH_PIPELINES}{id}/"), &[]).await
    }

    /// Validate a pipeline's graph on the backend
    ///
    /// An invalid graph answers 400 with the validation errors in the body, so
    /// it surfaces here as [`Error::Api`].
    pub async fn validate_pipeline(&self, id: &str) -> Result<PipelineValidation> {
        let result = self
            .request_json(
                Method::Post,
                &format!("{API_PATH_PIPELINES}{id}/validate/"),
                &[],
                None,
            )
            .await;
        self.report(result)
    }

    /// Duplicate a pipeline, optionally under a new name
    pub async fn duplicate_pipeline(&self, id: &str, name: Option<&str>) -> Result<Pipeline> {
        let body = match name {
            Some(name) => json!({ "name": name }),
            None => json!({}),
        };
        self.post(&format!("{API_PATH_PIPELINES}{id}/duplicate/"), &body)
            .await
    }

    /// Export a pipeline definition as a standalone document
    pub async fn export_pipeline(&self, id: &str) -> Result<PipelineExport> {
        self.get(&format!("{API_PATH_PIPELINES}{id}/export/"), &[])
            .await
    }

    /// Launch a run of a pipeline with the given input manifest
    #[instrument(skip(self, manifest))]
    pub async fn launch_run(
        &self,
        pipeline_id: &str,
        manifest: Manifest,
        mode: ExecutionMode,
    ) -> Result<PipelineRun> {
        let request = LaunchRequest {
            pipeline: pipeline_id.to_string(),
            input_manifest: manifest,
            execution_mode: mode,
        };
        self.post(API_PATH_RUNS, &request).await
    }

    /// List runs, optionally filtered to one pipeline
    pub async fn list_runs(&self, pipeline_id: Option<&str>) -> Result<Vec<PipelineRun>> {
        match pipeline_id {
            Some(id) => self.get_list(API_PATH_RUNS, &[("pipeline", id)]).await,
            None => self.get_list(API_PATH_RUNS, &[]).await,
        }
    }

    /// Fetch a single run
    pub async fn get_run(&self, id: &str) -> Result<PipelineRun> {
        self.get(&format!("{API_PATH_RUNS}{id}/"), &[]).await
    }

    /// Cancel a pending or running run
    pub async fn cancel_run(&self, id: &str) -> Result<PipelineRun> {
        let result = self
            .request_json(Method::Post, &format!("{API_PATH_RUNS}{id}/cancel/"), &[], None)
            .await;
        self.report(result)
    }

    /// Retry a failed run with its original manifest
    pub async fn retry_run(&self, id: &str) -> Result<PipelineRun> {
        let result = self
            .request_json(Method::Post, &format!("{API_PATH_RUNS}{id}/retry/"), &[], None)
            .await;
        self.report(result)
    }

    /// Fetch the consolidated logs of a run, with per-step breakdown
    pub async fn run_logs(&self, id: &str) -> Result<RunLogs> {
        self.get(&format!("{API_PATH_RUNS}{id}/logs/"), &[]).await
    }

    /// Fetch the captured output of a single step of a run
    pub async fn step_logs(&self, run_id: &str, step_id: &str) -> Result<StepLogs> {
        self.get(
            &format!("{API_PATH_RUNS}{run_id}/logs/"),
            &[("step_id", step_id)],
        )
        .await
    }

    /// Download the artefact a run produced at a given node
    pub async fn download_artefact(
        &self,
        run_id: &str,
        node_id: &str,
        dest: &Path,
    ) -> Result<u64> {
        let mut url = self.endpoint(&format!("{API_PATH_RUNS}{run_id}/download/"))?;
        url.query_pairs_mut().append_pair("node_id", node_id);
        self.download(url.as_str(), dest).await
    }

    // === Internals ===

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn write_token(&self) -> std::sync::RwLockWriteGuard<'_, Option<String>> {
        self.auth_token.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply the default headers: JSON content type, CSRF token, bearer token
    fn prepare(&self, mut builder: RequestBuilder) -> RequestBuilder {
        builder = builder.header("Content-Type", "application/json");
        if let Some(csrf) = &self.csrf_token {
            builder = builder.header("X-CSRFToken", csrf);
        }
        let token = self.auth_token.read().unwrap_or_else(|e| e.into_inner());
        if let Some(token) = token.as_deref() {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Result<Outcome> {
        let url = self.endpoint(path)?;
        let mut builder = match method {
            Method::Get => self.http.get(url.as_str()),
            Method::Post => self.http.post(url.as_str()),
            Method::Put => self.http.put(url.as_str()),
            Method::Delete => self.http.delete(url.as_str()),
        };

        builder = self.prepare(builder);
        if !query.is_empty() {
            builder = builder.query_pairs(query.iter().copied());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }
        // Overrides last so they win over the defaults
        for (key, value) in headers {
            builder = builder.header(*key, *value);
        }

        tracing::debug!("Making {} request to {}", method, url);
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !response.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: derive_message(status, &body_text),
            });
        }

        if response.is_json() {
            let text = response.text().await?;
            let value = serde_json::from_str(&text).map_err(|e| {
                Error::Http(pipeboard_http_client::HttpError::Parse(e.to_string()))
            })?;
            Ok(Outcome::Json(value))
        } else {
            Ok(Outcome::Raw(response))
        }
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T> {
        match self.execute(method, path, query, body, &[]).await? {
            Outcome::Json(value) => Ok(serde_json::from_value(value)?),
            Outcome::Raw(raw) => Err(Error::NotJson(
                raw.content_type().unwrap_or("no content type").to_string(),
            )),
        }
    }

    async fn download_inner(&self, path: &str, dest: &Path) -> Result<u64> {
        let url = self.endpoint(path)?;
        let builder = self.prepare(self.http.get(url.as_str()));

        tracing::debug!("Downloading {}", url);
        let response = builder.send().await?;
        let status = response.status();

        if !response.is_success() {
            // Error message only; the body is never treated as payload
            let body_text = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: derive_message(status, &body_text),
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), dest.display());
        Ok(bytes.len() as u64)
    }

    /// Funnel every failure through the alert invariant: one alert, one log line
    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            let message = err.display_message();
            tracing::error!("{}", message);
            self.alerts.push(&message);
        }
        result
    }
}

/// Derive the user-facing message for a non-2xx response body
///
/// JSON bodies contribute their `error` or `detail` string field; otherwise
/// the raw text is used, and an empty body falls back to `HTTP <status>`.
fn derive_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["error", "detail"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_string()
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    csrf_token: Option<String>,
    auth_token: Option<String>,
    http: Option<HttpClient>,
    alerts: Option<Arc<dyn AlertSink>>,
}

impl std::fmt::Debug for ApiClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientBuilder")
            .field("base_url", &self.base_url)
            .field("csrf_token", &self.csrf_token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClientBuilder {
    /// Set the base URL requests are resolved against
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read the CSRF token out of a cookie string
    ///
    /// A cookie string without a `csrftoken` cookie leaves the token unset.
    pub fn cookies(mut self, cookies: &str) -> Self {
        self.csrf_token = cookie::csrf_token(cookies);
        self
    }

    /// Set the CSRF token directly
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Set the initial bearer token
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Use a preconfigured HTTP client
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Record alerts on the given sink instead of the shared global stack
    pub fn alert_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.alerts = Some(sink);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Custom("base URL is required".to_string()))?;
        let alerts: Arc<dyn AlertSink> = match self.alerts {
            Some(sink) => sink,
            None => AlertStack::global(),
        };
        Ok(ApiClient {
            base_url: Url::parse(&base_url)?,
            csrf_token: self.csrf_token,
            auth_token: RwLock::new(self.auth_token),
            http: self.http.unwrap_or_default(),
            alerts,
        })
    }
}
