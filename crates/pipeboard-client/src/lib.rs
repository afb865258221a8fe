//! API client for the Pipeboard pipeline-management backend
//!
//! The entry point is [`ApiClient`], built with [`ApiClient::builder`]. It owns
//! the shared client configuration (base URL, CSRF token, optional bearer
//! token), injects the default headers on every request, classifies responses,
//! and records one [`Alert`] per failed operation on its [`AlertSink`].
//!
//! # Example
//!
//! ```no_run
//! use pipeboard_client::ApiClient;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::builder()
//!         .base_url("https://pipeboard.example.com")
//!         .cookies("sessionid=s1; csrftoken=abc123")
//!         .build()?;
//!
//!     for pipeline in client.list_pipelines().await? {
//!         println!("{}: {}", pipeline.id, pipeline.name);
//!     }
//!     Ok(())
//! }
//! ```

mod alert;
mod client;
mod cookie;
mod error;
mod types;

pub use alert::{Alert, AlertPhase, AlertSink, AlertStack, ALERT_FADE, ALERT_TTL};
pub use client::{ApiClient, ApiClientBuilder, Method, Outcome};
pub use cookie::{cookie_value, csrf_token, CSRF_COOKIE};
pub use error::{Error, Result};
pub use types::{
    ExecutionMode, LaunchRequest, ListResponse, Manifest, Pipeline, PipelineExport, PipelineRun,
    PipelineValidation, RunLogs, RunStatus, StepLogs, StepStatus,
};
