//! Launch a pipeline run from an input manifest
//!
//! Expects PIPEBOARD_URL, PIPEBOARD_COOKIES and a pipeline id as the first
//! command line argument.

use pipeboard_client::{ApiClient, ExecutionMode, Manifest};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let pipeline_id = std::env::args()
        .nth(1)
        .ok_or("usage: launch_run <pipeline-id>")?;

    let base_url =
        std::env::var("PIPEBOARD_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let cookies = std::env::var("PIPEBOARD_COOKIES").unwrap_or_default();

    let client = ApiClient::builder()
        .base_url(&base_url)
        .cookies(&cookies)
        .build()?;

    let mut manifest = Manifest::new();
    manifest
        .entry("node_1".to_string())
        .or_default()
        .insert("input".to_string(), json!("hello"));

    let run = client
        .launch_run(&pipeline_id, manifest, ExecutionMode::Async)
        .await?;
    println!("Launched run {} ({:?})", run.id, run.status);

    Ok(())
}
