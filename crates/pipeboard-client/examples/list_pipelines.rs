//! Basic usage example for the Pipeboard client
//!
//! This example demonstrates:
//! - Creating a client from a base URL and cookie string
//! - Listing pipelines and their runs
//! - Error handling and the alert stack

use std::sync::Arc;

use pipeboard_client::{AlertStack, ApiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("PIPEBOARD_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let cookies = std::env::var("PIPEBOARD_COOKIES").unwrap_or_default();

    let alerts = Arc::new(AlertStack::new());
    let client = ApiClient::builder()
        .base_url(&base_url)
        .cookies(&cookies)
        .alert_sink(alerts.clone())
        .build()?;

    if let Ok(token) = std::env::var("PIPEBOARD_TOKEN") {
        client.set_auth_token(token);
    }

    println!("=== Pipelines on {base_url} ===");
    match client.list_pipelines().await {
        Ok(pipelines) => {
            for pipeline in &pipelines {
                println!(
                    "{} {} (nodes: {}, active: {})",
                    pipeline.id, pipeline.name, pipeline.node_count, pipeline.is_active
                );
            }

            if let Some(first) = pipelines.first() {
                println!("\n=== Runs of {} ===", first.name);
                for run in client.list_runs(Some(&first.id)).await? {
                    println!("{} {:?}", run.id, run.status);
                }
            }
        }
        Err(e) => {
            eprintln!("Error listing pipelines: {e}");
        }
    }

    for alert in alerts.active() {
        eprintln!("[alert] {}", alert.message);
    }

    Ok(())
}
