//! Type definitions for the Pipeboard API

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// List endpoint payload, either a bare array or a `{"results": [...]}` wrapper
///
/// The backend is inconsistent about which shape it returns; this is a
/// normalization shim applied once at the client boundary so callers only ever
/// see a `Vec`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `{"results": [...]}` wrapper
    Wrapped {
        /// The wrapped items
        results: Vec<T>,
    },
    /// Bare array
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Collapse either shape into the item list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Wrapped { results } => results,
            ListResponse::Bare(items) => items,
        }
    }
}

/// A pipeline: a backend-managed directed graph of processing nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Username of the owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    /// Node/edge graph definition, passed through as JSON
    #[serde(default)]
    pub graph: Value,
    /// Whether the pipeline is active
    #[serde(default)]
    pub is_active: bool,
    /// Whether the last validation passed
    #[serde(default)]
    pub is_valid: bool,
    /// Monotonic version counter
    #[serde(default)]
    pub version: u32,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Number of nodes in the graph
    #[serde(default)]
    pub node_count: u32,
    /// Number of edges in the graph
    #[serde(default)]
    pub edge_count: u32,
    /// Creation timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// State of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    /// Created, not yet started
    Pending,
    /// Currently executing
    Running,
    /// Finished successfully
    Success,
    /// Finished with an error
    Failed,
    /// Cancelled before completion
    Cancelled,
}

/// How a run executes on the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Block the launch call until the run completes
    Sync,
    /// Queue the run and return immediately
    #[default]
    Async,
}

/// User-supplied input values keyed by node id, then port name
pub type Manifest = BTreeMap<String, BTreeMap<String, Value>>;

/// Payload for launching a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRequest {
    /// Pipeline to run
    pub pipeline: String,
    /// Input values for the run
    pub input_manifest: Manifest,
    /// Execution mode
    #[serde(default)]
    pub execution_mode: ExecutionMode,
}

/// A single execution of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Unique identifier
    pub id: String,
    /// Pipeline this run belongs to
    pub pipeline: String,
    /// Pipeline display name, denormalized by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_name: Option<String>,
    /// Current state
    pub status: RunStatus,
    /// Input values the run was launched with
    #[serde(default)]
    pub input_manifest: Manifest,
    /// Execution mode
    #[serde(default)]
    pub execution_mode: ExecutionMode,
    /// Creation timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Start timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    /// Completion timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    /// Wall-clock duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Error description for failed runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// State of one step within a run
///
/// Distinct from [`RunStatus`]: a step can be skipped when an upstream step
/// fails, and a step is never cancelled individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    /// Not yet started
    Pending,
    /// Currently executing
    Running,
    /// Finished successfully
    Success,
    /// Finished with an error
    Failed,
    /// Skipped because an upstream step failed
    Skipped,
}

/// Captured output of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLogs {
    /// Graph node the step executed
    pub node_id: String,
    /// Final state of the step
    pub status: StepStatus,
    /// Captured standard output
    #[serde(default)]
    pub stdout: String,
    /// Captured standard error
    #[serde(default)]
    pub stderr: String,
    /// Error description for failed steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Consolidated logs of a run, with per-step breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunLogs {
    /// Run the logs belong to
    pub run_id: String,
    /// Current state of the run
    pub status: RunStatus,
    /// Combined log text of the whole run
    #[serde(default)]
    pub logs: String,
    /// Error description for failed runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Per-step output, in execution order
    #[serde(default)]
    pub steps: Vec<StepLogs>,
}

/// Result of validating a pipeline's graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineValidation {
    /// `"valid"` when the graph passed validation
    pub status: String,
    /// Node ids in topological execution order
    #[serde(default)]
    pub execution_order: Vec<String>,
    /// Node ids grouped into layers that may run in parallel
    #[serde(default)]
    pub execution_layers: Vec<Vec<String>>,
}

/// Standalone export of a pipeline definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineExport {
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Node/edge graph definition, passed through as JSON
    #[serde(default)]
    pub graph: Value,
    /// Version counter at export time
    #[serde(default)]
    pub version: u32,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Export timestamp (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}
