//! Infrastructure layer - workflow service HTTP client

pub mod workflow_client;

pub use workflow_client::{HttpWorkflowClient, WorkflowEndpoints};
