pub mod diagnose;
pub mod example;
pub mod init;
pub mod list;

use std::path::Path;

use anyhow::Result;

use titulacion_client::{create_evaluator, load_config_from, HttpEvaluator};

/// Build the evaluator from config, with `--endpoint` taking precedence.
pub fn build_evaluator(endpoint: Option<String>, config_path: Option<&Path>) -> Result<HttpEvaluator> {
    let mut config = load_config_from(config_path)?;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    tracing::debug!(endpoint = %config.endpoint, timeout_secs = ?config.timeout_secs, "evaluator configured");
    create_evaluator(&config)
}
