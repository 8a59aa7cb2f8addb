//! Client configuration and evaluator factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::{HttpEvaluator, DEFAULT_ENDPOINT};

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "TITULACION_ENDPOINT";

/// Top-level titulacion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitulacionConfig {
    /// URL of the evaluation endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds. Unset means no client-side limit.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for TitulacionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    resolve_vars_with(s, |name| std::env::var(name).ok())
}

/// Substituted values are copied verbatim and never rescanned.
fn resolve_vars_with<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&lookup(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Apply environment overrides through `lookup` (normally `std::env::var`).
fn apply_env_overrides<F>(mut config: TitulacionConfig, lookup: F) -> TitulacionConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
        config.endpoint = endpoint;
    }
    config
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `titulacion.toml` in the current directory
/// 2. `~/.config/titulacion/config.toml`
///
/// Environment variable override: `TITULACION_ENDPOINT`.
pub fn load_config_from(path: Option<&Path>) -> Result<TitulacionConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("titulacion.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<TitulacionConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => TitulacionConfig::default(),
    };

    config = apply_env_overrides(config, |name| std::env::var(name).ok());
    config.endpoint = resolve_env_vars(&config.endpoint);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("titulacion"))
}

/// Create the HTTP evaluator described by `config`.
pub fn create_evaluator(config: &TitulacionConfig) -> Result<HttpEvaluator> {
    let timeout = config.timeout_secs.map(Duration::from_secs);
    HttpEvaluator::new(&config.endpoint, timeout)
        .with_context(|| format!("invalid evaluator configuration for {}", config.endpoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_TITULACION_TEST_HOST", "evaluator.local");
        assert_eq!(
            resolve_env_vars("http://${_TITULACION_TEST_HOST}:5001/api/evaluate"),
            "http://evaluator.local:5001/api/evaluate"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_TITULACION_TEST_HOST");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let lookup = |name: &str| match name {
            "A" => Some("${A}".to_string()),
            "HOST" => Some("${PORT}".to_string()),
            "PORT" => Some("5001".to_string()),
            _ => None,
        };
        assert_eq!(resolve_vars_with("${A}", lookup), "${A}");
        assert_eq!(resolve_vars_with("http://${HOST}/${A}", lookup), "http://${PORT}/${A}");
        assert_eq!(resolve_vars_with("${MISSING}x${PORT}", lookup), "x5001");
        assert_eq!(resolve_vars_with("unclosed ${A", lookup), "unclosed ${A");
    }

    #[test]
    fn default_config() {
        let config = TitulacionConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:5001/api/evaluate");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn parse_config_with_defaults() {
        let config: TitulacionConfig = toml::from_str("timeout_secs = 10\n").unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, Some(10));
    }

    #[test]
    fn env_override_wins_over_file() {
        let config = TitulacionConfig {
            endpoint: "http://from-file/api/evaluate".into(),
            timeout_secs: None,
        };
        let overridden = apply_env_overrides(config.clone(), |name| {
            (name == ENDPOINT_ENV).then(|| "http://from-env/api/evaluate".to_string())
        });
        assert_eq!(overridden.endpoint, "http://from-env/api/evaluate");

        let untouched = apply_env_overrides(config.clone(), |_| Some("  ".to_string()));
        assert_eq!(untouched, config);
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titulacion.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://10.0.0.5:5001/api/evaluate\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, Some(30));
        if std::env::var(ENDPOINT_ENV).is_err() {
            assert_eq!(config.endpoint, "http://10.0.0.5:5001/api/evaluate");
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/titulacion.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn create_evaluator_uses_endpoint() {
        let config = TitulacionConfig {
            endpoint: "http://localhost:9999/api/evaluate".into(),
            timeout_secs: Some(3),
        };
        let evaluator = create_evaluator(&config).unwrap();
        assert_eq!(evaluator.endpoint(), "http://localhost:9999/api/evaluate");
    }
}
