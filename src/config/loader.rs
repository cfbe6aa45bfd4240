//! Configuration file discovery and loading.
//!
//! Layers are merged in this order (later overrides earlier):
//! 1. User global config (`~/.audit-console/config.yml`)
//! 2. Project config (`.audit-console.yml` in the working directory)
//! 3. Environment variables (`AUDIT_CONSOLE_*`)
//!
//! An explicit `--config` file replaces layers 1 and 2.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::config::merger::merge_layers;
use crate::config::schema::ConsoleConfig;
use crate::error::{ConsoleError, Result};

/// Environment variable overriding `base_url`.
pub const ENV_URL: &str = "AUDIT_CONSOLE_URL";
/// Environment variable overriding `username`.
pub const ENV_USERNAME: &str = "AUDIT_CONSOLE_USERNAME";
/// Environment variable overriding `idle_timeout_secs`.
pub const ENV_IDLE_TIMEOUT: &str = "AUDIT_CONSOLE_IDLE_TIMEOUT";

/// Paths of the config files that exist, in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `~/.audit-console/config.yml`
    pub user_global: Option<PathBuf>,
    /// `.audit-console.yml`
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given working directory.
    pub fn discover(work_dir: &Path) -> Self {
        Self {
            user_global: dirs::home_dir()
                .map(|home| home.join(".audit-console").join("config.yml"))
                .filter(|p| p.is_file()),
            project: Some(work_dir.join(".audit-console.yml")).filter(|p| p.is_file()),
        }
    }

    /// Existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

/// Load one config file as a raw YAML value.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConsoleError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConsoleError::Io(e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Mapping(Mapping::new()));
    }

    serde_yaml::from_str(&content).map_err(|e| ConsoleError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Build the environment layer from `AUDIT_CONSOLE_*` variables.
pub fn env_layer(env: &HashMap<String, String>) -> Result<Value> {
    let mut layer = Mapping::new();

    if let Some(url) = env.get(ENV_URL).filter(|v| !v.is_empty()) {
        layer.insert("base_url".into(), url.as_str().into());
    }
    if let Some(username) = env.get(ENV_USERNAME).filter(|v| !v.is_empty()) {
        layer.insert("username".into(), username.as_str().into());
    }
    if let Some(raw) = env.get(ENV_IDLE_TIMEOUT).filter(|v| !v.is_empty()) {
        let secs: u64 = raw
            .trim()
            .parse()
            .map_err(|_| ConsoleError::ConfigValidationError {
                message: format!("{} must be a number of seconds, got '{}'", ENV_IDLE_TIMEOUT, raw),
            })?;
        layer.insert("idle_timeout_secs".into(), secs.into());
    }

    Ok(Value::Mapping(layer))
}

/// Load and merge configuration.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit file is missing and
/// `ConfigParseError` if any layer is invalid.
pub fn load_config(
    work_dir: &Path,
    explicit: Option<&Path>,
    env: &HashMap<String, String>,
) -> Result<ConsoleConfig> {
    let mut layers = Vec::new();

    match explicit {
        Some(path) => layers.push(load_config_value(path)?),
        None => {
            for path in ConfigPaths::discover(work_dir).all_existing() {
                tracing::debug!("Loading config layer {}", path.display());
                layers.push(load_config_value(path)?);
            }
        }
    }
    layers.push(env_layer(env)?);

    let merged = merge_layers(&layers);
    let source = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| work_dir.join(".audit-console.yml"));

    serde_yaml::from_value(merged).map_err(|e| ConsoleError::ConfigParseError {
        path: source,
        message: format!("Failed to parse merged config: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn discover_finds_project_config() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".audit-console.yml"), "username: a").unwrap();

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
    }

    #[test]
    fn project_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".audit-console.yml"),
            "base_url: https://audit.internal\nidle_timeout_secs: 120\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None, &HashMap::new()).unwrap();
        assert_eq!(config.base_url, "https://audit.internal");
        assert_eq!(config.idle_timeout_secs, 120);
    }

    #[test]
    fn env_overrides_files() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".audit-console.yml"),
            "base_url: https://audit.internal\n",
        )
        .unwrap();

        let config = load_config(
            temp.path(),
            None,
            &env(&[(ENV_URL, "http://localhost:9000"), (ENV_IDLE_TIMEOUT, "30")]),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.idle_timeout_secs, 30);
    }

    #[test]
    fn explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigNotFound { .. }));
    }

    #[test]
    fn explicit_file_replaces_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".audit-console.yml"), "username: project").unwrap();
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "base_url: http://other").unwrap();

        let config = load_config(temp.path(), Some(&explicit), &HashMap::new()).unwrap();
        assert_eq!(config.base_url, "http://other");
        assert_eq!(config.username, None);
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "base_url: [unclosed").unwrap();
        let err = load_config(temp.path(), Some(&path), &HashMap::new()).unwrap_err();
        assert!(matches!(err, ConsoleError::ConfigParseError { .. }));
    }

    #[test]
    fn bad_idle_timeout_env_is_rejected() {
        let err = env_layer(&env(&[(ENV_IDLE_TIMEOUT, "ten")])).unwrap_err();
        assert!(err.to_string().contains(ENV_IDLE_TIMEOUT));
    }

    #[test]
    fn empty_file_is_empty_layer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        let config = load_config(temp.path(), Some(&path), &HashMap::new()).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }
}
