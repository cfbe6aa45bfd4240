//! Configuration loading and validation.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery, environment overrides and loading in [`loader`]
//! - Layer merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use audit_console::config::{load_config, ConsoleConfig};
//! use std::collections::HashMap;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".audit-console.yml"), "base_url: http://audit.test").unwrap();
//!
//! let config = load_config(temp.path(), None, &HashMap::new()).unwrap();
//! config.validate().unwrap();
//! assert_eq!(config.base_url, "http://audit.test");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{
    env_layer, load_config, load_config_value, ConfigPaths, ENV_IDLE_TIMEOUT, ENV_URL,
    ENV_USERNAME,
};
pub use merger::{deep_merge, merge_layers};
pub use schema::ConsoleConfig;
