//! Project-level configuration support
//!
//! Loads per-project configuration from an `entwine.toml` file in the
//! analyzed root.
//!
//! # Configuration Format
//!
//! ```toml
//! # entwine.toml
//!
//! [defaults]
//! format = "json"
//!
//! [exclude]
//! paths = ["vendor/", "db/**"]
//! ```

use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-project configuration file.
pub const CONFIG_FILE: &str = "entwine.toml";

/// Project configuration loaded from `entwine.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,

    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, html, csv, json)
    #[serde(default)]
    pub format: Option<String>,
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Paths/patterns to exclude from analysis
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Config {
    /// Check if a path (relative to the analyzed root) should be excluded
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.exclude
            .paths
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Load project configuration from the analyzed root.
///
/// Returns default configuration if no config file is found; an unreadable
/// or invalid file logs a warning and falls back to defaults.
pub fn load_config(root: &Path) -> Config {
    let toml_path = root.join(CONFIG_FILE);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    Config::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Simple glob pattern matching
fn glob_match(pattern: &str, path: &str) -> bool {
    // Handle **/X/** patterns (match if path contains X as a directory)
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle))
            || path.starts_with(&format!("{}/", middle));
    }

    // Handle ** (match any path segments)
    if pattern.contains("**") {
        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if !prefix.is_empty() && !path.starts_with(prefix) {
                return false;
            }
            if !suffix.is_empty() && !path.ends_with(suffix) {
                return false;
            }

            return true;
        }
    }

    // Handle single * (match within segment)
    if pattern.contains('*') {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.len() == 2 {
            let prefix = parts[0];
            let suffix = parts[1];
            return path.starts_with(prefix) && path.ends_with(suffix);
        }
    }

    // Exact match or prefix match (for directories)
    path.starts_with(pattern) || path == pattern
}
