//! Backend Configuration
//!
//! Read from `form_builder.json` in the app config dir. A missing file means
//! defaults (written out for editing); `FORM_BUILDER_API_URL` and
//! `FORM_BUILDER_USER_ID` override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "form_builder.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Endpoint paths, relative to `api_base_url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub apps: String,
    pub modules_by_app: String,
    pub layouts_by_module: String,
    pub field_catalog: String,
    pub layout_by_id: String,
    pub save_form: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            apps: "/apps".to_string(),
            modules_by_app: "/modules/by-app".to_string(),
            layouts_by_module: "/layouts/by-module".to_string(),
            field_catalog: "/form-builder/fields".to_string(),
            layout_by_id: "/layouts/by-id".to_string(),
            save_form: "/form-builder/save".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_base_url: String,
    /// Sent as `user_id` with every save
    pub user_id: String,
    /// No timeout unless set
    pub timeout_secs: Option<u64>,
    pub endpoints: Endpoints,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            user_id: String::new(),
            timeout_secs: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl BackendConfig {
    /// Load `<dir>/form_builder.json`, then apply environment overrides
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self::load_file(dir)?.with_overrides(|name| std::env::var(name).ok()))
    }

    fn load_file(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            // leave an editable file behind
            let config = Self::default();
            match config.save(dir) {
                Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
                Err(e) => tracing::warn!(error = %e, "no config file, using defaults"),
            }
            return Ok(config);
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("FORM_BUILDER_API_URL").filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(user) = lookup("FORM_BUILDER_USER_ID").filter(|v| !v.is_empty()) {
            self.user_id = user;
        }
        self
    }

    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        let io_err = |source| ConfigError::Io {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(io_err)
    }

    /// `api_base_url` joined with an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::load_file(dir.path()).unwrap();
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.timeout_secs, None);
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"api_base_url": "https://backoffice.example/api/", "endpoints": {"save_form": "/forms/save"}}"#,
        )
        .unwrap();

        let config = BackendConfig::load_file(dir.path()).unwrap();
        assert_eq!(config.api_base_url, "https://backoffice.example/api/");
        assert_eq!(config.endpoints.save_form, "/forms/save");
        assert_eq!(config.endpoints.apps, "/apps");
        assert_eq!(config.url(&config.endpoints.save_form), "https://backoffice.example/api/forms/save");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert!(matches!(BackendConfig::load_file(dir.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let config = BackendConfig::default().with_overrides(|name| match name {
            "FORM_BUILDER_API_URL" => Some("http://10.0.0.5/api".to_string()),
            "FORM_BUILDER_USER_ID" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "http://10.0.0.5/api");
        assert_eq!(config.user_id, "");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig {
            user_id: "17".to_string(),
            timeout_secs: Some(30),
            ..BackendConfig::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(BackendConfig::load_file(dir.path()).unwrap(), config);
    }
}
