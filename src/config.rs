// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings come from an optional YAML file. `FRAMESEARCH_CONFIG` names the
//! file; otherwise `framesearch.yaml` in the working directory is used when
//! present. `FRAMESEARCH_SERVER` overrides the server URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_ENV: &str = "FRAMESEARCH_CONFIG";
const SERVER_ENV: &str = "FRAMESEARCH_SERVER";
const DEFAULT_CONFIG_FILE: &str = "framesearch.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the search service.
    pub server_url: String,
    /// Path of the search endpoint, relative to `server_url`.
    pub search_path: String,
    /// Image shown in place of a frame that fails to load.
    pub placeholder_path: String,
    /// Extra form fields sent with every search, before `query`.
    pub form_fields: BTreeMap<String, String>,
    /// Request timeout. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            search_path: "/search".to_string(),
            placeholder_path: "/static/placeholder.jpg".to_string(),
            form_fields: BTreeMap::new(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from the environment and the optional config file.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Some(PathBuf::from(path)),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                log::info!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(server) = std::env::var(SERVER_ENV) {
            settings.server_url = server;
        }

        Ok(settings)
    }

    /// Read settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let settings = Self::from_yaml(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(settings)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Full URL of the search endpoint.
    pub fn search_url(&self) -> String {
        join_url(&self.server_url, &self.search_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Extra form fields in a stable order.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.form_fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let settings = Settings::from_yaml("server_url: http://aienthusiasm:5000\n").unwrap();
        assert_eq!(settings.server_url, "http://aienthusiasm:5000");
        assert_eq!(settings.search_path, "/search");
        assert_eq!(settings.placeholder_path, "/static/placeholder.jpg");
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn test_form_fields_and_timeout() {
        let yaml = "form_fields:\n  search_type: image\n  limit: '150'\nrequest_timeout_secs: 30\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(
            settings.form_pairs(),
            vec![
                ("limit".to_string(), "150".to_string()),
                ("search_type".to_string(), "image".to_string()),
            ]
        );
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_search_url_join() {
        let mut settings = Settings::default();
        settings.server_url = "http://localhost:5000/".to_string();
        assert_eq!(settings.search_url(), "http://localhost:5000/search");
        assert_eq!(join_url("http://h", "static/x.jpg"), "http://h/static/x.jpg");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Settings::from_yaml("server_url: [unterminated").is_err());
    }
}
