// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Inex", "inex"));

pub const API_URL_ENV: &str = "INEX_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config/data dirs")
}

pub fn settings_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("settings.json"))
}

pub fn session_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.join("session.json"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

impl Settings {
    /// Missing or unparsable file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Read settings at {}", path.display()));
            }
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "unreadable settings; using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write settings at {}", path.display()))?;
        Ok(())
    }

    /// Applies environment overrides read through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        self
    }
}

/// Settings file plus environment overrides.
pub fn load() -> Result<Settings> {
    let path = settings_path()?;
    Ok(Settings::load_from(&path)?.with_overrides(|k| std::env::var(k).ok()))
}

pub fn validate_api_url(url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url.trim())
        .with_context(|| format!("Invalid API url '{}'", url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.trim().trim_end_matches('/').to_string()),
        other => Err(anyhow::anyhow!(
            "Unsupported scheme '{}' in API url (use http or https)",
            other
        )),
    }
}
