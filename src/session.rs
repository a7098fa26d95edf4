// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login state.
//!
//! A [`Session`] is a plain value loaded once at start-up and handed to the
//! commands that need it. [`SessionStore`] persists it between runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file means logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Read session at {}", self.path.display()));
            }
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!(user = %session.username, "loaded stored session");
                Ok(Some(session))
            }
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "unreadable session; treating as logged out"
                );
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("Write session at {}", self.path.display()))?;
        debug!(user = %session.username, path = %self.path.display(), "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Remove session at {}", self.path.display()))
            }
        }
    }
}

/// Gate for commands that need a logged-in user.
pub fn require_session(session: Option<&Session>) -> Result<&Session, ApiError> {
    session.ok_or(ApiError::Unauthorized)
}
