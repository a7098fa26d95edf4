// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod exporter;
pub mod settings;
pub mod transactions;
pub mod view;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::warn;

use crate::api::Client;
use crate::config::Settings;
use crate::error::ApiError;
use crate::models::TransactionRecord;
use crate::session::{require_session, Session, SessionStore};
use crate::summary::Ledger;

/// Everything a command handler may need, built once in `main`.
pub struct Context {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub sessions: SessionStore,
    pub session: Option<Session>,
}

impl Context {
    pub fn client(&self) -> Result<Client> {
        Ok(Client::new(&self.settings.api_url, self.settings.timeout_secs)?)
    }

    pub fn session(&self) -> Result<&Session> {
        Ok(require_session(self.session.as_ref())?)
    }

    /// Fetches the whole snapshot from the store.
    pub fn load_ledger(&self, client: &Client) -> Result<Ledger> {
        let records = self.authorized("Fetch transactions", |s| client.fetch_transactions(s))?;
        Ok(Ledger::from_records(records)?)
    }

    /// Creates `record`, or updates it when it carries an id.
    pub fn save_transaction(&self, client: &Client, record: &TransactionRecord) -> Result<()> {
        self.authorized("Save transaction", |s| client.upsert_transaction(s, record))
    }

    /// Runs a store call as the logged-in user. A rejected token clears the
    /// stored session.
    fn authorized<T>(
        &self,
        what: &'static str,
        call: impl FnOnce(&Session) -> Result<T, ApiError>,
    ) -> Result<T> {
        let session = self.session()?;
        match call(session) {
            Ok(value) => Ok(value),
            Err(ApiError::Unauthorized) => {
                warn!(user = %session.username, "stored session rejected; clearing it");
                self.sessions.clear()?;
                Err(ApiError::Unauthorized.into())
            }
            Err(err) => Err(err).context(what),
        }
    }
}
