// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the remote transaction store.

use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::models::TransactionRecord;
use crate::session::Session;
use crate::utils::http_client;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct Registration<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        let http = http_client(timeout_secs)?;
        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        info!(user = %username, url = %self.endpoint("auth/login"), "login attempt");
        let req = self
            .http
            .post(self.endpoint("auth/login"))
            .json(&Credentials { username, password });
        read_json(send(req)?)
    }

    pub fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, ApiError> {
        info!(user = %username, email = %email, "signup attempt");
        let req = self.http.post(self.endpoint("auth/signup")).json(&Registration {
            username,
            email,
            password,
        });
        read_json(send(req)?)
    }

    pub fn fetch_transactions(&self, session: &Session) -> Result<Vec<TransactionRecord>, ApiError> {
        let req = self
            .http
            .get(self.endpoint("transactions"))
            .bearer_auth(&session.token);
        let records: Vec<TransactionRecord> = read_json(send(req)?)?;
        debug!(count = records.len(), "fetched transactions");
        Ok(records)
    }

    /// Creates the record when it has no id, replaces it otherwise.
    pub fn upsert_transaction(
        &self,
        session: &Session,
        record: &TransactionRecord,
    ) -> Result<(), ApiError> {
        let req = match record.id {
            Some(id) => self.http.put(self.endpoint(&format!("transactions/{}", id))),
            None => self.http.post(self.endpoint("transactions")),
        };
        send(req.bearer_auth(&session.token).json(record))?;
        info!(id = ?record.id, date = %record.date, "transaction saved");
        Ok(())
    }
}

fn send(req: RequestBuilder) -> Result<Response, ApiError> {
    let res = req.send()?;
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let message = res
        .json::<ErrorBody>()
        .map(|b| b.message)
        .unwrap_or_else(|_| "unknown error".to_string());
    debug!(status = status.as_u16(), %message, "request failed");
    Err(ApiError::from_status(status.as_u16(), message))
}

fn read_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    Ok(res.json::<T>()?)
}
