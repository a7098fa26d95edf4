// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types raised by the library layers.
//!
//! - [`SummaryError`] comes out of the aggregation engine in [`crate::summary`].
//! - [`ApiError`] comes out of the transaction store client in [`crate::api`]
//!   and the session gate in [`crate::session`].

use thiserror::Error;

/// Errors raised while validating transactions or aggregating them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// A transaction (or a period argument) is malformed.
    #[error("invalid transaction: {0}")]
    Validation(String),
    /// The query needs data that the snapshot does not have.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Errors raised while talking to the remote transaction store.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not logged in or session expired; run `inex login`")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("resource not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rejected by server: {0}")]
    Validation(String),
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid API url '{0}'")]
    InvalidUrl(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Maps a non-success HTTP status and its error message to a variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            409 => ApiError::Conflict(message),
            400 | 422 => ApiError::Validation(message),
            _ => ApiError::Server { status, message },
        }
    }
}
