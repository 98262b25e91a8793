// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger core.
//!
//! Every operation on [`Store`](crate::db::Store) reports failures with
//! [`LedgerError`]. "Absent" and "owned by someone else" are deliberately the
//! same [`NotFound`](LedgerError::NotFound) so callers cannot probe for other
//! users' data.

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Bad input shape, range or enum value. The message is safe to show.
    #[error("{0}")]
    Validation(String),

    /// The addressed entity does not exist for this owner.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A uniqueness or referential rule would be broken.
    #[error("{0}")]
    Conflict(String),

    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientFunds {
        available: rust_decimal::Decimal,
        requested: rust_decimal::Decimal,
    },

    /// Unexpected storage failure. Only logged, never shown verbatim.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// HTTP status an outer transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InsufficientFunds { .. } => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Message fit for the caller; internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        tracing::error!(error = %err, "storage failure");
        Self::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for LedgerError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!(error = %err, "password hashing failure");
        Self::Internal(err.to_string())
    }
}
