// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Checks every mutation runs before touching the database.
//!
//! Lookups come in two flavours. `require_*` is for the entity an operation
//! addresses by id and fails with `NotFound`. `referenced_*` is for ids
//! carried inside a payload and fails with `Validation`. Both treat rows
//! owned by another user exactly like missing rows.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, Category, Transaction, TxKind, User, Wallet};
use crate::ops::{budgets, categories, transactions, users, wallets};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex"));

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn positive_amount(amount: Decimal, what: &str) -> LedgerResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "{} must be positive, got {}",
            what, amount
        )));
    }
    Ok(amount.normalize())
}

fn out_of_range() -> LedgerError {
    LedgerError::validation("amount out of range")
}

/// `a + b`, rejecting results outside the decimal range.
pub fn checked_add(a: Decimal, b: Decimal) -> LedgerResult<Decimal> {
    a.checked_add(b).ok_or_else(out_of_range)
}

/// `a - b`, rejecting results outside the decimal range.
pub fn checked_sub(a: Decimal, b: Decimal) -> LedgerResult<Decimal> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> LedgerResult<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
}

/// Trimmed, non-empty text.
pub fn required_text(value: &str, field: &str) -> LedgerResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed text, with blank treated as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

pub fn email(value: &str) -> LedgerResult<String> {
    let email = required_text(value, "email")?.to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(LedgerError::validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(email)
}

pub fn password(value: &str) -> LedgerResult<&str> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(LedgerError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(value)
}

pub fn category_matches(kind: TxKind, category: &Category) -> LedgerResult<()> {
    if category.r#type != kind {
        return Err(LedgerError::validation(format!(
            "{} transaction cannot use {} category '{}'",
            kind, category.r#type, category.name
        )));
    }
    Ok(())
}

pub fn require_user(conn: &Connection, id: i64) -> LedgerResult<User> {
    users::find(conn, id)?.ok_or(LedgerError::NotFound("user"))
}

pub fn require_wallet(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Wallet> {
    wallets::find(conn, owner, id)?.ok_or(LedgerError::NotFound("wallet"))
}

pub fn require_category(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Category> {
    categories::find(conn, owner, id)?.ok_or(LedgerError::NotFound("category"))
}

pub fn require_transaction(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Transaction> {
    transactions::find(conn, owner, id)?.ok_or(LedgerError::NotFound("transaction"))
}

pub fn require_budget(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Budget> {
    budgets::find(conn, owner, id)?.ok_or(LedgerError::NotFound("budget"))
}

pub fn referenced_wallet(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Wallet> {
    wallets::find(conn, owner, id)?.ok_or_else(|| LedgerError::validation("invalid wallet"))
}

pub fn referenced_category(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Category> {
    categories::find(conn, owner, id)?.ok_or_else(|| LedgerError::validation("invalid category"))
}
