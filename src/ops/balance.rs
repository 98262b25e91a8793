// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Incremental wallet balance maintenance.
//!
//! Balances are never rebuilt from the transaction log. Each state change of
//! a transaction contributes exactly one delta: the forward effect when it
//! appears, the reversal when it disappears, and both when it is edited.
//! Callers must already hold the write transaction from `Store::write`.

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::db::decimal_col;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::validate;

/// Delta a transaction adds to its wallet while it exists.
pub fn forward_delta(tx: &Transaction) -> Decimal {
    tx.r#type.signed(tx.amount)
}

/// Delta that cancels [`forward_delta`].
pub fn reversal_delta(tx: &Transaction) -> Decimal {
    -forward_delta(tx)
}

pub(crate) fn read_balance(conn: &Connection, owner: i64, wallet_id: i64) -> LedgerResult<Decimal> {
    conn.query_row(
        "SELECT balance FROM wallets WHERE id=?1 AND user_id=?2",
        params![wallet_id, owner],
        |r| decimal_col(r, 0),
    )
    .optional()?
    .ok_or(LedgerError::NotFound("wallet"))
}

/// Add `delta` to the wallet balance and return the new balance. A balance
/// that would leave the decimal range is a `Validation` error, and the
/// caller's write transaction rolls back.
pub(crate) fn apply_delta(
    conn: &Connection,
    owner: i64,
    wallet_id: i64,
    delta: Decimal,
) -> LedgerResult<Decimal> {
    let balance = validate::checked_add(read_balance(conn, owner, wallet_id)?, delta)?.normalize();
    conn.execute(
        "UPDATE wallets SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![balance.to_string(), wallet_id, owner],
    )?;
    tracing::debug!(wallet = wallet_id, %delta, %balance, "applied balance delta");
    Ok(balance)
}

pub(crate) fn apply_created(conn: &Connection, tx: &Transaction) -> LedgerResult<Decimal> {
    apply_delta(conn, tx.user_id, tx.wallet_id, forward_delta(tx))
}

pub(crate) fn apply_deleted(conn: &Connection, tx: &Transaction) -> LedgerResult<Decimal> {
    apply_delta(conn, tx.user_id, tx.wallet_id, reversal_delta(tx))
}

/// Revert `old` on its wallet, then apply `new` on its (possibly different) wallet.
pub(crate) fn apply_updated(
    conn: &Connection,
    old: &Transaction,
    new: &Transaction,
) -> LedgerResult<()> {
    apply_deleted(conn, old)?;
    apply_created(conn, new)?;
    Ok(())
}
