// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::db::{Store, decimal_col};
use crate::error::LedgerResult;
use crate::models::{NewWallet, Wallet, WalletPatch};
use crate::validate;

use super::DEFAULT_COLOR;

pub(crate) const DEFAULT_ICON: &str = "💰";

pub(crate) const COLUMNS: &str = "id, user_id, name, type, balance, icon, color, created_at";

pub(crate) fn map_row(r: &Row<'_>) -> rusqlite::Result<Wallet> {
    Ok(Wallet {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        r#type: r.get(3)?,
        balance: decimal_col(r, 4)?,
        icon: r.get(5)?,
        color: r.get(6)?,
        created_at: r.get(7)?,
    })
}

pub(crate) fn find(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Option<Wallet>> {
    let sql = format!("SELECT {} FROM wallets WHERE id=?1 AND user_id=?2", COLUMNS);
    Ok(conn
        .query_row(&sql, params![id, owner], map_row)
        .optional()?)
}

pub(crate) fn insert(conn: &Connection, owner: i64, new: &NewWallet) -> LedgerResult<Wallet> {
    let name = validate::required_text(&new.name, "wallet name")?;
    let icon = validate::optional_text(new.icon.as_deref()).unwrap_or_else(|| DEFAULT_ICON.into());
    let color =
        validate::optional_text(new.color.as_deref()).unwrap_or_else(|| DEFAULT_COLOR.into());
    conn.execute(
        "INSERT INTO wallets(user_id, name, type, balance, icon, color) VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            owner,
            name,
            new.r#type,
            new.initial_balance.normalize().to_string(),
            icon,
            color
        ],
    )?;
    let id = conn.last_insert_rowid();
    validate::require_wallet(conn, owner, id)
}

impl Store {
    pub fn create_wallet(&self, owner: i64, new: NewWallet) -> LedgerResult<Wallet> {
        let wallet = self.write(|conn| {
            validate::require_user(conn, owner)?;
            insert(conn, owner, &new)
        })?;
        tracing::info!(owner, wallet = wallet.id, balance = %wallet.balance, "created wallet");
        Ok(wallet)
    }

    pub fn get_wallet(&self, owner: i64, id: i64) -> LedgerResult<Wallet> {
        self.read(|conn| validate::require_wallet(conn, owner, id))
    }

    /// Wallets in creation order.
    pub fn list_wallets(&self, owner: i64) -> LedgerResult<Vec<Wallet>> {
        self.read(|conn| list(conn, owner))
    }

    /// Renames or restyles a wallet. The balance is never patched here; it
    /// moves only through transactions and transfers.
    pub fn update_wallet(&self, owner: i64, id: i64, patch: WalletPatch) -> LedgerResult<Wallet> {
        let wallet = self.write(|conn| {
            let current = validate::require_wallet(conn, owner, id)?;
            let name = match patch.name.as_deref() {
                Some(n) => validate::required_text(n, "wallet name")?,
                None => current.name,
            };
            conn.execute(
                "UPDATE wallets SET name=?1, type=?2, icon=?3, color=?4 WHERE id=?5 AND user_id=?6",
                params![
                    name,
                    patch.r#type.unwrap_or(current.r#type),
                    patch.icon.unwrap_or(current.icon),
                    patch.color.unwrap_or(current.color),
                    id,
                    owner
                ],
            )?;
            validate::require_wallet(conn, owner, id)
        })?;
        tracing::info!(owner, wallet = id, "updated wallet");
        Ok(wallet)
    }

    /// Deletes the wallet together with every transaction booked on it.
    pub fn delete_wallet(&self, owner: i64, id: i64) -> LedgerResult<()> {
        let removed = self.write(|conn| {
            validate::require_wallet(conn, owner, id)?;
            let removed = conn.execute(
                "DELETE FROM transactions WHERE wallet_id=?1 AND user_id=?2",
                params![id, owner],
            )?;
            conn.execute(
                "DELETE FROM wallets WHERE id=?1 AND user_id=?2",
                params![id, owner],
            )?;
            Ok(removed)
        })?;
        tracing::info!(owner, wallet = id, transactions = removed, "deleted wallet");
        Ok(())
    }
}

pub(crate) fn list(conn: &Connection, owner: i64) -> LedgerResult<Vec<Wallet>> {
    let sql = format!("SELECT {} FROM wallets WHERE user_id=?1 ORDER BY id", COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], map_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
