// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::db::Store;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewCategory, NewUser, NewWallet, TxKind, User, UserPatch, WalletKind};
use crate::validate;

use super::{categories, wallets};

const COLUMNS: &str = "id, name, email, profile_photo, created_at";

const DEFAULT_CATEGORIES: &[(&str, TxKind, &str, &str)] = &[
    ("Salary", TxKind::Income, "💼", "#22c55e"),
    ("Freelance", TxKind::Income, "💻", "#10b981"),
    ("Investment", TxKind::Income, "📈", "#14b8a6"),
    ("Gift", TxKind::Income, "🎁", "#06b6d4"),
    ("Other", TxKind::Income, "💵", "#0ea5e9"),
    ("Food", TxKind::Expense, "🍔", "#f43f5e"),
    ("Transport", TxKind::Expense, "🚗", "#ef4444"),
    ("Shopping", TxKind::Expense, "🛒", "#f97316"),
    ("Entertainment", TxKind::Expense, "🎮", "#f59e0b"),
    ("Bills", TxKind::Expense, "📄", "#eab308"),
    ("Health", TxKind::Expense, "💊", "#84cc16"),
    ("Education", TxKind::Expense, "📚", "#a855f7"),
    ("Other", TxKind::Expense, "📦", "#ec4899"),
];

const DEFAULT_WALLETS: &[(&str, WalletKind, &str, &str)] = &[
    ("Cash", WalletKind::Cash, "💵", "#22c55e"),
    ("Bank", WalletKind::Bank, "🏦", "#3b82f6"),
    ("E-Wallet", WalletKind::Ewallet, "📱", "#06b6d4"),
];

fn map_row(r: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        profile_photo: r.get(3)?,
        created_at: r.get(4)?,
    })
}

pub(crate) fn find(conn: &Connection, id: i64) -> LedgerResult<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id=?1", COLUMNS);
    Ok(conn.query_row(&sql, params![id], map_row).optional()?)
}

fn email_taken(conn: &Connection, email: &str, except: Option<i64>) -> LedgerResult<bool> {
    let other: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE email=?1 AND id != ?2",
            params![email, except.unwrap_or(0)],
            |r| r.get(0),
        )
        .optional()?;
    Ok(other.is_some())
}

fn seed_defaults(conn: &Connection, owner: i64) -> LedgerResult<()> {
    for (name, kind, icon, color) in DEFAULT_CATEGORIES {
        categories::insert(
            conn,
            owner,
            &NewCategory {
                name: (*name).to_string(),
                r#type: *kind,
                icon: Some((*icon).to_string()),
                color: Some((*color).to_string()),
            },
        )?;
    }
    for (name, kind, icon, color) in DEFAULT_WALLETS {
        wallets::insert(
            conn,
            owner,
            &NewWallet {
                name: (*name).to_string(),
                r#type: *kind,
                initial_balance: Decimal::ZERO,
                icon: Some((*icon).to_string()),
                color: Some((*color).to_string()),
            },
        )?;
    }
    Ok(())
}

impl Store {
    /// Creates the account and seeds its starter categories and wallets in
    /// the same transaction.
    pub fn register_user(&self, new: NewUser) -> LedgerResult<User> {
        let name = validate::required_text(&new.name, "name")?;
        let email = validate::email(&new.email)?;
        let password = validate::password(&new.password)?;
        let hash = bcrypt::hash(password, self.hash_cost())?;

        let user = self.write(|conn| {
            if email_taken(conn, &email, None)? {
                return Err(LedgerError::conflict("email already registered"));
            }
            conn.execute(
                "INSERT INTO users(name, email, password) VALUES (?1,?2,?3)",
                params![name, email, hash],
            )?;
            let id = conn.last_insert_rowid();
            seed_defaults(conn, id)?;
            validate::require_user(conn, id)
        })?;
        tracing::info!(user = user.id, "registered user");
        Ok(user)
    }

    /// Same error for unknown email and wrong password.
    pub fn authenticate(&self, email: &str, password: &str) -> LedgerResult<User> {
        let email = email.trim().to_lowercase();
        let row: Option<(i64, String)> = self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, password FROM users WHERE email=?1",
                    params![email],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )
                .optional()?)
        })?;
        let invalid = || LedgerError::validation("invalid email or password");
        let (id, hash) = row.ok_or_else(invalid)?;
        if !bcrypt::verify(password, &hash)? {
            tracing::warn!(user = id, "rejected login");
            return Err(invalid());
        }
        self.get_user(id)
    }

    pub fn get_user(&self, id: i64) -> LedgerResult<User> {
        self.read(|conn| validate::require_user(conn, id))
    }

    pub fn update_profile(&self, id: i64, patch: UserPatch) -> LedgerResult<User> {
        let user = self.write(|conn| {
            let current = validate::require_user(conn, id)?;
            let name = match patch.name.as_deref() {
                Some(n) => validate::required_text(n, "name")?,
                None => current.name,
            };
            let email = match patch.email.as_deref() {
                Some(e) => {
                    let e = validate::email(e)?;
                    if email_taken(conn, &e, Some(id))? {
                        return Err(LedgerError::conflict("email already in use"));
                    }
                    e
                }
                None => current.email,
            };
            let photo = match patch.profile_photo {
                Some(p) => p,
                None => current.profile_photo,
            };
            conn.execute(
                "UPDATE users SET name=?1, email=?2, profile_photo=?3 WHERE id=?4",
                params![name, email, photo, id],
            )?;
            validate::require_user(conn, id)
        })?;
        tracing::info!(user = id, "updated profile");
        Ok(user)
    }

    pub fn change_password(&self, id: i64, current: &str, new: &str) -> LedgerResult<()> {
        let new = validate::password(new)?;
        let new_hash = bcrypt::hash(new, self.hash_cost())?;
        self.write(|conn| {
            let hash: String = conn
                .query_row("SELECT password FROM users WHERE id=?1", params![id], |r| {
                    r.get(0)
                })
                .optional()?
                .ok_or(LedgerError::NotFound("user"))?;
            if !bcrypt::verify(current, &hash)? {
                return Err(LedgerError::validation("current password is incorrect"));
            }
            conn.execute(
                "UPDATE users SET password=?1 WHERE id=?2",
                params![new_hash, id],
            )?;
            Ok(())
        })?;
        tracing::info!(user = id, "changed password");
        Ok(())
    }
}
