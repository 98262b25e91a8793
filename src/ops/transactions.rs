// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use serde::{Deserialize, Serialize};

use crate::db::{Store, date_col, decimal_col};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionPatch, TransactionView, TxKind};
use crate::query::Filter;
use crate::validate;

use super::balance;

pub const DEFAULT_PAGE_SIZE: usize = 50;

const COLUMNS: &str =
    "id, user_id, wallet_id, category_id, type, amount, description, date, proof, created_at";

const VIEW_SELECT: &str = "SELECT t.id, t.user_id, t.wallet_id, t.category_id, t.type, t.amount, \
     t.description, t.date, t.proof, t.created_at, \
     w.name, w.icon, w.color, c.name, c.icon, c.color \
     FROM transactions t \
     JOIN wallets w ON w.id=t.wallet_id \
     JOIN categories c ON c.id=t.category_id";

/// Newest first; rows sharing a date keep insertion order reversed.
pub(crate) const NEWEST_FIRST: &str = " ORDER BY t.date DESC, t.created_at DESC, t.id DESC";

fn map_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        wallet_id: r.get(2)?,
        category_id: r.get(3)?,
        r#type: r.get(4)?,
        amount: decimal_col(r, 5)?,
        description: r.get(6)?,
        date: date_col(r, 7)?,
        proof: r.get(8)?,
        created_at: r.get(9)?,
    })
}

fn map_view(r: &Row<'_>) -> rusqlite::Result<TransactionView> {
    Ok(TransactionView {
        tx: map_row(r)?,
        wallet_name: r.get(10)?,
        wallet_icon: r.get(11)?,
        wallet_color: r.get(12)?,
        category_name: r.get(13)?,
        category_icon: r.get(14)?,
        category_color: r.get(15)?,
    })
}

pub(crate) fn find(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Option<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE id=?1 AND user_id=?2",
        COLUMNS
    );
    Ok(conn
        .query_row(&sql, params![id, owner], map_row)
        .optional()?)
}

fn find_view(conn: &Connection, owner: i64, id: i64) -> LedgerResult<TransactionView> {
    let sql = format!("{} WHERE t.id=?1 AND t.user_id=?2", VIEW_SELECT);
    conn.query_row(&sql, params![id, owner], map_view)
        .optional()?
        .ok_or(LedgerError::NotFound("transaction"))
}

fn sql_bound(value: usize, what: &str) -> LedgerResult<i64> {
    i64::try_from(value)
        .map_err(|_| LedgerError::validation(format!("{} {} is out of range", what, value)))
}

/// Joined rows matching `filter`, newest first, optionally windowed by `(limit, offset)`.
pub(crate) fn query_views(
    conn: &Connection,
    filter: &Filter,
    page: Option<(usize, usize)>,
) -> LedgerResult<Vec<TransactionView>> {
    let mut sql = format!("{}{}{}", VIEW_SELECT, filter.where_clause(), NEWEST_FIRST);
    let (limit, offset) = match page {
        Some((l, o)) => (sql_bound(l, "limit")?, sql_bound(o, "offset")?),
        None => (-1, 0),
    };
    sql.push_str(&format!(
        " LIMIT ?{} OFFSET ?{}",
        filter.len() + 1,
        filter.len() + 2
    ));
    let extra: [&dyn ToSql; 2] = [&limit, &offset];
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(filter.params_with(&extra)),
        map_view,
    )?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Query options for [`Store::list_transactions`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    pub r#type: Option<TxKind>,
    pub wallet_id: Option<i64>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Substring of the description.
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TransactionFilter {
    /// Only transactions dated within `[start, end]`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start_date: Some(start),
            end_date: Some(end),
            ..Self::default()
        }
    }

    pub(crate) fn to_filter(&self, owner: i64) -> Filter {
        let mut f = Filter::new()
            .eq("t.user_id", owner)
            .eq_opt("t.type", self.r#type.map(|k| k.as_str().to_string()))
            .eq_opt("t.wallet_id", self.wallet_id)
            .eq_opt("t.category_id", self.category_id)
            .cmp_opt("t.date", ">=", self.start_date.map(|d| d.to_string()))
            .cmp_opt("t.date", "<=", self.end_date.map(|d| d.to_string()));
        if let Some(needle) = validate::optional_text(self.search.as_deref()) {
            f = f.contains("t.description", &needle);
        }
        f
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl Store {
    /// Records a transaction and books its amount on the wallet.
    pub fn create_transaction(
        &self,
        owner: i64,
        new: NewTransaction,
    ) -> LedgerResult<TransactionView> {
        let amount = validate::positive_amount(new.amount, "amount")?;
        let view = self.write(|conn| {
            let wallet = validate::referenced_wallet(conn, owner, new.wallet_id)?;
            let category = validate::referenced_category(conn, owner, new.category_id)?;
            validate::category_matches(new.r#type, &category)?;

            conn.execute(
                "INSERT INTO transactions(user_id, wallet_id, category_id, type, amount, description, date, proof)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
                params![
                    owner,
                    wallet.id,
                    category.id,
                    new.r#type,
                    amount.to_string(),
                    validate::optional_text(new.description.as_deref()),
                    new.date.to_string(),
                    validate::optional_text(new.proof.as_deref()),
                ],
            )?;
            let id = conn.last_insert_rowid();
            let tx = validate::require_transaction(conn, owner, id)?;
            balance::apply_created(conn, &tx)?;
            find_view(conn, owner, id)
        })?;
        tracing::info!(
            owner,
            transaction = view.tx.id,
            wallet = view.tx.wallet_id,
            kind = %view.tx.r#type,
            amount = %view.tx.amount,
            "created transaction"
        );
        Ok(view)
    }

    pub fn get_transaction(&self, owner: i64, id: i64) -> LedgerResult<TransactionView> {
        self.read(|conn| find_view(conn, owner, id))
    }

    /// Applies `patch` over the stored row and moves the balance effect from
    /// the old state to the new one, across wallets if the wallet changed.
    pub fn update_transaction(
        &self,
        owner: i64,
        id: i64,
        patch: TransactionPatch,
    ) -> LedgerResult<TransactionView> {
        let view = self.write(|conn| {
            let old = validate::require_transaction(conn, owner, id)?;

            let wallet_id = match patch.wallet_id {
                Some(w) => validate::referenced_wallet(conn, owner, w)?.id,
                None => old.wallet_id,
            };
            let category =
                validate::referenced_category(conn, owner, patch.category_id.unwrap_or(old.category_id))?;
            let kind = patch.r#type.unwrap_or(old.r#type);
            validate::category_matches(kind, &category)?;
            let amount = match patch.amount {
                Some(a) => validate::positive_amount(a, "amount")?,
                None => old.amount,
            };
            let description = match &patch.description {
                Some(d) => validate::optional_text(d.as_deref()),
                None => old.description.clone(),
            };
            let proof = match &patch.proof {
                Some(p) => validate::optional_text(p.as_deref()),
                None => old.proof.clone(),
            };
            let date = patch.date.unwrap_or(old.date);

            conn.execute(
                "UPDATE transactions SET wallet_id=?1, category_id=?2, type=?3, amount=?4,
                     description=?5, date=?6, proof=?7
                 WHERE id=?8 AND user_id=?9",
                params![
                    wallet_id,
                    category.id,
                    kind,
                    amount.to_string(),
                    description,
                    date.to_string(),
                    proof,
                    id,
                    owner
                ],
            )?;
            let new = validate::require_transaction(conn, owner, id)?;
            balance::apply_updated(conn, &old, &new)?;
            find_view(conn, owner, id)
        })?;
        tracing::info!(owner, transaction = id, "updated transaction");
        Ok(view)
    }

    /// Removes the transaction and takes its effect back out of the wallet.
    pub fn delete_transaction(&self, owner: i64, id: i64) -> LedgerResult<()> {
        let balance = self.write(|conn| {
            let tx = validate::require_transaction(conn, owner, id)?;
            let balance = balance::apply_deleted(conn, &tx)?;
            conn.execute(
                "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
                params![id, owner],
            )?;
            Ok(balance)
        })?;
        tracing::info!(owner, transaction = id, %balance, "deleted transaction");
        Ok(())
    }

    pub fn list_transactions(
        &self,
        owner: i64,
        query: &TransactionFilter,
    ) -> LedgerResult<Page<TransactionView>> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0);
        let filter = query.to_filter(owner);
        self.read(|conn| {
            let count_sql = format!(
                "SELECT COUNT(*) FROM transactions t{}",
                filter.where_clause()
            );
            let total: i64 = conn.query_row(
                &count_sql,
                rusqlite::params_from_iter(filter.params()),
                |r| r.get(0),
            )?;
            let items = query_views(conn, &filter, Some((limit, offset)))?;
            let total = total as usize;
            tracing::debug!(owner, total, returned = items.len(), "listed transactions");
            Ok(Page {
                has_more: offset.saturating_add(items.len()) < total,
                items,
                total,
                limit,
                offset,
            })
        })
    }
}
