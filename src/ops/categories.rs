// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::db::Store;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryPatch, NewCategory, TxKind};
use crate::query::Filter;
use crate::validate;

use super::DEFAULT_COLOR;

pub(crate) const DEFAULT_ICON: &str = "📁";

pub(crate) const COLUMNS: &str = "id, user_id, name, type, icon, color";

pub(crate) fn map_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        r#type: r.get(3)?,
        icon: r.get(4)?,
        color: r.get(5)?,
    })
}

pub(crate) fn find(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Option<Category>> {
    let sql = format!("SELECT {} FROM categories WHERE id=?1 AND user_id=?2", COLUMNS);
    Ok(conn
        .query_row(&sql, params![id, owner], map_row)
        .optional()?)
}

pub(crate) fn insert(conn: &Connection, owner: i64, new: &NewCategory) -> LedgerResult<Category> {
    let name = validate::required_text(&new.name, "category name")?;
    let icon = validate::optional_text(new.icon.as_deref()).unwrap_or_else(|| DEFAULT_ICON.into());
    let color =
        validate::optional_text(new.color.as_deref()).unwrap_or_else(|| DEFAULT_COLOR.into());
    conn.execute(
        "INSERT INTO categories(user_id, name, type, icon, color) VALUES (?1,?2,?3,?4,?5)",
        params![owner, name, new.r#type, icon, color],
    )?;
    let id = conn.last_insert_rowid();
    validate::require_category(conn, owner, id)
}

fn transaction_count(conn: &Connection, owner: i64, id: i64) -> LedgerResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE category_id=?1 AND user_id=?2",
        params![id, owner],
        |r| r.get(0),
    )?)
}

impl Store {
    pub fn create_category(&self, owner: i64, new: NewCategory) -> LedgerResult<Category> {
        let category = self.write(|conn| {
            validate::require_user(conn, owner)?;
            insert(conn, owner, &new)
        })?;
        tracing::info!(owner, category = category.id, kind = %category.r#type, "created category");
        Ok(category)
    }

    pub fn get_category(&self, owner: i64, id: i64) -> LedgerResult<Category> {
        self.read(|conn| validate::require_category(conn, owner, id))
    }

    /// Categories ordered by type, then name.
    pub fn list_categories(&self, owner: i64, kind: Option<TxKind>) -> LedgerResult<Vec<Category>> {
        self.read(|conn| {
            let filter = Filter::new()
                .eq("user_id", owner)
                .eq_opt("type", kind.map(|k| k.as_str().to_string()));
            let sql = format!(
                "SELECT {} FROM categories{} ORDER BY type, name, id",
                COLUMNS,
                filter.where_clause()
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(filter.params()), map_row)?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
    }

    /// Changing the type of a category that transactions or a budget already
    /// rely on would break their type agreement, so it is refused.
    pub fn update_category(
        &self,
        owner: i64,
        id: i64,
        patch: CategoryPatch,
    ) -> LedgerResult<Category> {
        let category = self.write(|conn| {
            let current = validate::require_category(conn, owner, id)?;
            let name = match patch.name.as_deref() {
                Some(n) => validate::required_text(n, "category name")?,
                None => current.name,
            };
            let kind = patch.r#type.unwrap_or(current.r#type);
            if kind != current.r#type {
                if transaction_count(conn, owner, id)? > 0 {
                    return Err(LedgerError::conflict(
                        "cannot change the type of a category that has transactions",
                    ));
                }
                let budgeted: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM budgets WHERE category_id=?1 AND user_id=?2",
                    params![id, owner],
                    |r| r.get(0),
                )?;
                if budgeted > 0 {
                    return Err(LedgerError::conflict(
                        "cannot change the type of a category that has a budget",
                    ));
                }
            }
            conn.execute(
                "UPDATE categories SET name=?1, type=?2, icon=?3, color=?4 WHERE id=?5 AND user_id=?6",
                params![
                    name,
                    kind,
                    patch.icon.unwrap_or(current.icon),
                    patch.color.unwrap_or(current.color),
                    id,
                    owner
                ],
            )?;
            validate::require_category(conn, owner, id)
        })?;
        tracing::info!(owner, category = id, "updated category");
        Ok(category)
    }

    /// Refuses while any transaction still references the category; its
    /// budget, if any, goes with it.
    pub fn delete_category(&self, owner: i64, id: i64) -> LedgerResult<()> {
        self.write(|conn| {
            validate::require_category(conn, owner, id)?;
            let used = transaction_count(conn, owner, id)?;
            if used > 0 {
                return Err(LedgerError::conflict(format!(
                    "cannot delete category with {} transaction(s); delete them first",
                    used
                )));
            }
            conn.execute(
                "DELETE FROM categories WHERE id=?1 AND user_id=?2",
                params![id, owner],
            )?;
            Ok(())
        })?;
        tracing::info!(owner, category = id, "deleted category");
        Ok(())
    }
}
