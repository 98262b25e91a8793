// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::db::{Store, date_col, decimal_col};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetPatch, BudgetStatus, NewBudget, TxKind};
use crate::period;
use crate::validate;

const COLUMNS: &str = "id, user_id, category_id, amount, period, start_date";

fn map_row(r: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: r.get(0)?,
        user_id: r.get(1)?,
        category_id: r.get(2)?,
        amount: decimal_col(r, 3)?,
        period: r.get(4)?,
        start_date: date_col(r, 5)?,
    })
}

pub(crate) fn find(conn: &Connection, owner: i64, id: i64) -> LedgerResult<Option<Budget>> {
    let sql = format!("SELECT {} FROM budgets WHERE id=?1 AND user_id=?2", COLUMNS);
    Ok(conn
        .query_row(&sql, params![id, owner], map_row)
        .optional()?)
}

/// Budgets newest first.
pub(crate) fn list(conn: &Connection, owner: i64) -> LedgerResult<Vec<Budget>> {
    let sql = format!(
        "SELECT {} FROM budgets WHERE user_id=?1 ORDER BY start_date DESC, id DESC",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], map_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// `spent / cap` as a whole percent, half away from zero. A non-positive cap
/// reads as 0%; a ratio too large to represent saturates at `i64::MAX`.
pub fn percentage(spent: Decimal, cap: Decimal) -> i64 {
    if cap <= Decimal::ZERO {
        return 0;
    }
    let ratio = match spent.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled.checked_div(cap),
        None => spent
            .checked_div(cap)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED)),
    };
    ratio
        .and_then(|r| {
            r.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
        })
        .unwrap_or(i64::MAX)
}

/// Evaluate `budget` over the window containing `today`. Spending is summed
/// from the transaction log on every call.
pub(crate) fn status(conn: &Connection, budget: Budget, today: NaiveDate) -> LedgerResult<BudgetStatus> {
    let window = period::budget_window(budget.period, today)?;
    let category = validate::require_category(conn, budget.user_id, budget.category_id)?;

    let mut stmt = conn.prepare(
        "SELECT amount FROM transactions
         WHERE user_id=?1 AND category_id=?2 AND type=?3 AND date>=?4 AND date<=?5",
    )?;
    let rows = stmt.query_map(
        params![
            budget.user_id,
            budget.category_id,
            TxKind::Expense,
            window.start.to_string(),
            window.end.to_string()
        ],
        |r| decimal_col(r, 0),
    )?;
    let mut spent = Decimal::ZERO;
    for amount in rows {
        spent = validate::checked_add(spent, amount?)?;
    }

    Ok(BudgetStatus {
        remaining: validate::checked_sub(budget.amount, spent)?.normalize(),
        percentage: percentage(spent, budget.amount),
        spent: spent.normalize(),
        window_start: window.start,
        window_end: window.end,
        category_name: category.name,
        category_icon: category.icon,
        category_color: category.color,
        budget,
    })
}

impl Store {
    /// One budget per category; only expense categories can be budgeted.
    pub fn create_budget(&self, owner: i64, new: NewBudget) -> LedgerResult<BudgetStatus> {
        self.create_budget_at(owner, new, period::today())
    }

    /// [`Store::create_budget`] with an explicit "today".
    pub fn create_budget_at(
        &self,
        owner: i64,
        new: NewBudget,
        today: NaiveDate,
    ) -> LedgerResult<BudgetStatus> {
        let amount = validate::positive_amount(new.amount, "budget amount")?;
        let status = self.write(|conn| {
            let category = validate::referenced_category(conn, owner, new.category_id)?;
            if category.r#type != TxKind::Expense {
                return Err(LedgerError::validation(format!(
                    "budgets apply to expense categories only; '{}' is {}",
                    category.name, category.r#type
                )));
            }
            let existing: Option<i64> = conn
                .query_row(
                    "SELECT id FROM budgets WHERE user_id=?1 AND category_id=?2",
                    params![owner, category.id],
                    |r| r.get(0),
                )
                .optional()?;
            if let Some(id) = existing {
                return Err(LedgerError::conflict(format!(
                    "category '{}' already has budget {}",
                    category.name, id
                )));
            }
            conn.execute(
                "INSERT INTO budgets(user_id, category_id, amount, period, start_date)
                 VALUES (?1,?2,?3,?4,?5)",
                params![owner, category.id, amount.to_string(), new.period, today.to_string()],
            )?;
            let budget = validate::require_budget(conn, owner, conn.last_insert_rowid())?;
            status(conn, budget, today)
        })?;
        tracing::info!(
            owner,
            budget = status.budget.id,
            category = status.budget.category_id,
            amount = %status.budget.amount,
            period = %status.budget.period,
            "created budget"
        );
        Ok(status)
    }

    pub fn get_budget(&self, owner: i64, id: i64) -> LedgerResult<BudgetStatus> {
        self.get_budget_at(owner, id, period::today())
    }

    pub fn get_budget_at(&self, owner: i64, id: i64, today: NaiveDate) -> LedgerResult<BudgetStatus> {
        self.read(|conn| {
            let budget = validate::require_budget(conn, owner, id)?;
            status(conn, budget, today)
        })
    }

    /// Updates amount and/or period. The start date never moves.
    pub fn update_budget(&self, owner: i64, id: i64, patch: BudgetPatch) -> LedgerResult<BudgetStatus> {
        let amount = patch
            .amount
            .map(|a| validate::positive_amount(a, "budget amount"))
            .transpose()?;
        let today = period::today();
        let status = self.write(|conn| {
            let current = validate::require_budget(conn, owner, id)?;
            conn.execute(
                "UPDATE budgets SET amount=?1, period=?2 WHERE id=?3 AND user_id=?4",
                params![
                    amount.unwrap_or(current.amount).to_string(),
                    patch.period.unwrap_or(current.period),
                    id,
                    owner
                ],
            )?;
            let budget = validate::require_budget(conn, owner, id)?;
            status(conn, budget, today)
        })?;
        tracing::info!(owner, budget = id, "updated budget");
        Ok(status)
    }

    pub fn delete_budget(&self, owner: i64, id: i64) -> LedgerResult<()> {
        self.write(|conn| {
            validate::require_budget(conn, owner, id)?;
            conn.execute(
                "DELETE FROM budgets WHERE id=?1 AND user_id=?2",
                params![id, owner],
            )?;
            Ok(())
        })?;
        tracing::info!(owner, budget = id, "deleted budget");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        assert_eq!(percentage(Decimal::from(45000), Decimal::from(50000)), 90);
        assert_eq!(percentage(Decimal::from(1), Decimal::from(8)), 13);
        assert_eq!(percentage(Decimal::from(1), Decimal::from(3)), 33);
        assert_eq!(percentage(Decimal::from(120), Decimal::from(100)), 120);
    }

    #[test]
    fn zero_cap_reads_as_zero_percent() {
        assert_eq!(percentage(Decimal::from(10), Decimal::ZERO), 0);
    }

    #[test]
    fn huge_ratios_saturate() {
        let big = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        assert_eq!(percentage(big, Decimal::ONE), i64::MAX);
        assert_eq!(percentage(Decimal::MAX, Decimal::ONE), i64::MAX);
        assert_eq!(percentage(Decimal::MAX, Decimal::MAX), 100);
        assert_eq!(percentage(Decimal::ONE, Decimal::new(1, 28)), i64::MAX);
    }
}
