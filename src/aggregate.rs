// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-time statistics derived from the transaction log.
//!
//! Nothing here is persisted. Each call loads the owner's transactions for
//! the widest window it needs and buckets them in memory with exact decimal
//! arithmetic.

use std::collections::HashMap;

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::{Store, date_col, decimal_col};
use crate::error::LedgerResult;
use crate::models::{BudgetStatus, Category, TransactionView, TxKind, Wallet};
use crate::ops::{budgets, categories, transactions, wallets};
use crate::period::{self, DateRange};
use crate::query::Filter;
use crate::validate;

/// Default cap on `recent_transactions` in [`DashboardSummary`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const DAILY_TREND_DAYS: u32 = 7;
pub const MONTHLY_TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotals {
    pub month: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub as_of: NaiveDate,
    pub total_balance: Decimal,
    pub monthly_income: Decimal,
    pub monthly_expense: Decimal,
    pub monthly_net: Decimal,
    pub spending_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
    pub wallets: Vec<Wallet>,
    pub recent_transactions: Vec<TransactionView>,
    pub daily_trend: Vec<DayTotals>,
    pub monthly_trend: Vec<MonthTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub range: DateRange,
    pub transactions: Vec<TransactionView>,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub spending_by_category: Vec<CategoryTotal>,
    pub income_by_category: Vec<CategoryTotal>,
    pub monthly_trend: Vec<MonthTotals>,
}

/// The columns aggregation needs from one transaction.
#[derive(Debug, Clone, Copy)]
struct Entry {
    date: NaiveDate,
    kind: TxKind,
    category_id: i64,
    amount: Decimal,
}

fn load_entries(conn: &Connection, owner: i64, range: DateRange) -> LedgerResult<Vec<Entry>> {
    let mut stmt = conn.prepare(
        "SELECT date, type, category_id, amount FROM transactions
         WHERE user_id=?1 AND date>=?2 AND date<=?3",
    )?;
    let rows = stmt.query_map(
        params![owner, range.start.to_string(), range.end.to_string()],
        |r| {
            Ok(Entry {
                date: date_col(r, 0)?,
                kind: r.get(1)?,
                category_id: r.get(2)?,
                amount: decimal_col(r, 3)?,
            })
        },
    )?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    tracing::debug!(owner, start = %range.start, end = %range.end, rows = out.len(), "loaded entries");
    Ok(out)
}

fn load_categories(conn: &Connection, owner: i64) -> LedgerResult<HashMap<i64, Category>> {
    let sql = format!("SELECT {} FROM categories WHERE user_id=?1", categories::COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], categories::map_row)?;
    let mut out = HashMap::new();
    for row in rows {
        let c = row?;
        out.insert(c.id, c);
    }
    Ok(out)
}

/// Income and expense of the entries that fall inside `range`.
fn totals_within<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    range: DateRange,
) -> LedgerResult<(Decimal, Decimal)> {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for e in entries.into_iter().filter(|e| range.contains(e.date)) {
        match e.kind {
            TxKind::Income => income = validate::checked_add(income, e.amount)?,
            TxKind::Expense => expense = validate::checked_add(expense, e.amount)?,
        }
    }
    Ok((income.normalize(), expense.normalize()))
}

/// Per-category sums of `kind` entries inside `range`; zero totals dropped,
/// largest first, ties by name.
fn by_category(
    entries: &[Entry],
    kind: TxKind,
    range: DateRange,
    categories: &HashMap<i64, Category>,
) -> LedgerResult<Vec<CategoryTotal>> {
    let mut sums: HashMap<i64, Decimal> = HashMap::new();
    for e in entries
        .iter()
        .filter(|e| e.kind == kind && range.contains(e.date))
    {
        let sum = sums.entry(e.category_id).or_default();
        *sum = validate::checked_add(*sum, e.amount)?;
    }
    let mut out: Vec<CategoryTotal> = sums
        .into_iter()
        .filter(|(_, total)| !total.is_zero())
        .filter_map(|(id, total)| {
            categories.get(&id).map(|c| CategoryTotal {
                category_id: id,
                name: c.name.clone(),
                icon: c.icon.clone(),
                color: c.color.clone(),
                total: total.normalize(),
            })
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    Ok(out)
}

fn month_rows(entries: &[Entry], months: &[DateRange]) -> LedgerResult<Vec<MonthTotals>> {
    months
        .iter()
        .map(|m| {
            let (income, expense) = totals_within(entries, *m)?;
            Ok(MonthTotals {
                month: period::month_label(m.start),
                start: m.start,
                end: m.end,
                income,
                expense,
            })
        })
        .collect()
}

impl Store {
    pub fn dashboard_summary(&self, owner: i64) -> LedgerResult<DashboardSummary> {
        self.dashboard_summary_at(owner, period::today())
    }

    /// Dashboard as seen on `today`.
    pub fn dashboard_summary_at(&self, owner: i64, today: NaiveDate) -> LedgerResult<DashboardSummary> {
        let recent_limit = self.recent_limit();
        self.read(|conn| {
            let month = period::month_of(today)?;
            let days = period::last_days(today, DAILY_TREND_DAYS)?;
            let months = period::last_months(today, MONTHLY_TREND_MONTHS)?;

            let earliest = months
                .first()
                .map(|m| m.start)
                .unwrap_or(month.start)
                .min(days.first().copied().unwrap_or(today));
            let latest = month.end.max(today);
            let entries = load_entries(conn, owner, DateRange { start: earliest, end: latest })?;
            let cats = load_categories(conn, owner)?;

            let wallets = wallets::list(conn, owner)?;
            let total_balance = validate::checked_sum(wallets.iter().map(|w| w.balance))?;

            let (monthly_income, monthly_expense) = totals_within(&entries, month)?;
            let daily_trend = days
                .iter()
                .map(|d| {
                    let (income, expense) =
                        totals_within(&entries, DateRange { start: *d, end: *d })?;
                    Ok(DayTotals { date: *d, income, expense })
                })
                .collect::<LedgerResult<Vec<_>>>()?;

            let recent = Filter::new().eq("t.user_id", owner);
            let recent_transactions =
                transactions::query_views(conn, &recent, Some((recent_limit, 0)))?;

            Ok(DashboardSummary {
                as_of: today,
                total_balance: total_balance.normalize(),
                monthly_income,
                monthly_expense,
                monthly_net: validate::checked_sub(monthly_income, monthly_expense)?.normalize(),
                spending_by_category: by_category(&entries, TxKind::Expense, month, &cats)?,
                income_by_category: by_category(&entries, TxKind::Income, month, &cats)?,
                wallets,
                recent_transactions,
                daily_trend,
                monthly_trend: month_rows(&entries, &months)?,
            })
        })
    }

    /// Every budget with its spending over the current window, newest first.
    pub fn list_budgets(&self, owner: i64) -> LedgerResult<Vec<BudgetStatus>> {
        self.list_budgets_at(owner, period::today())
    }

    pub fn list_budgets_at(&self, owner: i64, today: NaiveDate) -> LedgerResult<Vec<BudgetStatus>> {
        self.read(|conn| {
            budgets::list(conn, owner)?
                .into_iter()
                .map(|b| budgets::status(conn, b, today))
                .collect()
        })
    }

    /// Totals over `range`, or the current month when `None`.
    pub fn report(&self, owner: i64, range: Option<DateRange>) -> LedgerResult<Report> {
        self.report_at(owner, range, period::today())
    }

    pub fn report_at(
        &self,
        owner: i64,
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> LedgerResult<Report> {
        let range = match range {
            Some(r) => DateRange::new(r.start, r.end)?,
            None => period::month_of(today)?,
        };
        let months = period::months_spanning(range)?;
        let report = self.read(|conn| {
            let entries = load_entries(conn, owner, range)?;
            let cats = load_categories(conn, owner)?;
            let filter = transactions::TransactionFilter::between(range.start, range.end)
                .to_filter(owner);
            let transactions = transactions::query_views(conn, &filter, None)?;
            let (total_income, total_expense) = totals_within(&entries, range)?;
            Ok(Report {
                range,
                transactions,
                total_income,
                total_expense,
                net: validate::checked_sub(total_income, total_expense)?.normalize(),
                spending_by_category: by_category(&entries, TxKind::Expense, range, &cats)?,
                income_by_category: by_category(&entries, TxKind::Income, range, &cats)?,
                monthly_trend: month_rows(&entries, &months)?,
            })
        })?;
        tracing::debug!(
            owner,
            start = %range.start,
            end = %range.end,
            rows = report.transactions.len(),
            "built report"
        );
        Ok(report)
    }
}
