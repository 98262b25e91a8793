// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::aggregate::CategoryTotal;
use crate::db::Store;
use crate::utils::{fmt_money, owner, pretty_table, print_json_if_asked};

use super::transactions::{VIEW_HEADERS, view_rows};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    let summary = store.dashboard_summary(owner(m)?)?;
    if print_json_if_asked(m, &summary)? {
        return Ok(());
    }

    println!(
        "As of {}: balance {} | this month income {} expense {} net {}",
        summary.as_of,
        fmt_money(&summary.total_balance),
        fmt_money(&summary.monthly_income),
        fmt_money(&summary.monthly_expense),
        fmt_money(&summary.monthly_net)
    );

    let wallets = summary
        .wallets
        .iter()
        .map(|w| vec![format!("{} {}", w.icon, w.name), fmt_money(&w.balance)])
        .collect();
    println!("{}", pretty_table(&["Wallet", "Balance"], wallets));

    if !summary.spending_by_category.is_empty() {
        println!("{}", category_table("Spending", &summary.spending_by_category));
    }
    if !summary.income_by_category.is_empty() {
        println!("{}", category_table("Income", &summary.income_by_category));
    }

    let daily = summary
        .daily_trend
        .iter()
        .map(|d| vec![d.date.to_string(), fmt_money(&d.income), fmt_money(&d.expense)])
        .collect();
    println!("{}", pretty_table(&["Day", "Income", "Expense"], daily));

    let monthly = summary
        .monthly_trend
        .iter()
        .map(|m| vec![m.month.clone(), fmt_money(&m.income), fmt_money(&m.expense)])
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], monthly));

    println!(
        "{}",
        pretty_table(&VIEW_HEADERS, view_rows(&summary.recent_transactions))
    );
    Ok(())
}

pub(crate) fn category_table(label: &str, totals: &[CategoryTotal]) -> comfy_table::Table {
    let rows = totals
        .iter()
        .map(|c| vec![format!("{} {}", c.icon, c.name), fmt_money(&c.total)])
        .collect();
    pretty_table(&[label, "Total"], rows)
}
