// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::utils::{fmt_money, owner, pretty_table, print_json_if_asked, range_args};

use super::dashboard::category_table;
use super::exporter;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("export", sub)) => {
            let report = store.report(owner(sub)?, range_args(sub)?)?;
            let fmt = sub.get_one::<String>("format").context("--format")?;
            let out = sub.get_one::<String>("out").context("--out")?;
            exporter::write_report(&report, fmt, out)?;
            println!(
                "Exported {} transaction(s) from {} to {} into {}",
                report.transactions.len(),
                report.range.start,
                report.range.end,
                out
            );
        }
        _ => {}
    }
    Ok(())
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let report = store.report(owner(sub)?, range_args(sub)?)?;
    if print_json_if_asked(sub, &report)? {
        return Ok(());
    }
    println!(
        "{} to {}: income {} expense {} net {} ({} transactions)",
        report.range.start,
        report.range.end,
        fmt_money(&report.total_income),
        fmt_money(&report.total_expense),
        fmt_money(&report.net),
        report.transactions.len()
    );
    let trend = report
        .monthly_trend
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                fmt_money(&m.income),
                fmt_money(&m.expense),
                fmt_money(&(m.income - m.expense)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense", "Net"], trend));
    if !report.spending_by_category.is_empty() {
        println!("{}", category_table("Spending", &report.spending_by_category));
    }
    if !report.income_by_category.is_empty() {
        println!("{}", category_table("Income", &report.income_by_category));
    }
    Ok(())
}
