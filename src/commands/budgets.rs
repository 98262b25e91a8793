// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::{BudgetPatch, BudgetPeriod, BudgetStatus, NewBudget};
use crate::utils::{fmt_money, opt_decimal, opt_enum, owner, parse_decimal, pretty_table, print_json_if_asked};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewBudget {
                category_id: *sub.get_one::<i64>("category").context("--category")?,
                amount: parse_decimal(sub.get_one::<String>("amount").context("--amount")?)?,
                period: opt_enum(sub, "period")?.unwrap_or(BudgetPeriod::Monthly),
            };
            let status = store.create_budget(owner(sub)?, new)?;
            print_status(sub, std::slice::from_ref(&status))?;
        }
        Some(("list", sub)) => {
            let list = store.list_budgets(owner(sub)?)?;
            print_status(sub, &list)?;
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("id").context("budget id")?;
            let status = store.get_budget(owner(sub)?, id)?;
            print_status(sub, std::slice::from_ref(&status))?;
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").context("budget id")?;
            let patch = BudgetPatch {
                amount: opt_decimal(sub, "amount")?,
                period: opt_enum(sub, "period")?,
            };
            let status = store.update_budget(owner(sub)?, id, patch)?;
            print_status(sub, std::slice::from_ref(&status))?;
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("budget id")?;
            store.delete_budget(owner(sub)?, id)?;
            println!("Deleted budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn print_status(sub: &clap::ArgMatches, list: &[BudgetStatus]) -> Result<()> {
    if !print_json_if_asked(sub, &list)? {
        let rows = list
            .iter()
            .map(|s| {
                vec![
                    s.budget.id.to_string(),
                    format!("{} {}", s.category_icon, s.category_name),
                    s.budget.period.to_string(),
                    format!("{}..{}", s.window_start, s.window_end),
                    fmt_money(&s.budget.amount),
                    fmt_money(&s.spent),
                    fmt_money(&s.remaining),
                    format!("{}%", s.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Period", "Window", "Budget", "Spent", "Remaining", "Used"],
                rows
            )
        );
    }
    Ok(())
}
