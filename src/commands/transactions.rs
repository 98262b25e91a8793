// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use crate::db::Store;
use crate::models::{NewTransaction, TransactionPatch, TransactionView};
use crate::ops::transactions::TransactionFilter;
use crate::period;
use crate::utils::{
    fmt_money, opt_date, opt_decimal, opt_enum, owner, parse_decimal, pretty_table,
    print_json_if_asked,
};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("id").context("transaction id")?;
            let view = store.get_transaction(owner(sub)?, id)?;
            print_views(sub, std::slice::from_ref(&view))?;
        }
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("transaction id")?;
            store.delete_transaction(owner(sub)?, id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewTransaction {
        wallet_id: *sub.get_one::<i64>("wallet").context("--wallet")?,
        category_id: *sub.get_one::<i64>("category").context("--category")?,
        r#type: opt_enum(sub, "type")?.context("--type")?,
        amount: parse_decimal(sub.get_one::<String>("amount").context("--amount")?)?,
        date: opt_date(sub, "date")?.unwrap_or_else(period::today),
        description: sub.get_one::<String>("description").cloned(),
        proof: sub.get_one::<String>("proof").cloned(),
    };
    let view = store.create_transaction(owner(sub)?, new)?;
    if !print_json_if_asked(sub, &view)? {
        println!(
            "Recorded {} {} on {} in {} / {}",
            view.tx.r#type,
            fmt_money(&view.tx.amount),
            view.tx.date,
            view.wallet_name,
            view.category_name
        );
    }
    Ok(())
}

/// Translate `tx list` arguments into a listing query.
pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        r#type: opt_enum(sub, "type")?,
        wallet_id: sub.get_one::<i64>("wallet").copied(),
        category_id: sub.get_one::<i64>("category").copied(),
        start_date: opt_date(sub, "from")?,
        end_date: opt_date(sub, "to")?,
        search: sub.get_one::<String>("search").cloned(),
        limit: sub.get_one::<usize>("limit").copied(),
        offset: sub.get_one::<usize>("offset").copied(),
    })
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let query = filter_from_args(sub)?;
    let page = store.list_transactions(owner(sub)?, &query)?;
    if print_json_if_asked(sub, &page)? {
        return Ok(());
    }
    println!("{}", pretty_table(&VIEW_HEADERS, view_rows(&page.items)));
    println!(
        "Showing {}-{} of {}{}",
        if page.items.is_empty() { 0 } else { page.offset.saturating_add(1) },
        page.offset.saturating_add(page.items.len()),
        page.total,
        if page.has_more { " (use --offset for more)" } else { "" }
    );
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("transaction id")?;
    let description = if sub.get_flag("clear-description") {
        Some(None)
    } else {
        sub.get_one::<String>("description").map(|d| Some(d.clone()))
    };
    let proof = if sub.get_flag("clear-proof") {
        Some(None)
    } else {
        sub.get_one::<String>("proof").map(|p| Some(p.clone()))
    };
    let patch = TransactionPatch {
        wallet_id: sub.get_one::<i64>("wallet").copied(),
        category_id: sub.get_one::<i64>("category").copied(),
        r#type: opt_enum(sub, "type")?,
        amount: opt_decimal(sub, "amount")?,
        date: opt_date(sub, "date")?,
        description,
        proof,
    };
    let view = store.update_transaction(owner(sub)?, id, patch)?;
    print_views(sub, std::slice::from_ref(&view))
}

pub(crate) fn view_rows(views: &[TransactionView]) -> Vec<Vec<String>> {
    views
        .iter()
        .map(|v| {
            vec![
                v.tx.id.to_string(),
                v.tx.date.to_string(),
                format!("{} {}", v.wallet_icon, v.wallet_name),
                format!("{} {}", v.category_icon, v.category_name),
                v.tx.r#type.to_string(),
                fmt_money(&v.tx.amount),
                v.tx.description.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub(crate) const VIEW_HEADERS: [&str; 7] =
    ["ID", "Date", "Wallet", "Category", "Type", "Amount", "Description"];

fn print_views(sub: &clap::ArgMatches, views: &[TransactionView]) -> Result<()> {
    if !print_json_if_asked(sub, &views)? {
        println!("{}", pretty_table(&VIEW_HEADERS, view_rows(views)));
    }
    Ok(())
}
