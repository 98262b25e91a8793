// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::db::Store;
use crate::models::{NewWallet, Wallet, WalletPatch};
use crate::utils::{fmt_money, opt_decimal, opt_enum, owner, parse_decimal, pretty_table, print_json_if_asked};

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => {
            let wallets = store.list_wallets(owner(sub)?)?;
            print_wallets(sub, &wallets)?;
        }
        Some(("show", sub)) => {
            let id = *sub.get_one::<i64>("id").context("wallet id")?;
            let wallet = store.get_wallet(owner(sub)?, id)?;
            print_wallets(sub, std::slice::from_ref(&wallet))?;
        }
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("wallet id")?;
            store.delete_wallet(owner(sub)?, id)?;
            println!("Deleted wallet {} and its transactions", id);
        }
        Some(("transfer", sub)) => transfer(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewWallet {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        r#type: opt_enum(sub, "type")?.context("--type")?,
        initial_balance: opt_decimal(sub, "balance")?.unwrap_or(Decimal::ZERO),
        icon: sub.get_one::<String>("icon").cloned(),
        color: sub.get_one::<String>("color").cloned(),
    };
    let wallet = store.create_wallet(owner(sub)?, new)?;
    if !print_json_if_asked(sub, &wallet)? {
        println!(
            "Added wallet {} '{}' ({}) with balance {}",
            wallet.id,
            wallet.name,
            wallet.r#type,
            fmt_money(&wallet.balance)
        );
    }
    Ok(())
}

fn edit(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("wallet id")?;
    let patch = WalletPatch {
        name: sub.get_one::<String>("name").cloned(),
        r#type: opt_enum(sub, "type")?,
        icon: sub.get_one::<String>("icon").cloned(),
        color: sub.get_one::<String>("color").cloned(),
    };
    let wallet = store.update_wallet(owner(sub)?, id, patch)?;
    print_wallets(sub, std::slice::from_ref(&wallet))
}

fn transfer(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let from = *sub.get_one::<i64>("from").context("--from")?;
    let to = *sub.get_one::<i64>("to").context("--to")?;
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount")?)?;
    let receipt = store.transfer(owner(sub)?, from, to, amount)?;
    if !print_json_if_asked(sub, &receipt)? {
        println!(
            "Moved {} from wallet {} (now {}) to wallet {} (now {})",
            fmt_money(&receipt.amount),
            receipt.from_wallet_id,
            fmt_money(&receipt.from_balance),
            receipt.to_wallet_id,
            fmt_money(&receipt.to_balance)
        );
    }
    Ok(())
}

fn print_wallets(sub: &clap::ArgMatches, wallets: &[Wallet]) -> Result<()> {
    if !print_json_if_asked(sub, &wallets)? {
        let rows = wallets
            .iter()
            .map(|w| {
                vec![
                    w.id.to_string(),
                    format!("{} {}", w.icon, w.name),
                    w.r#type.to_string(),
                    fmt_money(&w.balance),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Wallet", "Type", "Balance"], rows));
    }
    Ok(())
}
