// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::models::{BudgetPeriod, TxKind, WalletKind};

fn one_of(names: &'static [&'static str]) -> PossibleValuesParser {
    PossibleValuesParser::new(names.iter().copied())
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn opt(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn req(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

fn flag(name: &'static str) -> Arg {
    Arg::new(name).long(name).action(ArgAction::SetTrue)
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Register and manage the account")
        .subcommand_required(true)
        .subcommand(
            Command::new("register")
                .about("Create a user with starter wallets and categories")
                .arg(req("name"))
                .arg(req("email"))
                .arg(req("password")),
        )
        .subcommand(
            Command::new("login")
                .about("Check credentials and print the user id")
                .arg(req("email"))
                .arg(req("password")),
        )
        .subcommand(Command::new("show").about("Show the --user profile"))
        .subcommand(
            Command::new("update")
                .about("Edit name, email or photo")
                .arg(opt("name"))
                .arg(opt("email"))
                .arg(opt("photo").conflicts_with("clear-photo"))
                .arg(flag("clear-photo")),
        )
        .subcommand(
            Command::new("password")
                .about("Change password")
                .arg(req("current"))
                .arg(req("new")),
        )
}

fn wallet_cmd() -> Command {
    Command::new("wallet")
        .about("Wallets and transfers")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("name"))
                .arg(req("type").value_parser(one_of(WalletKind::NAMES)))
                .arg(opt("balance").help("Initial balance (default 0)"))
                .arg(opt("icon"))
                .arg(opt("color")),
        )
        .subcommand(Command::new("list"))
        .subcommand(Command::new("show").arg(id_arg()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("name"))
                .arg(opt("type").value_parser(one_of(WalletKind::NAMES)))
                .arg(opt("icon"))
                .arg(opt("color")),
        )
        .subcommand(Command::new("rm").about("Delete wallet and its transactions").arg(id_arg()))
        .subcommand(
            Command::new("transfer")
                .about("Move money between two wallets")
                .arg(req("from").value_parser(value_parser!(i64)))
                .arg(req("to").value_parser(value_parser!(i64)))
                .arg(req("amount")),
        )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Income and expense categories")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("name"))
                .arg(req("type").value_parser(one_of(TxKind::NAMES)))
                .arg(opt("icon"))
                .arg(opt("color")),
        )
        .subcommand(Command::new("list").arg(opt("type").value_parser(one_of(TxKind::NAMES))))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("name"))
                .arg(opt("type").value_parser(one_of(TxKind::NAMES)))
                .arg(opt("icon"))
                .arg(opt("color")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expense transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("wallet").value_parser(value_parser!(i64)))
                .arg(req("category").value_parser(value_parser!(i64)))
                .arg(req("type").value_parser(one_of(TxKind::NAMES)))
                .arg(req("amount"))
                .arg(opt("date").help("YYYY-MM-DD (default today)"))
                .arg(opt("description"))
                .arg(opt("proof")),
        )
        .subcommand(
            Command::new("list")
                .arg(opt("type").value_parser(one_of(TxKind::NAMES)))
                .arg(opt("wallet").value_parser(value_parser!(i64)))
                .arg(opt("category").value_parser(value_parser!(i64)))
                .arg(opt("from").help("Start date YYYY-MM-DD (inclusive)"))
                .arg(opt("to").help("End date YYYY-MM-DD (inclusive)"))
                .arg(opt("search").help("Substring of the description"))
                .arg(opt("limit").value_parser(value_parser!(usize)))
                .arg(opt("offset").value_parser(value_parser!(usize))),
        )
        .subcommand(Command::new("show").arg(id_arg()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("wallet").value_parser(value_parser!(i64)))
                .arg(opt("category").value_parser(value_parser!(i64)))
                .arg(opt("type").value_parser(one_of(TxKind::NAMES)))
                .arg(opt("amount"))
                .arg(opt("date"))
                .arg(opt("description").conflicts_with("clear-description"))
                .arg(flag("clear-description"))
                .arg(opt("proof").conflicts_with("clear-proof"))
                .arg(flag("clear-proof")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Per-category spending limits")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(req("category").value_parser(value_parser!(i64)))
                .arg(req("amount"))
                .arg(opt("period").value_parser(one_of(BudgetPeriod::NAMES)).default_value("monthly")),
        )
        .subcommand(Command::new("list"))
        .subcommand(Command::new("show").arg(id_arg()))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("amount"))
                .arg(opt("period").value_parser(one_of(BudgetPeriod::NAMES))),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn report_cmd() -> Command {
    let range = |c: Command| {
        c.arg(opt("from").help("Start date YYYY-MM-DD (default: first of this month)"))
            .arg(opt("to").help("End date YYYY-MM-DD (default: end of this month)"))
    };
    Command::new("report")
        .about("Totals over a date range")
        .subcommand_required(true)
        .subcommand(range(Command::new("summary")))
        .subcommand(range(
            Command::new("export")
                .arg(req("format").value_parser(["csv", "json"]))
                .arg(req("out")),
        ))
}

pub fn build_cli() -> Command {
    Command::new("moneytrack")
        .about("Personal income, expense and budget tracker")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("SQLite file (env MONEYTRACK_DB)"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .global(true)
                .help("Log filter, e.g. info or moneytrack=debug (env MONEYTRACK_LOG)"),
        )
        .arg(
            Arg::new("recent-limit")
                .long("recent-limit")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Recent transactions shown on the dashboard (env MONEYTRACK_RECENT_LIMIT)"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .value_parser(value_parser!(i64))
                .help("Acting user id"),
        )
        .arg(flag("json").global(true).help("Print pretty JSON"))
        .arg(flag("jsonl").global(true).help("Print one JSON value per line"))
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(user_cmd())
        .subcommand(wallet_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(Command::new("dashboard").about("Balances, this month and recent activity"))
        .subcommand(report_cmd())
}
