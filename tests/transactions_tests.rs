// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use moneytrack::models::TxKind;
use moneytrack::ops::transactions::TransactionFilter;
use moneytrack::{Store, cli, commands::transactions, utils};

struct Fixture {
    store: Store,
    owner: i64,
    cash: i64,
    bank: i64,
    food: i64,
    salary: i64,
}

fn setup_ledger() -> Fixture {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Wallet", 0).id;
    let bank = wallet(&store, owner, "Checking", 0).id;
    let food = category(&store, owner, "Groceries", TxKind::Expense).id;
    let salary = category(&store, owner, "Pay", TxKind::Income).id;
    for (i, desc) in ["Lunch", "Lunch 50% off", "Dinner", "lunch_box"].iter().enumerate() {
        let mut new = new_tx(cash, food, TxKind::Expense, 10 + i as i64, &format!("2025-01-0{}", i + 1));
        new.description = Some(desc.to_string());
        store.create_transaction(owner, new).unwrap();
    }
    tx(&store, owner, bank, salary, TxKind::Income, 1000, "2025-01-05");
    Fixture {
        store,
        owner,
        cash,
        bank,
        food,
        salary,
    }
}

#[test]
fn list_defaults_to_newest_first() {
    let f = setup_ledger();
    let page = f
        .store
        .list_transactions(f.owner, &TransactionFilter::default())
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.limit, 50);
    assert!(!page.has_more);
    let dates: Vec<String> = page.items.iter().map(|v| v.tx.date.to_string()).collect();
    assert_eq!(
        dates,
        ["2025-01-05", "2025-01-04", "2025-01-03", "2025-01-02", "2025-01-01"]
    );
}

#[test]
fn same_day_entries_list_latest_first() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0).id;
    let food = category(&store, owner, "Food", TxKind::Expense).id;
    let first = tx(&store, owner, cash, food, TxKind::Expense, 1, "2025-02-01");
    let second = tx(&store, owner, cash, food, TxKind::Expense, 2, "2025-02-01");
    let page = store
        .list_transactions(owner, &TransactionFilter::default())
        .unwrap();
    assert_eq!(page.items[0].tx.id, second.tx.id);
    assert_eq!(page.items[1].tx.id, first.tx.id);
}

#[test]
fn filters_combine() {
    let f = setup_ledger();
    let q = TransactionFilter {
        r#type: Some(TxKind::Income),
        ..Default::default()
    };
    let page = f.store.list_transactions(f.owner, &q).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].tx.category_id, f.salary);
    assert_eq!(page.items[0].tx.wallet_id, f.bank);

    let q = TransactionFilter {
        wallet_id: Some(f.cash),
        category_id: Some(f.food),
        ..TransactionFilter::between(d("2025-01-02"), d("2025-01-03"))
    };
    let page = f.store.list_transactions(f.owner, &q).unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|v| v.wallet_name == "Wallet"));
}

#[test]
fn search_matches_substrings_literally() {
    let f = setup_ledger();
    let search = |s: &str| {
        let q = TransactionFilter {
            search: Some(s.to_string()),
            ..Default::default()
        };
        f.store.list_transactions(f.owner, &q).unwrap().total
    };
    assert_eq!(search("lunch"), 3);
    assert_eq!(search("50%"), 1);
    assert_eq!(search("_"), 1);
    assert_eq!(search("%"), 1);
    assert_eq!(search("   "), 5);
}

#[test]
fn pagination_reports_totals() {
    let f = setup_ledger();
    let q = TransactionFilter {
        limit: Some(2),
        offset: Some(2),
        ..Default::default()
    };
    let page = f.store.list_transactions(f.owner, &q).unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].tx.date, d("2025-01-03"));
    assert!(page.has_more);

    let q = TransactionFilter {
        limit: Some(2),
        offset: Some(4),
        ..Default::default()
    };
    let page = f.store.list_transactions(f.owner, &q).unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(!page.has_more);
}

#[test]
fn list_is_scoped_to_owner() {
    let f = setup_ledger();
    let other = user(&f.store, "bob@example.com");
    let page = f
        .store
        .list_transactions(other, &TransactionFilter::default())
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[test]
fn list_limit_respected() {
    let f = setup_ledger();
    let cli = cli::build_cli();
    let user_arg = f.owner.to_string();
    let matches = cli.get_matches_from([
        "moneytrack",
        "--user",
        &user_arg,
        "tx",
        "list",
        "--type",
        "expense",
        "--search",
        "lunch",
        "--limit",
        "2",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let query = transactions::filter_from_args(list_m).unwrap();
            assert_eq!(query.r#type, Some(TxKind::Expense));
            let owner = utils::owner(list_m).unwrap();
            let page = f.store.list_transactions(owner, &query).unwrap();
            assert_eq!(page.total, 3);
            assert_eq!(page.items.len(), 2);
            assert_eq!(page.items[0].tx.date, d("2025-01-04"));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn cli_rejects_unknown_type() {
    let res = cli::build_cli().try_get_matches_from([
        "moneytrack",
        "tx",
        "list",
        "--type",
        "refund",
    ]);
    assert!(res.is_err());
}

#[test]
fn pagination_bounds_are_checked() {
    let f = setup_ledger();
    let page_of = |limit: Option<usize>, offset: Option<usize>| {
        let q = TransactionFilter {
            limit,
            offset,
            ..Default::default()
        };
        f.store.list_transactions(f.owner, &q)
    };

    let empty = page_of(Some(0), None).unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total, 5);
    assert!(empty.has_more);

    let past_end = page_of(None, Some(1000)).unwrap();
    assert!(past_end.items.is_empty());
    assert!(!past_end.has_more);

    assert!(matches!(
        page_of(None, Some(usize::MAX)),
        Err(moneytrack::LedgerError::Validation(_))
    ));
    assert!(matches!(
        page_of(Some(usize::MAX), None),
        Err(moneytrack::LedgerError::Validation(_))
    ));
}

#[test]
fn cli_offset_beyond_sql_range_is_rejected() {
    let f = setup_ledger();
    let user_arg = f.owner.to_string();
    let matches = cli::build_cli().get_matches_from([
        "moneytrack",
        "--user",
        &user_arg,
        "tx",
        "list",
        "--offset",
        "18446744073709551615",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let query = transactions::filter_from_args(list_m).unwrap();
    assert!(f.store.list_transactions(f.owner, &query).is_err());
}
