// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::NaiveDate;
use moneytrack::Store;
use moneytrack::models::{
    Category, NewCategory, NewTransaction, NewUser, NewWallet, TransactionView, TxKind, Wallet,
    WalletKind,
};
use rust_decimal::Decimal;

pub fn store() -> Store {
    Store::open_in_memory().unwrap().with_hash_cost(4)
}

pub fn user(store: &Store, email: &str) -> i64 {
    store
        .register_user(NewUser {
            name: "Test User".into(),
            email: email.into(),
            password: "secret1".into(),
        })
        .unwrap()
        .id
}

/// In-memory store with one registered user.
pub fn setup() -> (Store, i64) {
    let store = store();
    let owner = user(&store, "ana@example.com");
    (store, owner)
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

pub fn wallet(store: &Store, owner: i64, name: &str, balance: i64) -> Wallet {
    store
        .create_wallet(
            owner,
            NewWallet {
                name: name.into(),
                r#type: WalletKind::Cash,
                initial_balance: dec(balance),
                icon: None,
                color: None,
            },
        )
        .unwrap()
}

pub fn category(store: &Store, owner: i64, name: &str, kind: TxKind) -> Category {
    store
        .create_category(
            owner,
            NewCategory {
                name: name.into(),
                r#type: kind,
                icon: None,
                color: None,
            },
        )
        .unwrap()
}

pub fn new_tx(wallet: i64, category: i64, kind: TxKind, amount: i64, date: &str) -> NewTransaction {
    NewTransaction {
        wallet_id: wallet,
        category_id: category,
        r#type: kind,
        amount: dec(amount),
        date: d(date),
        description: None,
        proof: None,
    }
}

pub fn tx(
    store: &Store,
    owner: i64,
    wallet: i64,
    category: i64,
    kind: TxKind,
    amount: i64,
    date: &str,
) -> TransactionView {
    store
        .create_transaction(owner, new_tx(wallet, category, kind, amount, date))
        .unwrap()
}

pub fn balance(store: &Store, owner: i64, wallet: i64) -> Decimal {
    store.get_wallet(owner, wallet).unwrap().balance
}
