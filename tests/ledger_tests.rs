// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use moneytrack::LedgerError;
use moneytrack::models::{TransactionPatch, TxKind};
use rust_decimal::Decimal;

#[test]
fn basic_flow_moves_balance_both_ways() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let salary = category(&store, owner, "Salary", TxKind::Income);
    let food = category(&store, owner, "Food", TxKind::Expense);

    tx(&store, owner, cash.id, salary.id, TxKind::Income, 50000, "2026-10-01");
    assert_eq!(balance(&store, owner, cash.id), dec(50000));

    let lunch = tx(&store, owner, cash.id, food.id, TxKind::Expense, 20000, "2026-10-02");
    assert_eq!(balance(&store, owner, cash.id), dec(30000));

    store.delete_transaction(owner, lunch.tx.id).unwrap();
    assert_eq!(balance(&store, owner, cash.id), dec(50000));
}

#[test]
fn created_view_carries_display_fields() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Pocket", 0);
    let food = category(&store, owner, "Snacks", TxKind::Expense);
    let mut new = new_tx(cash.id, food.id, TxKind::Expense, 12, "2026-10-03");
    new.description = Some("  chips  ".into());
    new.proof = Some("   ".into());
    let view = store.create_transaction(owner, new).unwrap();
    assert_eq!(view.wallet_name, "Pocket");
    assert_eq!(view.category_name, "Snacks");
    assert_eq!(view.tx.description.as_deref(), Some("chips"));
    assert_eq!(view.tx.proof, None);
    assert_eq!(store.get_transaction(owner, view.tx.id).unwrap(), view);
}

#[test]
fn non_positive_amounts_are_rejected() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let food = category(&store, owner, "Food", TxKind::Expense);
    for amount in [0, -5] {
        let err = store
            .create_transaction(owner, new_tx(cash.id, food.id, TxKind::Expense, amount, "2026-10-01"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
    assert_eq!(balance(&store, owner, cash.id), Decimal::ZERO);
}

#[test]
fn type_must_match_category_on_create_and_update() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let salary = category(&store, owner, "Salary", TxKind::Income);
    let food = category(&store, owner, "Food", TxKind::Expense);

    let err = store
        .create_transaction(owner, new_tx(cash.id, food.id, TxKind::Income, 10, "2026-10-01"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 10, "2026-10-01");
    let err = store
        .update_transaction(
            owner,
            t.tx.id,
            TransactionPatch {
                category_id: Some(salary.id),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(balance(&store, owner, cash.id), dec(-10));
}

#[test]
fn update_with_identical_fields_keeps_balance() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 1000);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 250, "2026-10-05");
    let before = balance(&store, owner, cash.id);

    let same = TransactionPatch {
        wallet_id: Some(cash.id),
        category_id: Some(food.id),
        r#type: Some(TxKind::Expense),
        amount: Some(dec(250)),
        date: Some(d("2026-10-05")),
        ..Default::default()
    };
    store.update_transaction(owner, t.tx.id, same).unwrap();
    store
        .update_transaction(owner, t.tx.id, TransactionPatch::default())
        .unwrap();
    assert_eq!(balance(&store, owner, cash.id), before);
    assert_eq!(before, dec(750));
}

#[test]
fn update_moves_effect_across_wallets_and_types() {
    let (store, owner) = setup();
    let a = wallet(&store, owner, "A", 1000);
    let b = wallet(&store, owner, "B", 1000);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let gift = category(&store, owner, "Gift", TxKind::Income);

    let t = tx(&store, owner, a.id, food.id, TxKind::Expense, 300, "2026-10-05");
    assert_eq!(balance(&store, owner, a.id), dec(700));

    let view = store
        .update_transaction(
            owner,
            t.tx.id,
            TransactionPatch {
                wallet_id: Some(b.id),
                category_id: Some(gift.id),
                r#type: Some(TxKind::Income),
                amount: Some(dec(500)),
                description: Some(Some("birthday".into())),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(view.wallet_name, "B");
    assert_eq!(view.tx.description.as_deref(), Some("birthday"));
    assert_eq!(balance(&store, owner, a.id), dec(1000));
    assert_eq!(balance(&store, owner, b.id), dec(1500));

    let cleared = store
        .update_transaction(
            owner,
            t.tx.id,
            TransactionPatch {
                description: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.tx.description, None);
    assert_eq!(balance(&store, owner, b.id), dec(1500));
}

#[test]
fn rejected_update_leaves_everything_untouched() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 100);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 40, "2026-10-05");

    let err = store
        .update_transaction(
            owner,
            t.tx.id,
            TransactionPatch {
                amount: Some(Decimal::ZERO),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(store.get_transaction(owner, t.tx.id).unwrap().tx.amount, dec(40));
    assert_eq!(balance(&store, owner, cash.id), dec(60));
}

#[test]
fn delete_then_recreate_restores_balance() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 500);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 120, "2026-10-05");
    let before_delete = balance(&store, owner, cash.id);

    store.delete_transaction(owner, t.tx.id).unwrap();
    tx(&store, owner, cash.id, food.id, TxKind::Expense, 120, "2026-10-05");
    assert_eq!(balance(&store, owner, cash.id), before_delete);
}

#[test]
fn balance_is_conserved_over_mixed_operations() {
    let (store, owner) = setup();
    let a = wallet(&store, owner, "A", 10000);
    let b = wallet(&store, owner, "B", 2500);
    let salary = category(&store, owner, "Salary", TxKind::Income);
    let food = category(&store, owner, "Food", TxKind::Expense);

    let t1 = tx(&store, owner, a.id, salary.id, TxKind::Income, 4000, "2026-10-01");
    let t2 = tx(&store, owner, a.id, food.id, TxKind::Expense, 650, "2026-10-02");
    let t3 = tx(&store, owner, b.id, food.id, TxKind::Expense, 75, "2026-10-03");
    store.transfer(owner, a.id, b.id, dec(1000)).unwrap();
    store
        .update_transaction(
            owner,
            t2.tx.id,
            TransactionPatch {
                wallet_id: Some(b.id),
                amount: Some(dec(700)),
                ..Default::default()
            },
        )
        .unwrap();
    store.delete_transaction(owner, t3.tx.id).unwrap();
    store.transfer(owner, b.id, a.id, dec(300)).unwrap();

    // Recompute from the surviving log plus transfers.
    let mut expect_a = dec(10000) - dec(1000) + dec(300);
    let mut expect_b = dec(2500) + dec(1000) - dec(300);
    for id in [t1.tx.id, t2.tx.id] {
        let t = store.get_transaction(owner, id).unwrap().tx;
        let signed = t.r#type.signed(t.amount);
        if t.wallet_id == a.id {
            expect_a += signed;
        } else {
            expect_b += signed;
        }
    }
    assert_eq!(balance(&store, owner, a.id), expect_a);
    assert_eq!(balance(&store, owner, b.id), expect_b);
    assert_eq!(expect_a, dec(13300));
    assert_eq!(expect_b, dec(2500));
}

#[test]
fn category_delete_is_guarded_by_transactions() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 10, "2026-10-01");

    let err = store.delete_category(owner, food.id).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));
    assert_eq!(err.status_code(), 409);

    store.delete_transaction(owner, t.tx.id).unwrap();
    store.delete_category(owner, food.id).unwrap();
    assert!(matches!(
        store.get_category(owner, food.id),
        Err(LedgerError::NotFound("category"))
    ));
}

#[test]
fn category_type_is_frozen_once_used() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let misc = category(&store, owner, "Misc", TxKind::Expense);
    tx(&store, owner, cash.id, misc.id, TxKind::Expense, 10, "2026-10-01");
    let err = store
        .update_category(
            owner,
            misc.id,
            moneytrack::models::CategoryPatch {
                r#type: Some(TxKind::Income),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));
}

#[test]
fn deleting_wallet_removes_its_transactions() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0);
    let food = category(&store, owner, "Food", TxKind::Expense);
    let t = tx(&store, owner, cash.id, food.id, TxKind::Expense, 10, "2026-10-01");
    store.delete_wallet(owner, cash.id).unwrap();
    assert!(matches!(
        store.get_transaction(owner, t.tx.id),
        Err(LedgerError::NotFound(_))
    ));
    // The category is free again.
    store.delete_category(owner, food.id).unwrap();
}

#[test]
fn other_users_rows_are_invisible() {
    let store = store();
    let ana = user(&store, "ana@example.com");
    let bob = user(&store, "bob@example.com");
    let cash = wallet(&store, ana, "Cash", 100);
    let spare = wallet(&store, ana, "Spare", 0);
    let food = category(&store, ana, "Food", TxKind::Expense);
    let t = tx(&store, ana, cash.id, food.id, TxKind::Expense, 10, "2026-10-01");
    let bob_cash = wallet(&store, bob, "Cash", 100);
    let bob_food = category(&store, bob, "Food", TxKind::Expense);

    assert!(matches!(store.get_wallet(bob, cash.id), Err(LedgerError::NotFound(_))));
    assert!(matches!(store.get_transaction(bob, t.tx.id), Err(LedgerError::NotFound(_))));
    assert!(matches!(store.delete_transaction(bob, t.tx.id), Err(LedgerError::NotFound(_))));
    assert!(matches!(
        store.update_transaction(bob, t.tx.id, TransactionPatch::default()),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(store.delete_category(bob, food.id), Err(LedgerError::NotFound(_))));
    assert!(matches!(
        store.transfer(bob, cash.id, spare.id, dec(1)),
        Err(LedgerError::NotFound(_))
    ));

    // Foreign ids inside a payload are bad input.
    let err = store
        .create_transaction(bob, new_tx(cash.id, bob_food.id, TxKind::Expense, 5, "2026-10-01"))
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid wallet");
    let err = store
        .create_transaction(bob, new_tx(bob_cash.id, food.id, TxKind::Expense, 5, "2026-10-01"))
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid category");

    assert_eq!(balance(&store, ana, cash.id), dec(90));
    assert_eq!(balance(&store, bob, bob_cash.id), dec(100));
}

/// `n` x 10^27, close to the top of the decimal range at n = 50.
fn huge(n: i128) -> Decimal {
    Decimal::from_i128_with_scale(n * 10i128.pow(27), 0)
}

fn huge_tx(
    store: &moneytrack::Store,
    owner: i64,
    wallet: i64,
    category: i64,
    kind: TxKind,
    amount: Decimal,
) -> Result<moneytrack::models::TransactionView, LedgerError> {
    let mut new = new_tx(wallet, category, kind, 1, "2026-10-01");
    new.amount = amount;
    store.create_transaction(owner, new)
}

#[test]
fn balance_overflow_is_rejected_and_rolled_back() {
    let (store, owner) = setup();
    let cash = wallet(&store, owner, "Cash", 0).id;
    let salary = category(&store, owner, "Salary", TxKind::Income).id;

    huge_tx(&store, owner, cash, salary, TxKind::Income, huge(50)).unwrap();
    let second = huge_tx(&store, owner, cash, salary, TxKind::Income, huge(50));
    assert!(matches!(second, Err(LedgerError::Validation(_))));

    // The insert rolled back with the balance, and the store still serves requests.
    assert_eq!(balance(&store, owner, cash), huge(50));
    let page = store
        .list_transactions(owner, &Default::default())
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(store.list_wallets(owner).unwrap().len(), 4);
}

#[test]
fn update_that_would_overflow_leaves_both_wallets() {
    let (store, owner) = setup();
    let a = wallet(&store, owner, "A", 0).id;
    let b = wallet(&store, owner, "B", 0).id;
    let salary = category(&store, owner, "Salary", TxKind::Income).id;
    huge_tx(&store, owner, a, salary, TxKind::Income, huge(50)).unwrap();
    let moved = huge_tx(&store, owner, b, salary, TxKind::Income, huge(50)).unwrap();

    let res = store.update_transaction(
        owner,
        moved.tx.id,
        TransactionPatch {
            wallet_id: Some(a),
            ..Default::default()
        },
    );
    assert!(matches!(res, Err(LedgerError::Validation(_))));
    assert_eq!(balance(&store, owner, a), huge(50));
    assert_eq!(balance(&store, owner, b), huge(50));
    assert_eq!(store.get_transaction(owner, moved.tx.id).unwrap().tx.wallet_id, b);
}

#[test]
fn transfer_that_would_overflow_moves_nothing() {
    let (store, owner) = setup();
    let a = wallet(&store, owner, "A", 0).id;
    let b = wallet(&store, owner, "B", 0).id;
    let salary = category(&store, owner, "Salary", TxKind::Income).id;
    huge_tx(&store, owner, a, salary, TxKind::Income, huge(50)).unwrap();
    huge_tx(&store, owner, b, salary, TxKind::Income, huge(50)).unwrap();

    let res = store.transfer(owner, a, b, huge(40));
    assert!(matches!(res, Err(LedgerError::Validation(_))));
    assert_eq!(balance(&store, owner, a), huge(50));
    assert_eq!(balance(&store, owner, b), huge(50));
}

#[test]
fn oversized_totals_fail_reads_without_breaking_the_store() {
    let (store, owner) = setup();
    let a = wallet(&store, owner, "A", 0).id;
    let b = wallet(&store, owner, "B", 0).id;
    let salary = category(&store, owner, "Salary", TxKind::Income).id;
    huge_tx(&store, owner, a, salary, TxKind::Income, huge(50)).unwrap();
    huge_tx(&store, owner, b, salary, TxKind::Income, huge(50)).unwrap();

    assert!(matches!(
        store.dashboard_summary_at(owner, d("2026-10-17")),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        store.report_at(owner, None, d("2026-10-17")),
        Err(LedgerError::Validation(_))
    ));
    assert_eq!(balance(&store, owner, a), huge(50));
    assert!(store.get_wallet(owner, b).is_ok());
}
