// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::Store;
use crate::error::{LedgerError, LedgerResult};
use crate::validate;

use super::balance;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub from_wallet_id: i64,
    pub to_wallet_id: i64,
    pub amount: Decimal,
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

impl Store {
    /// Moves `amount` between two of the owner's wallets without recording a
    /// transaction. Both balance writes commit together or not at all.
    pub fn transfer(
        &self,
        owner: i64,
        from_wallet_id: i64,
        to_wallet_id: i64,
        amount: Decimal,
    ) -> LedgerResult<TransferReceipt> {
        let amount = validate::positive_amount(amount, "transfer amount")?;
        if from_wallet_id == to_wallet_id {
            return Err(LedgerError::validation(
                "source and destination wallet must differ",
            ));
        }
        let receipt = self.write(|conn| {
            let from = validate::require_wallet(conn, owner, from_wallet_id)?;
            validate::require_wallet(conn, owner, to_wallet_id)?;
            if from.balance < amount {
                tracing::warn!(
                    owner,
                    wallet = from.id,
                    available = %from.balance,
                    requested = %amount,
                    "transfer refused"
                );
                return Err(LedgerError::InsufficientFunds {
                    available: from.balance,
                    requested: amount,
                });
            }
            let from_balance = balance::apply_delta(conn, owner, from_wallet_id, -amount)?;
            let to_balance = balance::apply_delta(conn, owner, to_wallet_id, amount)?;
            Ok(TransferReceipt {
                from_wallet_id,
                to_wallet_id,
                amount,
                from_balance,
                to_balance,
            })
        })?;
        tracing::info!(
            owner,
            from = from_wallet_id,
            to = to_wallet_id,
            amount = %amount,
            "transferred between wallets"
        );
        Ok(receipt)
    }
}
