// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LedgerError;

/// Implements string round-tripping and SQLite conversions for a fieldless enum.
macro_rules! text_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Accepted spellings, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(LedgerError::validation(format!(
                        "invalid {} '{}', expected one of: {}",
                        $label,
                        other,
                        $name::NAMES.join(", ")
                    ))),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                let s = value.as_str()?;
                s.parse().map_err(|e: LedgerError| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Cash,
    Bank,
    Ewallet,
}

text_enum!(WalletKind, "wallet type", {
    Cash => "cash",
    Bank => "bank",
    Ewallet => "ewallet",
});

/// Direction of money for categories and transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

text_enum!(TxKind, "transaction type", {
    Income => "income",
    Expense => "expense",
});

impl TxKind {
    /// Signed effect of `amount` on a wallet balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Income => amount,
            TxKind::Expense => -amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
}

text_enum!(BudgetPeriod, "budget period", {
    Monthly => "monthly",
    Weekly => "weekly",
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub profile_photo: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub r#type: WalletKind,
    pub balance: Decimal,
    pub icon: String,
    pub color: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub r#type: TxKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub wallet_id: i64,
    pub category_id: i64,
    pub r#type: TxKind,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub proof: Option<String>,
    pub created_at: String,
}

/// A transaction with the wallet and category display fields joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    #[serde(flatten)]
    pub tx: Transaction,
    pub wallet_name: String,
    pub wallet_icon: String,
    pub wallet_color: String,
    pub category_name: String,
    pub category_icon: String,
    pub category_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
}

/// A budget evaluated against the transactions of its current window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    #[serde(flatten)]
    pub budget: Budget,
    pub category_name: String,
    pub category_icon: String,
    pub category_color: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewWallet {
    pub name: String,
    pub r#type: WalletKind,
    #[serde(default)]
    pub initial_balance: Decimal,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub r#type: TxKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub wallet_id: i64,
    pub category_id: i64,
    pub r#type: TxKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub proof: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    pub category_id: i64,
    pub amount: Decimal,
    #[serde(default = "default_period")]
    pub period: BudgetPeriod,
}

fn default_period() -> BudgetPeriod {
    BudgetPeriod::Monthly
}

// Update payloads. `None` leaves a field untouched. For nullable columns the
// inner option separates "set to null" (`Some(None)`) from "omitted" (`None`),
// and an explicit zero or empty string is always applied as given.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub profile_photo: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletPatch {
    pub name: Option<String>,
    pub r#type: Option<WalletKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub r#type: Option<TxKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionPatch {
    pub wallet_id: Option<i64>,
    pub category_id: Option<i64>,
    pub r#type: Option<TxKind>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub proof: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BudgetPatch {
    pub amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
}

/// Present-but-null deserializes to `Some(None)`; a missing key stays `None`
/// through `#[serde(default)]`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
