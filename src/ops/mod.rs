// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger operations, one module per entity, each an `impl Store` block.
//!
//! Every operation is scoped to an owner id. Mutations validate first, then
//! apply balance deltas, then commit, all inside one `Store::write`.

pub mod balance;
pub mod budgets;
pub mod categories;
pub mod transactions;
pub mod transfer;
pub mod users;
pub mod wallets;

pub(crate) const DEFAULT_COLOR: &str = "#6366f1";
