// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ops;
pub mod period;
pub mod query;
pub mod utils;
pub mod validate;

pub use db::Store;
pub use error::{LedgerError, LedgerResult};
