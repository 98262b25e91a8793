// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime settings. Each value comes from its command-line flag, then its
//! environment variable, then the built-in default.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;

use crate::aggregate::DEFAULT_RECENT_LIMIT;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneytrack", "moneytrack"));

pub const DB_ENV: &str = "MONEYTRACK_DB";
pub const LOG_ENV: &str = "MONEYTRACK_LOG";
pub const RECENT_LIMIT_ENV: &str = "MONEYTRACK_RECENT_LIMIT";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
    pub recent_limit: usize,
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneytrack.sqlite"))
}

impl Config {
    /// Resolve from parsed global flags and the process environment.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        Self::resolve(m, |key| std::env::var(key).ok())
    }

    /// Resolve with `env` standing in for the process environment.
    pub fn resolve(m: &clap::ArgMatches, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match m
            .get_one::<String>("db")
            .cloned()
            .or_else(|| env(DB_ENV).filter(|s| !s.trim().is_empty()))
        {
            Some(p) => PathBuf::from(p),
            None => default_db_path()?,
        };

        let log_filter = m
            .get_one::<String>("log")
            .cloned()
            .or_else(|| env(LOG_ENV).filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let recent_limit = match m.get_one::<usize>("recent-limit") {
            Some(n) => *n,
            None => match env(RECENT_LIMIT_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid {} '{}'", RECENT_LIMIT_ENV, raw))?,
                None => DEFAULT_RECENT_LIMIT,
            },
        };

        Ok(Self {
            db_path,
            log_filter,
            recent_limit,
        })
    }
}
