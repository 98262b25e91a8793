// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::period::{self, DateRange};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn opt_decimal(m: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(name).map(|s| parse_decimal(s)).transpose()
}

pub fn opt_date(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}

/// Parse an enum argument restricted by clap's possible values.
pub fn opt_enum<T>(m: &clap::ArgMatches, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(m.get_one::<String>(name).map(|s| s.parse::<T>()).transpose()?)
}

/// The acting user from the global `--user` flag.
pub fn owner(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("user")
        .copied()
        .context("This command needs --user <ID> (see `user register` or `user login`)")
}

/// `--from`/`--to` as a range. Either bound defaults to the current month's.
pub fn range_args(m: &clap::ArgMatches) -> Result<Option<DateRange>> {
    let from = opt_date(m, "from")?;
    let to = opt_date(m, "to")?;
    if from.is_none() && to.is_none() {
        return Ok(None);
    }
    let month = period::month_of(period::today())?;
    Ok(Some(DateRange::new(
        from.unwrap_or(month.start),
        to.unwrap_or(month.end),
    )?))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line.
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// `maybe_print_json` driven by the global `--json`/`--jsonl` flags.
pub fn print_json_if_asked<T: serde::Serialize>(m: &clap::ArgMatches, v: &T) -> Result<bool> {
    maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), v)
}
