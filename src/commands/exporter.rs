// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Result, bail};

use crate::aggregate::Report;

pub const CSV_HEADER: [&str; 7] = [
    "date",
    "type",
    "wallet",
    "category",
    "amount",
    "description",
    "proof",
];

/// Write `report` as `csv` or `json`. Nothing is written for an unknown format.
pub fn write_report(report: &Report, format: &str, out: impl AsRef<Path>) -> Result<()> {
    let out = out.as_ref();
    match format.to_lowercase().as_str() {
        "csv" => {
            // Totals follow the rows as two-column records.
            let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(out)?;
            wtr.write_record(CSV_HEADER)?;
            for v in &report.transactions {
                wtr.write_record([
                    v.tx.date.to_string(),
                    v.tx.r#type.to_string(),
                    v.wallet_name.clone(),
                    v.category_name.clone(),
                    v.tx.amount.to_string(),
                    v.tx.description.clone().unwrap_or_default(),
                    v.tx.proof.clone().unwrap_or_default(),
                ])?;
            }
            wtr.write_record(["total_income".to_string(), report.total_income.to_string()])?;
            wtr.write_record(["total_expense".to_string(), report.total_expense.to_string()])?;
            wtr.write_record(["net".to_string(), report.net.to_string()])?;
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(report)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::info!(path = %out.display(), rows = report.transactions.len(), "exported report");
    Ok(())
}
