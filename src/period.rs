// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar windows used for bucketing transactions.
//!
//! All windows are inclusive on both ends and are derived from a reference
//! "today", never from when a budget was created.

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::BudgetPeriod;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> LedgerResult<Self> {
        if start > end {
            return Err(LedgerError::validation(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The server's current local date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Longest range, in calendar months, that can be bucketed month by month.
pub const MAX_SPAN_MONTHS: usize = 1200;

fn out_of_range(date: NaiveDate) -> LedgerError {
    LedgerError::validation(format!("date window around {} is out of range", date))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First through last day of the calendar month containing `date`.
pub fn month_of(date: NaiveDate) -> LedgerResult<DateRange> {
    let start = first_of_month(date);
    let end = match start.month() {
        12 => NaiveDate::from_ymd_opt(start.year(), 12, 31),
        m => NaiveDate::from_ymd_opt(start.year(), m + 1, 1).and_then(|next| next.pred_opt()),
    }
    .ok_or_else(|| out_of_range(date))?;
    Ok(DateRange { start, end })
}

/// Sunday through Saturday of the week containing `date`.
pub fn week_of(date: NaiveDate) -> LedgerResult<DateRange> {
    let start = date
        .checked_sub_days(Days::new(date.weekday().num_days_from_sunday() as u64))
        .ok_or_else(|| out_of_range(date))?;
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| out_of_range(date))?;
    Ok(DateRange { start, end })
}

pub fn budget_window(period: BudgetPeriod, today: NaiveDate) -> LedgerResult<DateRange> {
    match period {
        BudgetPeriod::Monthly => month_of(today),
        BudgetPeriod::Weekly => week_of(today),
    }
}

/// The `n` days ending at `today`, oldest first.
pub fn last_days(today: NaiveDate, n: u32) -> LedgerResult<Vec<NaiveDate>> {
    (0..n as u64)
        .rev()
        .map(|i| {
            today
                .checked_sub_days(Days::new(i))
                .ok_or_else(|| out_of_range(today))
        })
        .collect()
}

/// The `n` calendar months ending with the one containing `today`, oldest first.
pub fn last_months(today: NaiveDate, n: u32) -> LedgerResult<Vec<DateRange>> {
    let current = first_of_month(today);
    (0..n)
        .rev()
        .map(|i| {
            current
                .checked_sub_months(Months::new(i))
                .ok_or_else(|| out_of_range(today))
                .and_then(month_of)
        })
        .collect()
}

/// Every calendar month that overlaps `range`, clipped to it. Ranges longer
/// than [`MAX_SPAN_MONTHS`] are rejected.
pub fn months_spanning(range: DateRange) -> LedgerResult<Vec<DateRange>> {
    let span = (i64::from(range.end.year()) - i64::from(range.start.year())) * 12
        + i64::from(range.end.month())
        - i64::from(range.start.month())
        + 1;
    if span > MAX_SPAN_MONTHS as i64 {
        return Err(LedgerError::validation(format!(
            "range {} to {} covers {} months; at most {} allowed",
            range.start, range.end, span, MAX_SPAN_MONTHS
        )));
    }
    let mut out = Vec::new();
    let mut cursor = Some(first_of_month(range.start));
    while let Some(first) = cursor.filter(|c| *c <= range.end) {
        let month = month_of(first)?;
        out.push(DateRange {
            start: month.start.max(range.start),
            end: month.end.min(range.end),
        });
        cursor = first.checked_add_months(Months::new(1));
    }
    Ok(out)
}

/// e.g. `Oct 2026`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
