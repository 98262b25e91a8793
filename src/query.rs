// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Composable `WHERE` clauses with bound parameters.
//!
//! Column names are always static strings chosen by the caller; user input
//! only ever travels as a bound value.

use rusqlite::ToSql;
use rusqlite::types::Value;

#[derive(Debug, Default, Clone)]
pub struct Filter {
    predicates: Vec<String>,
    params: Vec<Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column op ?`.
    pub fn cmp(mut self, column: &'static str, op: &'static str, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self.predicates
            .push(format!("{} {} ?{}", column, op, self.params.len()));
        self
    }

    pub fn eq(self, column: &'static str, value: impl Into<Value>) -> Self {
        self.cmp(column, "=", value)
    }

    /// Apply [`Filter::cmp`] only when `value` is present.
    pub fn cmp_opt<V: Into<Value>>(
        self,
        column: &'static str,
        op: &'static str,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(v) => self.cmp(column, op, v),
            None => self,
        }
    }

    pub fn eq_opt<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        self.cmp_opt(column, "=", value)
    }

    /// Case-insensitive substring match; `%`, `_` and `\` in `needle` match literally.
    pub fn contains(mut self, column: &'static str, needle: &str) -> Self {
        let escaped = needle
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        self.params.push(Value::Text(format!("%{}%", escaped)));
        self.predicates.push(format!(
            "{} LIKE ?{} ESCAPE '\\'",
            column,
            self.params.len()
        ));
        self
    }

    /// ` WHERE a AND b ...`, or an empty string when there are no predicates.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicates.join(" AND "))
        }
    }

    /// Number of bound parameters; the next placeholder is `?{len + 1}`.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters followed by `extra`, in placeholder order.
    pub fn params_with<'a>(&'a self, extra: &'a [&'a dyn ToSql]) -> Vec<&'a dyn ToSql> {
        self.params
            .iter()
            .map(|v| v as &dyn ToSql)
            .chain(extra.iter().copied())
            .collect()
    }

    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.params_with(&[])
    }
}
