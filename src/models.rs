// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{parse_date, parse_month};

/// The fixed set of spending categories offered by the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Groceries,
    Utilities,
    Transportation,
    Entertainment,
    #[serde(rename = "Dining Out")]
    DiningOut,
    Health,
    Shopping,
    Travel,
    Education,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Groceries,
        Category::Utilities,
        Category::Transportation,
        Category::Entertainment,
        Category::DiningOut,
        Category::Health,
        Category::Shopping,
        Category::Travel,
        Category::Education,
        Category::Miscellaneous,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Groceries => "Groceries",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::DiningOut => "Dining Out",
            Category::Health => "Health",
            Category::Shopping => "Shopping",
            Category::Travel => "Travel",
            Category::Education => "Education",
            Category::Miscellaneous => "Miscellaneous",
        }
    }

    /// Exact, case-sensitive lookup by display label.
    pub fn from_label(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged expense, exactly as persisted.
///
/// `category` is kept as the stored label rather than a [`Category`] so that
/// records written by other tools survive a load/persist cycle untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingRecord {
    pub date: String, // YYYY-MM-DD
    pub category: String,
    pub amount: f64,
}

impl SpendingRecord {
    pub fn new(date: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount,
        }
    }

    pub fn known_category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }
}

/// Raw journal form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct RecordInput {
    pub date: String,
    pub category: String,
    pub amount: String,
}

impl RecordInput {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    Month,
    Week,
    Day,
}

impl FromStr for FilterMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "month" => Ok(FilterMode::Month),
            "week" => Ok(FilterMode::Week),
            "day" => Ok(FilterMode::Day),
            other => Err(anyhow!(
                "Unknown filter '{}' (use all|month|week|day)",
                other
            )),
        }
    }
}

/// Last day of the seven-day window opening on `start`.
pub fn week_end(start: NaiveDate) -> Option<NaiveDate> {
    start.checked_add_days(chrono::Days::new(6))
}

/// Which records take part in aggregation. A mode without its parameter
/// selects everything, same as [`FilterSelection::All`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSelection {
    #[default]
    All,
    Month(Option<String>), // YYYY-MM
    Week(Option<NaiveDate>),
    Day(Option<String>), // YYYY-MM-DD
}

impl FilterSelection {
    /// Build a selection from a mode and its raw parameter. Blank parameters
    /// count as absent; present ones must be well formed.
    pub fn from_parts(mode: FilterMode, param: Option<&str>) -> Result<Self> {
        let param = param.map(str::trim).filter(|s| !s.is_empty());
        let sel = match mode {
            FilterMode::All => FilterSelection::All,
            FilterMode::Month => FilterSelection::Month(param.map(parse_month).transpose()?),
            FilterMode::Week => FilterSelection::Week(param.map(parse_date).transpose()?),
            FilterMode::Day => FilterSelection::Day(
                param
                    .map(|d| parse_date(d).map(|_| d.to_string()))
                    .transpose()?,
            ),
        };
        Ok(sel)
    }

    pub fn describe(&self) -> String {
        match self {
            FilterSelection::Month(Some(m)) => format!("month {}", m),
            FilterSelection::Week(Some(start)) => match week_end(*start) {
                Some(end) => format!("week {} .. {}", start, end),
                None => format!("week from {}", start),
            },
            FilterSelection::Day(Some(d)) => format!("day {}", d),
            _ => "all time".to_string(),
        }
    }
}
