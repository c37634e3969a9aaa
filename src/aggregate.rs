// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::{FilterSelection, SpendingRecord, week_end};

/// Totals over the records chosen by a [`FilterSelection`].
///
/// Buckets only exist for categories and days that occur at least once.
/// Sums are unrounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub category_totals: HashMap<String, f64>,
    pub day_totals: BTreeMap<String, f64>,
    pub grand_total: f64,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub amount: f64,
}

impl AggregationResult {
    /// Category slices, largest first (ties by label).
    pub fn pie_series(&self) -> Vec<SeriesPoint> {
        let mut items: Vec<SeriesPoint> = self
            .category_totals
            .iter()
            .map(|(label, amount)| SeriesPoint {
                label: label.clone(),
                amount: *amount,
            })
            .collect();
        items.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.label.cmp(&b.label))
        });
        items
    }

    /// Day points in ascending date order.
    pub fn line_series(&self) -> Vec<SeriesPoint> {
        self.day_totals
            .iter()
            .map(|(label, amount)| SeriesPoint {
                label: label.clone(),
                amount: *amount,
            })
            .collect()
    }
}

/// Whether `record` is selected by `filter`.
pub fn matches(filter: &FilterSelection, record: &SpendingRecord) -> bool {
    match filter {
        FilterSelection::All
        | FilterSelection::Month(None)
        | FilterSelection::Week(None)
        | FilterSelection::Day(None) => true,
        FilterSelection::Month(Some(m)) if m.is_empty() => true,
        FilterSelection::Day(Some(d)) if d.is_empty() => true,
        FilterSelection::Month(Some(m)) => record.date.starts_with(m.as_str()),
        FilterSelection::Day(Some(d)) => record.date == *d,
        FilterSelection::Week(Some(start)) => {
            let Ok(date) = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d") else {
                return false;
            };
            match week_end(*start) {
                Some(end) => *start <= date && date <= end,
                None => *start <= date,
            }
        }
    }
}

/// The subsequence of `records` selected by `filter`, in input order.
pub fn filter<'a, I>(records: I, filter: &FilterSelection) -> Vec<&'a SpendingRecord>
where
    I: IntoIterator<Item = &'a SpendingRecord>,
{
    records
        .into_iter()
        .filter(|r| matches(filter, r))
        .collect()
}

pub fn aggregate<'a, I>(records: I, selection: &FilterSelection) -> AggregationResult
where
    I: IntoIterator<Item = &'a SpendingRecord>,
{
    let mut out = AggregationResult::default();
    for r in filter(records, selection) {
        *out.category_totals.entry(r.category.clone()).or_insert(0.0) += r.amount;
        *out.day_totals.entry(r.date.clone()).or_insert(0.0) += r.amount;
        out.grand_total += r.amount;
        out.record_count += 1;
    }
    debug!(
        filter = %selection.describe(),
        records = out.record_count,
        total = out.grand_total,
        "aggregated"
    );
    out
}
