// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{SeriesPoint, aggregate};
use crate::models::{FilterMode, FilterSelection};
use crate::store::{BlobStore, RecordCollection, RecordStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

/// The filter chosen on the command line. The parameter comes from the
/// flag belonging to the selected mode; the others are ignored.
pub fn selection_from(sub: &clap::ArgMatches) -> Result<FilterSelection> {
    let mode: FilterMode = sub
        .get_one::<String>("filter")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default();
    let param_flag = match mode {
        FilterMode::All => None,
        FilterMode::Month => Some("month"),
        FilterMode::Week => Some("week-start"),
        FilterMode::Day => Some("day"),
    };
    let param = param_flag.and_then(|f| sub.get_one::<String>(f));
    FilterSelection::from_parts(mode, param.map(String::as_str))
}

/// What the pie and line charts are drawn from.
#[derive(Debug, Serialize)]
pub struct ChartData {
    pub filter: String,
    pub total: f64,
    pub categories: Vec<SeriesPoint>,
    pub days: Vec<SeriesPoint>,
}

pub fn chart_data(records: &RecordCollection, selection: &FilterSelection) -> ChartData {
    let result = aggregate(records, selection);
    ChartData {
        filter: selection.describe(),
        total: result.grand_total,
        categories: result.pie_series(),
        days: result.line_series(),
    }
}

pub fn report<S: BlobStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let selection = selection_from(sub)?;
    let records = store.load()?;
    let data = chart_data(&records, &selection);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let tables = report_rows(&data);
    println!("{}", tables.total_line);
    println!(
        "{}",
        pretty_table(&["Category", "Spent", "Share"], tables.categories)
    );
    println!("{}", pretty_table(&["Date", "Spent"], tables.days));
    Ok(())
}

/// Display text for the analytics view, amounts to two decimals.
#[derive(Debug)]
pub struct ReportRows {
    pub total_line: String,
    pub categories: Vec<Vec<String>>,
    pub days: Vec<Vec<String>>,
}

pub fn report_rows(data: &ChartData) -> ReportRows {
    ReportRows {
        total_line: format!("Total Spending ({}): {}", data.filter, fmt_money(data.total)),
        categories: data
            .categories
            .iter()
            .map(|p| vec![p.label.clone(), fmt_money(p.amount), share(p.amount, data.total)])
            .collect(),
        days: data
            .days
            .iter()
            .map(|p| vec![p.label.clone(), fmt_money(p.amount)])
            .collect(),
    }
}

fn share(part: f64, total: f64) -> String {
    if total == 0.0 {
        return "-".to_string();
    }
    format!("{:.1}%", part / total * 100.0)
}
