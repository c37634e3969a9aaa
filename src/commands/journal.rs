// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{RecordInput, SpendingRecord};
use crate::store::{BlobStore, RecordCollection, RecordStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn input_from(sub: &clap::ArgMatches) -> RecordInput {
    let get = |name: &str| sub.get_one::<String>(name).cloned().unwrap_or_default();
    RecordInput::new(get("date"), get("category"), get("amount"))
}

/// Journal "Add". Returns the record as stored; invalid input adds nothing
/// and is not an error.
pub fn add<S: BlobStore>(
    store: &RecordStore<S>,
    sub: &clap::ArgMatches,
) -> Result<Option<SpendingRecord>> {
    let input = input_from(sub);
    let mut records = store.load()?;
    let stored = if store.add(&mut records, &input)? {
        records.records().last().cloned()
    } else {
        None
    };
    match &stored {
        Some(r) => println!("{}", confirmation(r)),
        None => println!("Nothing added"),
    }
    Ok(stored)
}

pub fn confirmation(r: &SpendingRecord) -> String {
    format!("Recorded {} on {} ({})", fmt_money(r.amount), r.date, r.category)
}

pub fn list<S: BlobStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = store.load()?;
    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let data = query_rows(&records);
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| vec![r.date, r.category, r.amount])
            .collect();
        println!("{}", pretty_table(&["Date", "Category", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct JournalRow {
    pub date: String,
    pub category: String,
    pub amount: String,
}

/// Display rows in insertion order, amounts to two decimals.
pub fn query_rows(records: &RecordCollection) -> Vec<JournalRow> {
    records
        .iter()
        .map(|r| JournalRow {
            date: r.date.clone(),
            category: r.category.clone(),
            amount: fmt_money(r.amount),
        })
        .collect()
}
