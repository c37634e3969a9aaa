// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SpendingRecord;
use crate::store::{BlobStore, RecordStore};
use crate::utils::{parse_date, pretty_table};
use anyhow::Result;

pub fn handle<S: BlobStore>(store: &RecordStore<S>) -> Result<()> {
    let rows = issues(store)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Everything odd about the stored journal, as (issue, detail) rows.
pub fn issues<S: BlobStore>(store: &RecordStore<S>) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) A blob that does not parse loads as an empty journal
    if let Some(blob) = store.raw()? {
        if let Err(e) = serde_json::from_str::<Vec<SpendingRecord>>(&blob) {
            rows.push(vec!["unreadable_journal".into(), e.to_string()]);
            return Ok(rows);
        }
    }

    // 2) Per-record checks, numbered from 1 in journal order
    for (i, r) in store.load()?.iter().enumerate() {
        let n = i + 1;
        if r.known_category().is_none() {
            rows.push(vec![
                "unknown_category".into(),
                format!("#{} {} '{}'", n, r.date, r.category),
            ]);
        }
        if parse_date(&r.date).is_err() {
            rows.push(vec!["invalid_date".into(), format!("#{} '{}'", n, r.date)]);
        }
        if r.amount < 0.0 {
            rows.push(vec![
                "negative_amount".into(),
                format!("#{} {} {}", n, r.date, r.amount),
            ]);
        }
    }
    Ok(rows)
}
