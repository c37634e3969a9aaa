// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::analytics::{chart_data, selection_from};
use crate::store::{BlobStore, RecordStore};
use anyhow::{Context, Result, bail};
use tracing::info;

pub fn handle<S: BlobStore>(store: &RecordStore<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("records", sub)) => export_records(store, sub),
        Some(("chart", sub)) => export_chart(store, sub),
        _ => Ok(()),
    }
}

fn format_and_out(sub: &clap::ArgMatches) -> Result<(String, String)> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let out = sub
        .get_one::<String>("out")
        .context("--out is required")?
        .trim()
        .to_string();
    Ok((fmt, out))
}

fn export_records<S: BlobStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = format_and_out(sub)?;
    let records = store.load()?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["date", "category", "amount"])?;
            for r in &records {
                let amount = r.amount.to_string();
                wtr.write_record([r.date.as_str(), r.category.as_str(), amount.as_str()])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(&out, serde_json::to_string_pretty(&records)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    info!(records = records.len(), out = %out, "records exported");
    println!("Exported {} records to {}", records.len(), out);
    Ok(())
}

fn export_chart<S: BlobStore>(store: &RecordStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = format_and_out(sub)?;
    let selection = selection_from(sub)?;
    let records = store.load()?;
    let data = chart_data(&records, &selection);
    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["series", "label", "amount"])?;
            for p in &data.categories {
                let amount = p.amount.to_string();
                wtr.write_record(["category", p.label.as_str(), amount.as_str()])?;
            }
            for p in &data.days {
                let amount = p.amount.to_string();
                wtr.write_record(["day", p.label.as_str(), amount.as_str()])?;
            }
            let total = data.total.to_string();
            wtr.write_record(["total", "", total.as_str()])?;
            wtr.flush()?;
        }
        _ => {
            std::fs::write(&out, serde_json::to_string_pretty(&data)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    info!(filter = %data.filter, out = %out, "chart data exported");
    println!("Exported chart data ({}) to {}", data.filter, out);
    Ok(())
}
