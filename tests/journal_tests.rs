// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde_json::json;
use spendtrack::commands::{analytics, journal};
use spendtrack::models::{FilterSelection, SpendingRecord};
use spendtrack::store::{CategoryPolicy, MemoryBlobStore, RecordCollection, RecordStore};
use spendtrack::{cli, db};

fn run_add(store: &RecordStore<&MemoryBlobStore>, args: &[&str]) -> bool {
    let mut argv = vec!["spendtrack", "add"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("add", add_m)) = matches.subcommand() {
        journal::add(store, add_m).unwrap().is_some()
    } else {
        panic!("no add subcommand");
    }
}

#[test]
fn add_then_list_in_insertion_order() {
    let mem = MemoryBlobStore::new();
    let store = RecordStore::with_defaults(&mem);
    assert!(run_add(
        &store,
        &["--date", "2024-02-01", "--category", "Travel", "--amount", "20"]
    ));
    assert!(run_add(&store, &["--date", "2024-01-01", "--amount", "7.5"]));

    let rows = journal::query_rows(&store.load().unwrap());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2024-02-01");
    assert_eq!(rows[0].amount, "20.00");
    // Category defaults to Groceries like the journal form
    assert_eq!(rows[1].category, "Groceries");
    assert_eq!(rows[1].amount, "7.50");
}

#[test]
fn add_with_bad_amount_is_silently_ignored() {
    let mem = MemoryBlobStore::new();
    let store = RecordStore::with_defaults(&mem);
    assert!(!run_add(&store, &["--date", "2024-02-01", "--amount", "lots"]));
    assert!(!run_add(
        &store,
        &["--date", "2024-02-01", "--category", "Pets", "--amount", "3"]
    ));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn report_parameter_comes_from_the_selected_mode() {
    let matches = cli::build_cli().get_matches_from([
        "spendtrack",
        "report",
        "--filter",
        "month",
        "--month",
        "2024-01",
        "--day",
        "2024-05-05",
    ]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    assert_eq!(
        analytics::selection_from(report_m).unwrap(),
        FilterSelection::Month(Some("2024-01".into()))
    );
}

#[test]
fn report_mode_without_parameter_falls_back_to_all_records() {
    let conn = db::open_in_memory().unwrap();
    let store = RecordStore::with_defaults(&conn);
    let mut records = store.load().unwrap();
    for (date, amount) in [("2024-01-01", "1"), ("2024-02-01", "2")] {
        let input = spendtrack::models::RecordInput::new(date, "Health", amount);
        assert!(store.add(&mut records, &input).unwrap());
    }

    let matches =
        cli::build_cli().get_matches_from(["spendtrack", "report", "--filter", "week"]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let selection = analytics::selection_from(report_m).unwrap();
    assert_eq!(selection, FilterSelection::Week(None));
    let data = analytics::chart_data(&store.load().unwrap(), &selection);
    assert_eq!(data.total, 3.0);
    assert_eq!(data.days.len(), 2);
}

#[test]
fn add_reports_the_record_as_stored() {
    let mem = MemoryBlobStore::new();
    let store = RecordStore::new(&mem, "records", CategoryPolicy::Miscellaneous);
    let matches = cli::build_cli().get_matches_from([
        "spendtrack",
        "add",
        "--date",
        "2024-01-01",
        "--category",
        "Pets",
        "--amount",
        "1e1",
    ]);
    let Some(("add", add_m)) = matches.subcommand() else {
        panic!("no add subcommand");
    };
    let stored = journal::add(&store, add_m).unwrap().unwrap();
    assert_eq!(stored, SpendingRecord::new("2024-01-01", "Miscellaneous", 10.0));
    assert_eq!(
        journal::confirmation(&stored),
        "Recorded 10.00 on 2024-01-01 (Miscellaneous)"
    );
    assert_eq!(store.load().unwrap().records(), &[stored]);
}

#[test]
fn negative_amount_flag_is_refused_by_the_parser() {
    let res = cli::build_cli().try_get_matches_from([
        "spendtrack",
        "add",
        "--date",
        "2024-01-01",
        "--amount",
        "-5",
    ]);
    assert!(res.is_err());
}

#[test]
fn export_without_target_is_a_usage_error() {
    assert!(
        cli::build_cli()
            .try_get_matches_from(["spendtrack", "export"])
            .is_err()
    );
}

fn report_records() -> RecordCollection {
    RecordCollection::from(vec![
        SpendingRecord::new("2024-01-02", "Groceries", 30.0),
        SpendingRecord::new("2024-01-01", "Travel", 10.0),
        SpendingRecord::new("2024-01-02", "Travel", 0.13),
    ])
}

#[test]
fn report_rows_format_totals_and_shares() {
    let data = analytics::chart_data(
        &report_records(),
        &FilterSelection::Month(Some("2024-01".into())),
    );
    let rows = analytics::report_rows(&data);
    assert_eq!(rows.total_line, "Total Spending (month 2024-01): 40.13");
    assert_eq!(
        rows.categories,
        vec![
            vec!["Groceries", "30.00", "74.8%"],
            vec!["Travel", "10.13", "25.2%"],
        ]
    );
    assert_eq!(
        rows.days,
        vec![vec!["2024-01-01", "10.00"], vec!["2024-01-02", "30.13"]]
    );
}

#[test]
fn report_rows_with_zero_total_show_no_share() {
    let records = RecordCollection::from(vec![SpendingRecord::new("2024-03-03", "Health", 0.0)]);
    let rows = analytics::report_rows(&analytics::chart_data(&records, &FilterSelection::All));
    assert_eq!(rows.total_line, "Total Spending (all time): 0.00");
    assert_eq!(rows.categories, vec![vec!["Health", "0.00", "-"]]);

    let empty = analytics::report_rows(&analytics::chart_data(
        &RecordCollection::new(),
        &FilterSelection::All,
    ));
    assert!(empty.categories.is_empty());
    assert!(empty.days.is_empty());
}

#[test]
fn list_rows_and_json_shape() {
    let records = report_records();
    let rows = journal::query_rows(&records);
    assert_eq!(rows[2].amount, "0.13");
    assert_eq!(
        serde_json::to_value(&records).unwrap(),
        json!([
            {"date": "2024-01-02", "category": "Groceries", "amount": 30.0},
            {"date": "2024-01-01", "category": "Travel", "amount": 10.0},
            {"date": "2024-01-02", "category": "Travel", "amount": 0.13}
        ])
    );
    assert_eq!(
        serde_json::to_value(journal::query_rows(&records)).unwrap()[0],
        json!({"date": "2024-01-02", "category": "Groceries", "amount": "30.00"})
    );
}

#[test]
fn report_json_shape() {
    let data = analytics::chart_data(&report_records(), &FilterSelection::Day(Some("2024-01-01".into())));
    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({
            "filter": "day 2024-01-01",
            "total": 10.0,
            "categories": [{"label": "Travel", "amount": 10.0}],
            "days": [{"label": "2024-01-01", "amount": 10.0}]
        })
    );
}

