// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};
use std::path::PathBuf;

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn filter_args() -> [Arg; 4] {
    [
        Arg::new("filter")
            .long("filter")
            .value_parser(["all", "month", "week", "day"])
            .default_value("all")
            .help("Time window to aggregate over"),
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .help("Month used by --filter month"),
        Arg::new("week-start")
            .long("week-start")
            .value_name("YYYY-MM-DD")
            .help("First day of the 7-day window used by --filter week"),
        Arg::new("day")
            .long("day")
            .value_name("YYYY-MM-DD")
            .help("Day used by --filter day"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendtrack")
        .version(crate_version!())
        .about("Log spending and review totals by category and day")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Store file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the store and print its location"))
        .subcommand(
            Command::new("add")
                .about("Add a spending record to the journal")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .value_name("YYYY-MM-DD"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .default_value("Groceries")
                        .help("One of the labels shown by `spendtrack categories`"),
                )
                .arg(
                    Arg::new("amount").long("amount").required(true),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("Show the journal")
                .args(json_args()),
        )
        .subcommand(
            Command::new("report")
                .about("Totals by category and by day for a time window")
                .args(filter_args())
                .args(json_args()),
        )
        .subcommand(Command::new("categories").about("List spending categories"))
        .subcommand(
            Command::new("export")
                .about("Write journal or chart data to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("records")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("chart")
                        .arg(Arg::new("format").long("format").default_value("json"))
                        .arg(Arg::new("out").long("out").required(true))
                        .args(filter_args()),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the stored journal for oddities"))
}
