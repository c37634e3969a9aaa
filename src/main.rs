// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use spendtrack::config::Config;
use spendtrack::store::RecordStore;
use spendtrack::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config_path = match matches.get_one::<PathBuf>("config") {
        Some(p) => p.clone(),
        None => db::default_config_path()?,
    };
    let config = Config::load(&config_path)?;
    logging::init(config.log_level.as_deref(), matches.get_flag("verbose"));

    let db_override = matches
        .get_one::<PathBuf>("db")
        .or(config.db_path.as_ref())
        .cloned();
    let conn = db::open_or_init(db_override.as_deref())?;
    let store = RecordStore::new(&conn, config.storage_key.clone(), config.category_policy);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Store initialized at {}",
                db::db_path(db_override.as_deref())?.display()
            );
        }
        Some(("add", sub)) => {
            commands::journal::add(&store, sub)?;
        }
        Some(("list", sub)) => commands::journal::list(&store, sub)?,
        Some(("report", sub)) => commands::analytics::report(&store, sub)?,
        Some(("categories", _)) => commands::categories::handle()?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
