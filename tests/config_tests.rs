// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendtrack::config::{Config, ConfigError};
use spendtrack::store::CategoryPolicy;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[test]
fn missing_file_gives_defaults() {
    let cfg = Config::load(Path::new("/definitely/not/here/config.toml")).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.storage_key, "records");
    assert_eq!(cfg.category_policy, CategoryPolicy::Reject);
}

#[test]
fn parses_all_fields() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
db_path = "/tmp/spend.sqlite"
storage_key = "household"
category_policy = "pass-through"
log_level = "spendtrack=debug"
"#
    )
    .unwrap();
    file.flush().unwrap();

    let cfg = Config::load(file.path()).unwrap();
    assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/spend.sqlite")));
    assert_eq!(cfg.storage_key, "household");
    assert_eq!(cfg.category_policy, CategoryPolicy::PassThrough);
    assert_eq!(cfg.log_level.as_deref(), Some("spendtrack=debug"));
}

#[test]
fn partial_file_keeps_other_defaults() {
    let cfg = Config::from_toml(Path::new("c.toml"), "category_policy = \"miscellaneous\"").unwrap();
    assert_eq!(cfg.category_policy, CategoryPolicy::Miscellaneous);
    assert_eq!(cfg.storage_key, "records");
}

#[test]
fn malformed_file_is_an_error() {
    let err = Config::from_toml(Path::new("c.toml"), "category_policy = \"sometimes\"")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(Config::from_toml(Path::new("c.toml"), "colour = \"red\"").is_err());
}
