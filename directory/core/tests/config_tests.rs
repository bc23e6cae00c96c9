// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::io::Write;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::config::{DirectoryConfig, StorageConfig, MAX_HIERARCHY_DEPTH};
use orgdir_core::domain::repository::StorageBackend;

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
storage:
  backend: postgres
  connection_string: postgres://orgdir@localhost/orgdir
email_domain: example.org
hierarchy:
  max_depth: 12
"#
    )
    .unwrap();

    let config = DirectoryConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.email_domain, "example.org");
    assert_eq!(config.hierarchy.max_depth, 12);
    assert!(matches!(config.storage, StorageConfig::Postgres { .. }));
    match config.storage_backend() {
        StorageBackend::PostgreSQL(pg) => {
            assert_eq!(pg.connection_string, "postgres://orgdir@localhost/orgdir");
            assert_eq!(pg.max_connections, 5);
        }
        other => panic!("unexpected backend {:?}", other),
    }
    config.validate().unwrap();
}

#[test]
fn test_explicit_path_wins_over_discovery() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "email_domain: explicit.test").unwrap();

    let config = DirectoryConfig::load_or_default(Some(file.path().to_path_buf())).unwrap();

    assert_eq!(config.email_domain, "explicit.test");
}

#[test]
fn test_config_yaml_survives_rewrite() {
    let config = DirectoryConfig::default();
    let yaml = config.to_yaml_string().unwrap();
    let parsed = DirectoryConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(parsed.email_domain, config.email_domain);
    assert_eq!(parsed.hierarchy.max_depth, config.hierarchy.max_depth);
}

#[tokio::test]
async fn test_service_refuses_invalid_config() {
    let config = DirectoryConfig::from_yaml_str("events:\n  capacity: 0\n").unwrap();

    let err = DirectoryService::from_config(&config).await.err().unwrap();

    assert!(err.to_string().contains("events.capacity"));
}

#[tokio::test]
async fn test_service_refuses_depth_beyond_cap() {
    let mut config = DirectoryConfig::default();
    config.hierarchy.max_depth = MAX_HIERARCHY_DEPTH + 1;

    assert!(DirectoryService::from_config(&config).await.is_err());
}
