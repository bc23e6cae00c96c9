// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates the concrete `DirectoryStore` for the configured storage backend.
//! The domain layer only defines the contract; this is where the choice
//! between in-memory and PostgreSQL is made.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::config::DirectoryConfig;
use crate::domain::repository::{DirectoryStore, StorageBackend};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::postgres_directory::PostgresDirectoryStore;
use crate::infrastructure::repositories::InMemoryDirectoryStore;
use crate::infrastructure::seed::DirectorySeed;

/// Creates a DirectoryStore implementation based on the configured backend.
///
/// The in-memory store is populated from `seed_path` when one is set.
/// The PostgreSQL store runs migrations before it is handed out.
pub async fn create_directory_store(config: &DirectoryConfig) -> Result<Arc<dyn DirectoryStore>> {
    match config.storage_backend() {
        StorageBackend::InMemory => {
            let store = match &config.seed_path {
                Some(path) => {
                    let records = DirectorySeed::from_yaml_file(path)
                        .and_then(|seed| seed.into_records(&config.email_domain))
                        .with_context(|| format!("Failed to load seed {:?}", path))?;
                    info!(
                        employees = records.employees.len(),
                        departments = records.departments.len(),
                        "Seeded in-memory directory"
                    );
                    InMemoryDirectoryStore::from_records(records)
                }
                None => InMemoryDirectoryStore::new(),
            };
            Ok(Arc::new(store))
        }
        StorageBackend::PostgreSQL(pg) => {
            let database = Database::from_config(&pg).await?;
            database.migrate().await?;
            info!("Using PostgreSQL directory store");
            Ok(Arc::new(PostgresDirectoryStore::new(database.get_pool().clone())))
        }
    }
}
