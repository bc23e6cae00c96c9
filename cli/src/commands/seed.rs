// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Load a YAML seed into the PostgreSQL store.
//!
//! The in-memory backend reads `seed_path` at startup instead.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use orgdir_core::domain::config::DirectoryConfig;
use orgdir_core::domain::repository::StorageBackend;
use orgdir_core::infrastructure::db::Database;
use orgdir_core::infrastructure::repositories::postgres_directory::PostgresDirectoryStore;
use orgdir_core::infrastructure::seed::DirectorySeed;

pub async fn handle_command(file: &Path, config_override: Option<PathBuf>) -> Result<()> {
    let config = DirectoryConfig::load_or_default(config_override)
        .context("Failed to load configuration")?;

    let pg = match config.storage_backend() {
        StorageBackend::PostgreSQL(pg) => pg,
        StorageBackend::InMemory => {
            bail!("seed requires the postgres backend; set seed_path for in_memory instead")
        }
    };

    let records = DirectorySeed::from_yaml_file(file)
        .and_then(|seed| seed.into_records(&config.email_domain))
        .with_context(|| format!("Failed to read seed {:?}", file))?;

    let database = Database::from_config(&pg).await?;
    database.migrate().await?;
    let store = PostgresDirectoryStore::new(database.get_pool().clone());
    store
        .load_seed(&records)
        .await
        .context("Failed to write seed records")?;

    info!(
        departments = records.departments.len(),
        employees = records.employees.len(),
        "Seed loaded"
    );
    println!(
        "{}",
        format!(
            "✓ Seeded {} departments and {} employees",
            records.departments.len(),
            records.employees.len()
        )
        .green()
    );
    Ok(())
}
