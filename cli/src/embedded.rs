// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Embedded mode execution
//!
//! Builds the directory services in-process from configuration. With the
//! in-memory backend every invocation starts from the configured seed.

use anyhow::{Context, Result};
use std::path::PathBuf;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::config::DirectoryConfig;

pub struct EmbeddedDirectory {
    config: DirectoryConfig,
    service: DirectoryService,
}

impl EmbeddedDirectory {
    pub async fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = DirectoryConfig::load_or_default(config_path)
            .context("Failed to load configuration")?;

        let service = DirectoryService::from_config(&config)
            .await
            .context("Failed to initialize directory services")?;

        Ok(Self { config, service })
    }

    pub fn service(&self) -> &DirectoryService {
        &self.service
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }
}
