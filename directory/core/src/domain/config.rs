// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Directory Configuration
//
// YAML configuration for the directory engine:
// - Storage backend selection (in-memory or PostgreSQL)
// - Email domain used when deriving contact addresses
// - Hierarchy depth bound
// - Event bus capacity and optional seed file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::hierarchy::DEFAULT_MAX_DEPTH;
use crate::domain::repository::{PostgresConfig, StorageBackend};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    /// Domain appended to `first.last@`
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    #[serde(default)]
    pub events: EventsConfig,

    /// Optional YAML seed loaded into the in-memory store at startup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    InMemory,
    Postgres {
        connection_string: String,
        #[serde(default = "default_max_connections")]
        max_connections: u32,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::InMemory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_event_capacity")]
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: default_event_capacity() }
    }
}

/// Upper bound for `hierarchy.max_depth`; the PostgreSQL ascent binds it as `INT4`.
pub const MAX_HIERARCHY_DEPTH: usize = 100_000;

fn default_email_domain() -> String {
    "company.com".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_event_capacity() -> usize {
    1000
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            email_domain: default_email_domain(),
            hierarchy: HierarchyConfig::default(),
            events: EventsConfig::default(),
            seed_path: None,
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Parse configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Discover configuration file using precedence order
    /// 1. ORGDIR_CONFIG_PATH environment variable
    /// 2. ./orgdir-config.yaml (working directory)
    /// 3. ~/.orgdir/config.yaml (user home)
    /// 4. /etc/orgdir/config.yaml (system)
    pub fn discover_config() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ORGDIR_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./orgdir-config.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".orgdir").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        let system_config = PathBuf::from("/etc/orgdir/config.yaml");
        if system_config.exists() {
            return Some(system_config);
        }

        None
    }

    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit path must load, no fallback
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            config.validate()?;
            return Ok(config);
        }

        let mut config = if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            Self::from_yaml_file(config_path)?
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ORGDIR_DATABASE_URL") {
            tracing::info!("Environment override: ORGDIR_DATABASE_URL");
            let max_connections = match &self.storage {
                StorageConfig::Postgres { max_connections, .. } => *max_connections,
                StorageConfig::InMemory => default_max_connections(),
            };
            self.storage = StorageConfig::Postgres {
                connection_string: url,
                max_connections,
            };
        }

        if let Ok(domain) = std::env::var("ORGDIR_EMAIL_DOMAIN") {
            tracing::info!("Environment override: ORGDIR_EMAIL_DOMAIN={}", domain);
            self.email_domain = domain;
        }

        if let Ok(val) = std::env::var("ORGDIR_HIERARCHY_MAX_DEPTH") {
            match val.parse::<usize>() {
                Ok(depth) => {
                    tracing::info!("Environment override: ORGDIR_HIERARCHY_MAX_DEPTH={}", depth);
                    self.hierarchy.max_depth = depth;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for ORGDIR_HIERARCHY_MAX_DEPTH: '{}'. Expected a positive integer. Ignoring.",
                        val
                    );
                }
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.email_domain.trim().is_empty() {
            anyhow::bail!("email_domain cannot be empty");
        }
        if self.email_domain.contains('@') {
            anyhow::bail!("email_domain must not contain '@': {}", self.email_domain);
        }
        if self.hierarchy.max_depth == 0 {
            anyhow::bail!("hierarchy.max_depth must be at least 1");
        }
        if self.hierarchy.max_depth > MAX_HIERARCHY_DEPTH {
            anyhow::bail!(
                "hierarchy.max_depth must not exceed {}, got {}",
                MAX_HIERARCHY_DEPTH,
                self.hierarchy.max_depth
            );
        }
        if self.events.capacity == 0 {
            anyhow::bail!("events.capacity must be at least 1");
        }
        if let StorageConfig::Postgres { connection_string, max_connections } = &self.storage {
            if connection_string.is_empty() {
                anyhow::bail!("storage.connection_string cannot be empty");
            }
            if *max_connections == 0 {
                anyhow::bail!("storage.max_connections must be at least 1");
            }
        }
        Ok(())
    }

    pub fn storage_backend(&self) -> StorageBackend {
        match &self.storage {
            StorageConfig::InMemory => StorageBackend::InMemory,
            StorageConfig::Postgres { connection_string, max_connections } => {
                StorageBackend::PostgreSQL(PostgresConfig {
                    connection_string: connection_string.clone(),
                    max_connections: *max_connections,
                })
            }
        }
    }
}
