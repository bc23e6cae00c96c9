// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use orgdir_core::domain::config::{DirectoryConfig, StorageConfig};

use crate::output::{mask_connection_string, Output};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

pub fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>, output: Output) -> Result<()> {
    match command {
        ConfigCommand::Show { paths } => show(config_override, paths, output),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool, output: Output) -> Result<()> {
    let mut config = DirectoryConfig::load_or_default(config_override.clone())
        .context("Failed to load configuration")?;
    if let StorageConfig::Postgres { connection_string, .. } = &mut config.storage {
        *connection_string = mask_connection_string(connection_string);
    }

    if output.is_json() {
        return output.emit(&config, |_| {});
    }

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        if let Some(path) = &config_override {
            println!("  1. --config flag: {}", path.display());
        } else {
            println!("  1. --config flag: {}", "(not set)".dimmed());
        }
        println!(
            "  2. ORGDIR_CONFIG_PATH: {}",
            std::env::var("ORGDIR_CONFIG_PATH")
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./orgdir-config.yaml");
        println!("  4. ~/.orgdir/config.yaml");
        println!("  5. /etc/orgdir/config.yaml");
        println!();
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Storage:".bold());
    match &config.storage {
        StorageConfig::InMemory => {
            println!("  Backend: in_memory");
            match &config.seed_path {
                Some(path) => println!("  Seed: {}", path.display()),
                None => println!("  Seed: {}", "(none, empty directory)".dimmed()),
            }
        }
        StorageConfig::Postgres { connection_string, max_connections } => {
            println!("  Backend: postgres");
            println!("  Connection: {}", connection_string);
            println!("  Max connections: {}", max_connections);
        }
    }
    println!();

    println!("{}", "Directory:".bold());
    println!("  Email domain: {}", config.email_domain);
    println!("  Hierarchy max depth: {}", config.hierarchy.max_depth);
    println!("  Event buffer: {}", config.events.capacity);
    println!();

    Ok(())
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = DirectoryConfig::load_or_default(config_path)
        .context("Failed to load configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    if let Some(seed) = &config.seed_path {
        if !seed.exists() {
            anyhow::bail!("seed_path {:?} does not exist", seed);
        }
    }

    println!("{}", "✓ Configuration is valid".green());

    Ok(())
}
