// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # orgdir CLI
//!
//! The `orgdir` binary runs directory operations against the configured
//! store. With the in-memory backend each invocation starts from the
//! configured seed; with PostgreSQL changes persist.
//!
//! ## Commands
//!
//! - `orgdir employee add|delete|show` - Admission and cascade deletion
//! - `orgdir department delete` - Always refused
//! - `orgdir hierarchy|rankings|projection|archive` - Read-only reports
//! - `orgdir schema ...` - Structural commands behind the schema guard
//! - `orgdir config show|validate` - Configuration management
//! - `orgdir seed FILE` - Load a YAML seed into PostgreSQL

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use orgdir_cli::commands::{self, ConfigCommand, DepartmentCommand, EmployeeCommand, SchemaArgs};
use orgdir_cli::embedded::EmbeddedDirectory;
use orgdir_cli::output::{self, Output};

/// orgdir - employee directory integrity and hierarchy engine
#[derive(Parser)]
#[command(name = "orgdir")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "ORGDIR_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "ORGDIR_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit JSON instead of tables (logs switch to JSON as well)
    #[arg(long, global = true)]
    json: bool,

    /// Print directory events raised by the command to stderr
    #[arg(long, global = true)]
    events: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Employee admission, deletion and lookup
    #[command(name = "employee")]
    Employee {
        #[command(subcommand)]
        command: EmployeeCommand,
    },

    /// Department operations
    #[command(name = "department")]
    Department {
        #[command(subcommand)]
        command: DepartmentCommand,
    },

    /// Chain of command from an employee up to the root
    #[command(name = "hierarchy")]
    Hierarchy {
        #[arg(value_name = "EMPLOYEE_ID")]
        id: i64,
    },

    /// Salary rank and contribution within each department
    #[command(name = "rankings")]
    Rankings,

    /// Merged employee, manager, department and salary view
    #[command(name = "projection")]
    Projection,

    /// Archived employees
    #[command(name = "archive")]
    Archive,

    /// Structural commands
    #[command(name = "schema")]
    Schema(SchemaArgs),

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Load a YAML seed into the PostgreSQL store
    #[command(name = "seed")]
    Seed {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.json)?;

    let output = Output::new(cli.json);
    if let Err(err) = run(cli, output).await {
        output::report_error(&err, output);
        std::process::exit(output::exit_code(&err));
    }
    Ok(())
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let command = match cli.command {
        Some(command) => command,
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    };

    match command {
        Commands::Config { command } => return commands::config::handle_command(command, cli.config, output),
        Commands::Seed { file } => return commands::seed::handle_command(&file, cli.config).await,
        _ => {}
    }

    let directory = EmbeddedDirectory::new(cli.config).await?;
    debug!(email_domain = %directory.config().email_domain, "Directory ready");
    let service = directory.service();
    let mut events = service.subscribe();

    let result = match command {
        Commands::Employee { command } => commands::employee::handle_command(command, service, output).await,
        Commands::Department { command } => commands::department::handle_command(command, service, output),
        Commands::Hierarchy { id } => commands::report::hierarchy(id, service, output).await,
        Commands::Rankings => commands::report::rankings(service, output).await,
        Commands::Projection => commands::report::projection(service, output).await,
        Commands::Archive => commands::report::archive(service, output).await,
        Commands::Schema(args) => commands::schema::handle_command(args, service, output).await,
        Commands::Config { .. } | Commands::Seed { .. } => Ok(()),
    };

    if cli.events {
        for event in events.drain() {
            eprintln!("{}", serde_json::to_string(&event)?.dimmed());
        }
    }

    result
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_employee_add() {
        let cli = Cli::try_parse_from([
            "orgdir",
            "employee",
            "add",
            "--first-name",
            "Sanele",
            "--last-name",
            "Zondo",
            "--phone",
            "555-567-8901",
            "--job-title",
            "Intern",
            "--department",
            "3",
            "--manager",
            "2",
            "--salary",
            "35000",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Employee {
                command: EmployeeCommand::Add { department, manager, salary, .. },
            }) => {
                assert_eq!(department, 3);
                assert_eq!(manager, Some(2));
                assert_eq!(salary.to_string(), "35000");
            }
            _ => panic!("expected employee add"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["orgdir", "rankings", "--json", "--events"]).unwrap();
        assert!(cli.json);
        assert!(cli.events);
        assert!(matches!(cli.command, Some(Commands::Rankings)));
    }

    #[test]
    fn test_schema_drop_table_parses() {
        let cli = Cli::try_parse_from(["orgdir", "schema", "drop-table", "employees"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Schema(_))));
    }
}
