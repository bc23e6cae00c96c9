// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Structural commands routed through the schema protection guard.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::policy::{ColumnDef, SchemaCommand};

use crate::output::Output;

#[derive(Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaSubcommand,
}

#[derive(Subcommand)]
pub enum SchemaSubcommand {
    /// Create a table
    CreateTable {
        table: String,
        /// Column as NAME:SQL_TYPE, repeatable
        #[arg(long = "column", value_name = "NAME:TYPE", required = true)]
        columns: Vec<String>,
    },
    /// Add a column to a table
    AddColumn {
        table: String,
        #[arg(value_name = "NAME:TYPE")]
        column: String,
    },
    /// Create an index
    CreateIndex {
        table: String,
        index: String,
        #[arg(long = "column", required = true)]
        columns: Vec<String>,
    },
    DropTable { table: String },
    Truncate { table: String },
    DropColumn { table: String, column: String },
    DropIndex { index: String },
}

#[derive(Debug, Serialize)]
struct AppliedSchemaCommand {
    applied: SchemaCommand,
    sql: String,
}

impl AppliedSchemaCommand {
    fn new(command: SchemaCommand) -> Self {
        Self {
            sql: command.to_sql(),
            applied: command,
        }
    }
}

pub async fn handle_command(args: SchemaArgs, service: &DirectoryService, output: Output) -> Result<()> {
    let command = to_schema_command(args.command)?;
    service.execute_schema_command(&command).await?;

    output.emit(&AppliedSchemaCommand::new(command), |outcome| {
        println!("{}", format!("✓ Applied to {}", outcome.applied.target()).green());
        println!("  {}", outcome.sql.dimmed());
    })
}

fn to_schema_command(sub: SchemaSubcommand) -> Result<SchemaCommand> {
    Ok(match sub {
        SchemaSubcommand::CreateTable { table, columns } => SchemaCommand::CreateTable {
            table,
            columns: columns.iter().map(|c| parse_column(c)).collect::<Result<_>>()?,
        },
        SchemaSubcommand::AddColumn { table, column } => SchemaCommand::AddColumn {
            table,
            column: parse_column(&column)?,
        },
        SchemaSubcommand::CreateIndex { table, index, columns } => {
            SchemaCommand::CreateIndex { table, index, columns }
        }
        SchemaSubcommand::DropTable { table } => SchemaCommand::DropTable { table },
        SchemaSubcommand::Truncate { table } => SchemaCommand::TruncateTable { table },
        SchemaSubcommand::DropColumn { table, column } => SchemaCommand::DropColumn { table, column },
        SchemaSubcommand::DropIndex { index } => SchemaCommand::DropIndex { index },
    })
}

fn parse_column(raw: &str) -> Result<ColumnDef> {
    match raw.split_once(':') {
        Some((name, sql_type)) if !name.trim().is_empty() && !sql_type.trim().is_empty() => {
            Ok(ColumnDef {
                name: name.trim().to_string(),
                sql_type: sql_type.trim().to_string(),
            })
        }
        _ => bail!("invalid column '{}', expected NAME:TYPE", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        let column = parse_column("nickname:TEXT").unwrap();
        assert_eq!(column.name, "nickname");
        assert_eq!(column.sql_type, "TEXT");

        let column = parse_column("amount: NUMERIC(12, 2)").unwrap();
        assert_eq!(column.sql_type, "NUMERIC(12, 2)");

        assert!(parse_column("nickname").is_err());
        assert!(parse_column(":TEXT").is_err());
    }

    #[test]
    fn test_applied_command_serializes_with_sql() {
        let outcome = AppliedSchemaCommand::new(SchemaCommand::AddColumn {
            table: "employees".to_string(),
            column: ColumnDef {
                name: "nickname".to_string(),
                sql_type: "TEXT".to_string(),
            },
        });

        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["applied"]["command"], "add_column");
        assert_eq!(value["applied"]["table"], "employees");
        assert!(value["sql"].as_str().unwrap().starts_with("ALTER TABLE"));
    }

    #[test]
    fn test_truncate_maps_to_destructive_command() {
        let command = to_schema_command(SchemaSubcommand::Truncate {
            table: "salaries".to_string(),
        })
        .unwrap();
        assert!(command.is_destructive());
    }
}
