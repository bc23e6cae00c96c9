// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Guard Policies
//!
//! Unconditional rejection rules evaluated before any store access.
//!
//! - `DepartmentDeletionGuard`: departments are never deleted through the engine.
//! - `SchemaProtectionGuard`: destructive structural commands never reach the store.
//!
//! Both guards are pure decision functions with no exceptions and no
//! dependency on directory state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::employee::DepartmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PolicyDecision {
    Accept,
    Reject { reason: String },
}

impl PolicyDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PolicyDecision::Accept)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentDeletionGuard;

impl DepartmentDeletionGuard {
    pub fn evaluate(&self, department_id: DepartmentId) -> PolicyDecision {
        PolicyDecision::Reject {
            reason: format!("department {} cannot be deleted", department_id),
        }
    }
}

/// Structural command issued against the store itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SchemaCommand {
    CreateTable { table: String, columns: Vec<ColumnDef> },
    AddColumn { table: String, column: ColumnDef },
    CreateIndex { table: String, index: String, columns: Vec<String> },
    DropTable { table: String },
    TruncateTable { table: String },
    DropColumn { table: String, column: String },
    DropIndex { index: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
}

impl SchemaCommand {
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            SchemaCommand::DropTable { .. }
                | SchemaCommand::TruncateTable { .. }
                | SchemaCommand::DropColumn { .. }
                | SchemaCommand::DropIndex { .. }
        )
    }

    /// Name of the object the command targets.
    pub fn target(&self) -> &str {
        match self {
            SchemaCommand::CreateTable { table, .. }
            | SchemaCommand::AddColumn { table, .. }
            | SchemaCommand::DropTable { table }
            | SchemaCommand::TruncateTable { table }
            | SchemaCommand::DropColumn { table, .. } => table,
            SchemaCommand::CreateIndex { index, .. } | SchemaCommand::DropIndex { index } => index,
        }
    }

    pub fn to_sql(&self) -> String {
        match self {
            SchemaCommand::CreateTable { table, columns } => {
                let cols = columns
                    .iter()
                    .map(|c| format!("{} {}", quote_ident(&c.name), c.sql_type))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("CREATE TABLE {} ({})", quote_ident(table), cols)
            }
            SchemaCommand::AddColumn { table, column } => format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                quote_ident(table),
                quote_ident(&column.name),
                column.sql_type
            ),
            SchemaCommand::CreateIndex { table, index, columns } => format!(
                "CREATE INDEX {} ON {} ({})",
                quote_ident(index),
                quote_ident(table),
                columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
            ),
            SchemaCommand::DropTable { table } => format!("DROP TABLE {}", quote_ident(table)),
            SchemaCommand::TruncateTable { table } => format!("TRUNCATE TABLE {}", quote_ident(table)),
            SchemaCommand::DropColumn { table, column } => format!(
                "ALTER TABLE {} DROP COLUMN {}",
                quote_ident(table),
                quote_ident(column)
            ),
            SchemaCommand::DropIndex { index } => format!("DROP INDEX {}", quote_ident(index)),
        }
    }
}

impl fmt::Display for SchemaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaProtectionGuard;

impl SchemaProtectionGuard {
    pub fn evaluate(&self, command: &SchemaCommand) -> PolicyDecision {
        if command.is_destructive() {
            PolicyDecision::Reject {
                reason: format!("destructive schema command rejected: {}", command),
            }
        } else {
            PolicyDecision::Accept
        }
    }
}
