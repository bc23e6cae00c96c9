// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Errors
//!
//! | Variant | Raised by | Caller action |
//! |---------|-----------|---------------|
//! | `Validation` | admission | correct the input |
//! | `PolicyViolation` | guard policies | none, never overridable |
//! | `Integrity` | cascade deletion | directory unchanged, report |
//! | `ArchiveConflict` | archival hook | directory unchanged, report |
//! | `CycleDetected` | hierarchy resolver | repair manager references |
//!
//! None of these are retried internally.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::employee::EmployeeId;
use crate::domain::repository::RepositoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    Department,
    Salary,
    Contact,
    Archive,
    Schema,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Employee => "employee",
            EntityKind::Department => "department",
            EntityKind::Salary => "salary",
            EntityKind::Contact => "contact",
            EntityKind::Archive => "archive",
            EntityKind::Schema => "schema",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Validation failed for {entity} {field}={value}: {reason}")]
    Validation {
        entity: EntityKind,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Policy violation on {entity}: {reason}")]
    PolicyViolation { entity: EntityKind, reason: String },

    #[error("Integrity failure on {entity} {id}: {reason}")]
    Integrity {
        entity: EntityKind,
        id: String,
        reason: String,
    },

    #[error("Employee {employee_id} is already archived")]
    ArchiveConflict { employee_id: EmployeeId },

    #[error("Cycle detected in manager chain of employee {employee_id}: {chain:?}")]
    CycleDetected {
        employee_id: EmployeeId,
        chain: Vec<EmployeeId>,
    },

    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DirectoryError {
    pub fn validation(
        entity: EntityKind,
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        DirectoryError::Validation {
            entity,
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        DirectoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Stable label for logs and CLI exit reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::Validation { .. } => "validation_error",
            DirectoryError::PolicyViolation { .. } => "policy_violation",
            DirectoryError::Integrity { .. } => "integrity_failure",
            DirectoryError::ArchiveConflict { .. } => "archive_conflict",
            DirectoryError::CycleDetected { .. } => "cycle_detected",
            DirectoryError::NotFound { .. } => "not_found",
            DirectoryError::Repository(_) => "repository_error",
        }
    }
}
