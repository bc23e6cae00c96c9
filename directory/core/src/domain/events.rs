// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::employee::{DepartmentId, EmployeeId};

/// Directory events, published after the owning transaction has committed
/// (or, for blocked attempts, after the guard rejected them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    EmployeeAdmitted {
        employee_id: EmployeeId,
        email: String,
        admitted_at: DateTime<Utc>,
    },
    EmployeeDeleted {
        employee_id: EmployeeId,
        deleted_at: DateTime<Utc>,
    },
    EmployeeArchived {
        employee_id: EmployeeId,
        archived_at: DateTime<Utc>,
    },
    DepartmentDeletionBlocked {
        department_id: DepartmentId,
        blocked_at: DateTime<Utc>,
    },
    SchemaCommandBlocked {
        command: String,
        blocked_at: DateTime<Utc>,
    },
    SchemaCommandApplied {
        command: String,
        applied_at: DateTime<Utc>,
    },
}
