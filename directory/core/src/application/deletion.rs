// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Delete Employee Use Case
//!
//! Cascade deletion and archival as one explicit pipeline inside a single
//! transaction:
//!
//! ```text
//! LoadTarget -> DeleteContact -> DeleteSalary -> DeleteEmployee -> Archive -> commit
//! ```
//!
//! Child records go before the parent row and the archive snapshot is
//! written only after the row is gone. A failing step aborts the pipeline
//! and rolls everything back, including the archive insert, so the caller
//! never sees a deleted employee without its archive entry.
//!
//! The archive duplicate check looks up the employee id directly.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::employee::{ArchivedEmployee, Employee, EmployeeId};
use crate::domain::error::{DirectoryError, EntityKind};
use crate::domain::events::DirectoryEvent;
use crate::domain::repository::{DirectoryStore, DirectoryTransaction, RepositoryError};
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionStep {
    LoadTarget,
    DeleteContact,
    DeleteSalary,
    DeleteEmployee,
    Archive,
}

impl DeletionStep {
    pub const PIPELINE: [DeletionStep; 5] = [
        DeletionStep::LoadTarget,
        DeletionStep::DeleteContact,
        DeletionStep::DeleteSalary,
        DeletionStep::DeleteEmployee,
        DeletionStep::Archive,
    ];

    fn entity(self) -> EntityKind {
        match self {
            DeletionStep::LoadTarget | DeletionStep::DeleteEmployee => EntityKind::Employee,
            DeletionStep::DeleteContact => EntityKind::Contact,
            DeletionStep::DeleteSalary => EntityKind::Salary,
            DeletionStep::Archive => EntityKind::Archive,
        }
    }
}

impl fmt::Display for DeletionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeletionStep::LoadTarget => "load_target",
            DeletionStep::DeleteContact => "delete_contact",
            DeletionStep::DeleteSalary => "delete_salary",
            DeletionStep::DeleteEmployee => "delete_employee",
            DeletionStep::Archive => "archive",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeletionReport {
    pub archived: ArchivedEmployee,
    pub removed_contact: bool,
    pub removed_salary: bool,
    pub steps: Vec<DeletionStep>,
}

#[async_trait]
pub trait DeleteEmployeeUseCase: Send + Sync {
    /// Delete an employee together with its contact and salary records and archive it.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no employee with this id
    /// - `Integrity`: a cascade step failed; nothing changed
    /// - `ArchiveConflict`: the id is already archived; nothing changed
    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<DeletionReport, DirectoryError>;
}

#[derive(Debug)]
struct DeletionContext {
    employee_id: EmployeeId,
    removed: Option<Employee>,
    removed_contact: bool,
    removed_salary: bool,
    archived: Option<ArchivedEmployee>,
    completed: Vec<DeletionStep>,
}

pub struct DeletionPipeline {
    store: Arc<dyn DirectoryStore>,
    event_bus: EventBus,
}

impl DeletionPipeline {
    pub fn new(store: Arc<dyn DirectoryStore>, event_bus: EventBus) -> Self {
        Self { store, event_bus }
    }

    async fn run_step(
        step: DeletionStep,
        tx: &mut dyn DirectoryTransaction,
        ctx: &mut DeletionContext,
    ) -> Result<(), DirectoryError> {
        let id = ctx.employee_id;
        match step {
            DeletionStep::LoadTarget => {
                if tx.find_employee(id).await?.is_none() {
                    return Err(DirectoryError::not_found(EntityKind::Employee, id));
                }
            }
            DeletionStep::DeleteContact => {
                ctx.removed_contact = tx.delete_contact(id).await.map_err(|e| integrity(step, id, e))?;
                if !ctx.removed_contact {
                    debug!(employee_id = %id, "No contact record to remove");
                }
            }
            DeletionStep::DeleteSalary => {
                ctx.removed_salary = tx.delete_salary(id).await.map_err(|e| integrity(step, id, e))?;
                if !ctx.removed_salary {
                    debug!(employee_id = %id, "No salary record to remove");
                }
            }
            DeletionStep::DeleteEmployee => {
                let removed = tx.delete_employee(id).await.map_err(|e| integrity(step, id, e))?;
                ctx.removed = Some(removed.ok_or_else(|| DirectoryError::Integrity {
                    entity: EntityKind::Employee,
                    id: id.to_string(),
                    reason: "employee row vanished during deletion".to_string(),
                })?);
            }
            DeletionStep::Archive => {
                let removed = ctx.removed.as_ref().ok_or_else(|| DirectoryError::Integrity {
                    entity: EntityKind::Archive,
                    id: id.to_string(),
                    reason: "archive step reached before the employee row was removed".to_string(),
                })?;
                if tx.archive_exists(id).await? {
                    return Err(DirectoryError::ArchiveConflict { employee_id: id });
                }
                let archived = ArchivedEmployee::snapshot(removed);
                tx.insert_archive(&archived).await.map_err(|e| match e {
                    RepositoryError::Conflict(_) => DirectoryError::ArchiveConflict { employee_id: id },
                    other => integrity(step, id, other),
                })?;
                ctx.archived = Some(archived);
            }
        }
        ctx.completed.push(step);
        debug!(employee_id = %id, step = %step, "Deletion step complete");
        Ok(())
    }
}

fn integrity(step: DeletionStep, id: EmployeeId, err: RepositoryError) -> DirectoryError {
    DirectoryError::Integrity {
        entity: step.entity(),
        id: id.to_string(),
        reason: format!("{} failed: {}", step, err),
    }
}

#[async_trait]
impl DeleteEmployeeUseCase for DeletionPipeline {
    async fn delete_employee(&self, employee_id: EmployeeId) -> Result<DeletionReport, DirectoryError> {
        let mut ctx = DeletionContext {
            employee_id,
            removed: None,
            removed_contact: false,
            removed_salary: false,
            archived: None,
            completed: Vec::with_capacity(DeletionStep::PIPELINE.len()),
        };

        let mut tx = self.store.begin().await?;
        for step in DeletionStep::PIPELINE {
            if let Err(err) = Self::run_step(step, tx.as_mut(), &mut ctx).await {
                warn!(
                    employee_id = %employee_id,
                    step = %step,
                    error = %err,
                    "Employee deletion aborted, rolling back"
                );
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback after aborted deletion failed");
                }
                return Err(err);
            }
        }
        tx.commit().await.map_err(|e| DirectoryError::Integrity {
            entity: EntityKind::Employee,
            id: employee_id.to_string(),
            reason: format!("commit failed: {}", e),
        })?;

        let archived = ctx.archived.ok_or_else(|| DirectoryError::Integrity {
            entity: EntityKind::Archive,
            id: employee_id.to_string(),
            reason: "pipeline finished without an archive entry".to_string(),
        })?;

        info!(employee_id = %employee_id, "Employee deleted and archived");
        let now = Utc::now();
        self.event_bus.publish(DirectoryEvent::EmployeeDeleted {
            employee_id,
            deleted_at: now,
        });
        self.event_bus.publish(DirectoryEvent::EmployeeArchived {
            employee_id,
            archived_at: archived.archived_at,
        });

        Ok(DeletionReport {
            archived,
            removed_contact: ctx.removed_contact,
            removed_salary: ctx.removed_salary,
            steps: ctx.completed,
        })
    }
}
