// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Department deletion is refused before any store access.

use chrono::Utc;
use tracing::warn;

use crate::domain::employee::DepartmentId;
use crate::domain::error::{DirectoryError, EntityKind};
use crate::domain::events::DirectoryEvent;
use crate::domain::policy::{DepartmentDeletionGuard, PolicyDecision};
use crate::infrastructure::event_bus::EventBus;

pub struct GuardService {
    department_guard: DepartmentDeletionGuard,
    event_bus: EventBus,
}

impl GuardService {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            department_guard: DepartmentDeletionGuard,
            event_bus,
        }
    }

    /// Always fails with `PolicyViolation`, for any id including unknown ones.
    pub fn delete_department(&self, department_id: DepartmentId) -> Result<(), DirectoryError> {
        let reason = match self.department_guard.evaluate(department_id) {
            PolicyDecision::Reject { reason } => reason,
            // DepartmentDeletionGuard never accepts
            PolicyDecision::Accept => format!("department {} cannot be deleted", department_id),
        };

        warn!(department_id = %department_id, "Blocked department deletion");
        self.event_bus.publish(DirectoryEvent::DepartmentDeletionBlocked {
            department_id,
            blocked_at: Utc::now(),
        });

        Err(DirectoryError::PolicyViolation {
            entity: EntityKind::Department,
            reason,
        })
    }
}
