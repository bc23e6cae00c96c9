// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Schema Administration
//!
//! The single interception point for structural commands. Every command is
//! evaluated by `SchemaProtectionGuard` first; rejected commands never reach
//! `DirectoryStore::apply_schema_command`. This runs independently of the
//! per-record mutation use cases.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::error::{DirectoryError, EntityKind};
use crate::domain::events::DirectoryEvent;
use crate::domain::policy::{PolicyDecision, SchemaCommand, SchemaProtectionGuard};
use crate::domain::repository::DirectoryStore;
use crate::infrastructure::event_bus::EventBus;

pub struct SchemaAdministration {
    store: Arc<dyn DirectoryStore>,
    guard: SchemaProtectionGuard,
    event_bus: EventBus,
}

impl SchemaAdministration {
    pub fn new(store: Arc<dyn DirectoryStore>, event_bus: EventBus) -> Self {
        Self {
            store,
            guard: SchemaProtectionGuard,
            event_bus,
        }
    }

    pub async fn execute(&self, command: &SchemaCommand) -> Result<(), DirectoryError> {
        if let PolicyDecision::Reject { reason } = self.guard.evaluate(command) {
            warn!(command = %command, "Blocked schema command");
            self.event_bus.publish(DirectoryEvent::SchemaCommandBlocked {
                command: command.to_string(),
                blocked_at: Utc::now(),
            });
            return Err(DirectoryError::PolicyViolation {
                entity: EntityKind::Schema,
                reason,
            });
        }

        self.store.apply_schema_command(command).await?;

        info!(command = %command, "Schema command applied");
        self.event_bus.publish(DirectoryEvent::SchemaCommandApplied {
            command: command.to_string(),
            applied_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryDirectoryStore;

    #[tokio::test]
    async fn test_blocked_command_is_published_not_applied() {
        let store = InMemoryDirectoryStore::new();
        let bus = EventBus::new(8);
        let mut events = bus.subscribe();
        let admin = SchemaAdministration::new(Arc::new(store.clone()), bus);

        let drop = SchemaCommand::DropTable { table: "employees".to_string() };
        assert!(admin.execute(&drop).await.is_err());

        assert!(store.applied_schema_commands().await.is_empty());
        match events.try_recv().unwrap() {
            DirectoryEvent::SchemaCommandBlocked { command, .. } => {
                assert_eq!(command, drop.to_string());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_index_creation_reaches_store() {
        let store = InMemoryDirectoryStore::new();
        let admin = SchemaAdministration::new(Arc::new(store.clone()), EventBus::new(8));
        let create = SchemaCommand::CreateIndex {
            table: "employees".to_string(),
            index: "idx_employees_title".to_string(),
            columns: vec!["job_title".to_string()],
        };

        admin.execute(&create).await.unwrap();

        assert_eq!(store.applied_schema_commands().await, vec![create]);
    }
}
