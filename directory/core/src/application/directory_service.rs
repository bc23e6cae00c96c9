// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Directory Service
//!
//! Facade over the directory use cases. This is the surface external callers
//! consume:
//!
//! | Operation | Backed by |
//! |-----------|-----------|
//! | `insert_employee` | `StandardAdmitEmployeeUseCase` |
//! | `delete_employee` | `DeletionPipeline` |
//! | `delete_department` | `GuardService` |
//! | `execute_schema_command` | `SchemaAdministration` |
//! | `resolve_hierarchy`, `compute_rankings`, `directory_projection` | `DirectoryQueries` |

use std::sync::Arc;

use crate::application::admission::{AdmitEmployeeUseCase, AdmittedEmployee, StandardAdmitEmployeeUseCase};
use crate::application::deletion::{DeleteEmployeeUseCase, DeletionPipeline, DeletionReport};
use crate::application::guard::GuardService;
use crate::application::queries::DirectoryQueries;
use crate::application::repository_factory::create_directory_store;
use crate::application::schema_admin::SchemaAdministration;
use crate::domain::config::DirectoryConfig;
use crate::domain::employee::{ArchivedEmployee, DepartmentId, EmployeeId, NewEmployee};
use crate::domain::error::DirectoryError;
use crate::domain::hierarchy::HierarchyLevel;
use crate::domain::policy::SchemaCommand;
use crate::domain::projection::DirectoryRow;
use crate::domain::ranking::RankedRow;
use crate::domain::repository::DirectoryStore;
use crate::infrastructure::event_bus::{EventBus, EventReceiver};

pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    event_bus: EventBus,
    admission: Arc<dyn AdmitEmployeeUseCase>,
    deletion: Arc<dyn DeleteEmployeeUseCase>,
    guard: GuardService,
    schema: SchemaAdministration,
    queries: DirectoryQueries,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DirectoryStore>, event_bus: EventBus, config: &DirectoryConfig) -> Self {
        Self {
            admission: Arc::new(StandardAdmitEmployeeUseCase::new(
                store.clone(),
                event_bus.clone(),
                config.email_domain.clone(),
            )),
            deletion: Arc::new(DeletionPipeline::new(store.clone(), event_bus.clone())),
            guard: GuardService::new(event_bus.clone()),
            schema: SchemaAdministration::new(store.clone(), event_bus.clone()),
            queries: DirectoryQueries::new(store.clone(), config.hierarchy.max_depth),
            store,
            event_bus,
        }
    }

    /// Build the store from configuration and wire every use case to it.
    /// The configuration is validated first.
    pub async fn from_config(config: &DirectoryConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let store = create_directory_store(config).await?;
        let event_bus = EventBus::new(config.events.capacity);
        Ok(Self::new(store, event_bus, config))
    }

    pub fn store(&self) -> Arc<dyn DirectoryStore> {
        self.store.clone()
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }

    pub async fn insert_employee(&self, candidate: NewEmployee) -> Result<AdmittedEmployee, DirectoryError> {
        self.admission.insert_employee(candidate).await
    }

    pub async fn delete_employee(&self, employee_id: EmployeeId) -> Result<DeletionReport, DirectoryError> {
        self.deletion.delete_employee(employee_id).await
    }

    pub fn delete_department(&self, department_id: DepartmentId) -> Result<(), DirectoryError> {
        self.guard.delete_department(department_id)
    }

    pub async fn execute_schema_command(&self, command: &SchemaCommand) -> Result<(), DirectoryError> {
        self.schema.execute(command).await
    }

    pub async fn resolve_hierarchy(&self, employee_id: EmployeeId) -> Result<Vec<HierarchyLevel>, DirectoryError> {
        self.queries.resolve_hierarchy(employee_id).await
    }

    pub async fn compute_rankings(&self) -> Result<Vec<RankedRow>, DirectoryError> {
        self.queries.compute_rankings().await
    }

    pub async fn directory_projection(&self) -> Result<Vec<DirectoryRow>, DirectoryError> {
        self.queries.directory_projection().await
    }

    pub async fn list_archive(&self) -> Result<Vec<ArchivedEmployee>, DirectoryError> {
        Ok(self.store.list_archive().await?)
    }
}
