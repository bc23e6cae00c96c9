// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::config::DirectoryConfig;
use orgdir_core::domain::employee::{
    ArchivedEmployee, ContactRecord, Department, DepartmentId, Employee, EmployeeId, NewEmployee,
    SalaryRecord,
};
use orgdir_core::domain::policy::SchemaCommand;
use orgdir_core::domain::projection::DirectoryRow;
use orgdir_core::domain::repository::{DirectoryStore, DirectoryTransaction, RepositoryError};
use orgdir_core::infrastructure::event_bus::EventBus;
use orgdir_core::infrastructure::repositories::InMemoryDirectoryStore;
use orgdir_core::infrastructure::seed::DirectorySeed;

pub const SEED: &str = include_str!("../../../../demo/seed.yaml");

pub fn seeded_store() -> InMemoryDirectoryStore {
    let records = DirectorySeed::from_yaml_str(SEED)
        .expect("seed parses")
        .into_records("company.com")
        .expect("seed is consistent");
    InMemoryDirectoryStore::from_records(records)
}

pub fn service_over(store: Arc<dyn DirectoryStore>) -> DirectoryService {
    DirectoryService::new(store, EventBus::new(64), &DirectoryConfig::default())
}

pub fn seeded_service() -> (DirectoryService, InMemoryDirectoryStore) {
    let store = seeded_store();
    (service_over(Arc::new(store.clone())), store)
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

pub fn candidate(first: &str, last: &str, dept: i64, manager: Option<i64>, salary: &str) -> NewEmployee {
    NewEmployee {
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: "555-000-9999".to_string(),
        job_title: "Analyst".to_string(),
        department_id: DepartmentId(dept),
        manager_id: manager.map(EmployeeId),
        salary: dec(salary),
    }
}

pub fn sanele() -> NewEmployee {
    NewEmployee {
        first_name: "Sanele".to_string(),
        last_name: "Zondo".to_string(),
        phone: "555-567-8901".to_string(),
        job_title: "Intern".to_string(),
        department_id: DepartmentId(3),
        manager_id: Some(EmployeeId(2)),
        salary: dec("35000"),
    }
}

/// Points at which `FaultyStore` transactions misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    DeleteSalary,
    DeleteEmployee,
    ArchiveAlreadyPresent,
}

/// Delegates to an in-memory store and injects a single fault into its transactions.
pub struct FaultyStore {
    inner: InMemoryDirectoryStore,
    fault: Fault,
}

impl FaultyStore {
    pub fn new(inner: InMemoryDirectoryStore, fault: Fault) -> Self {
        Self { inner, fault }
    }
}

struct FaultyTransaction {
    inner: Box<dyn DirectoryTransaction>,
    fault: Fault,
}

#[async_trait]
impl DirectoryStore for FaultyStore {
    async fn begin(&self) -> Result<Box<dyn DirectoryTransaction>, RepositoryError> {
        Ok(Box::new(FaultyTransaction {
            inner: self.inner.begin().await?,
            fault: self.fault,
        }))
    }
    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        self.inner.find_employee(id).await
    }
    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        self.inner.list_employees().await
    }
    async fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        self.inner.find_department(id).await
    }
    async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        self.inner.list_departments().await
    }
    async fn find_salary(&self, id: EmployeeId) -> Result<Option<SalaryRecord>, RepositoryError> {
        self.inner.find_salary(id).await
    }
    async fn find_contact(&self, id: EmployeeId) -> Result<Option<ContactRecord>, RepositoryError> {
        self.inner.find_contact(id).await
    }
    async fn list_archive(&self) -> Result<Vec<ArchivedEmployee>, RepositoryError> {
        self.inner.list_archive().await
    }
    async fn projection(&self) -> Result<Vec<DirectoryRow>, RepositoryError> {
        self.inner.projection().await
    }
    async fn ascend(&self, seed: EmployeeId, max_depth: usize) -> Result<Vec<Employee>, RepositoryError> {
        self.inner.ascend(seed, max_depth).await
    }
    async fn apply_schema_command(&self, command: &SchemaCommand) -> Result<(), RepositoryError> {
        self.inner.apply_schema_command(command).await
    }
}

#[async_trait]
impl DirectoryTransaction for FaultyTransaction {
    async fn allocate_employee_id(&mut self) -> Result<EmployeeId, RepositoryError> {
        self.inner.allocate_employee_id().await
    }
    async fn max_department_id(&mut self) -> Result<Option<DepartmentId>, RepositoryError> {
        self.inner.max_department_id().await
    }
    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        self.inner.find_employee(id).await
    }
    async fn find_employee_by_name(&mut self, first: &str, last: &str) -> Result<Option<Employee>, RepositoryError> {
        self.inner.find_employee_by_name(first, last).await
    }
    async fn find_department(&mut self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        self.inner.find_department(id).await
    }
    async fn insert_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError> {
        self.inner.insert_employee(employee).await
    }
    async fn insert_salary(&mut self, salary: &SalaryRecord) -> Result<(), RepositoryError> {
        self.inner.insert_salary(salary).await
    }
    async fn insert_contact(&mut self, contact: &ContactRecord) -> Result<(), RepositoryError> {
        self.inner.insert_contact(contact).await
    }
    async fn delete_contact(&mut self, id: EmployeeId) -> Result<bool, RepositoryError> {
        self.inner.delete_contact(id).await
    }
    async fn delete_salary(&mut self, id: EmployeeId) -> Result<bool, RepositoryError> {
        if self.fault == Fault::DeleteSalary {
            return Err(RepositoryError::Database("connection reset".to_string()));
        }
        self.inner.delete_salary(id).await
    }
    async fn delete_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        if self.fault == Fault::DeleteEmployee {
            return Err(RepositoryError::Database("lock timeout".to_string()));
        }
        self.inner.delete_employee(id).await
    }
    async fn archive_exists(&mut self, id: EmployeeId) -> Result<bool, RepositoryError> {
        if self.fault == Fault::ArchiveAlreadyPresent {
            return Ok(true);
        }
        self.inner.archive_exists(id).await
    }
    async fn insert_archive(&mut self, archived: &ArchivedEmployee) -> Result<(), RepositoryError> {
        self.inner.insert_archive(archived).await
    }
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.inner.commit().await
    }
    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.inner.rollback().await
    }
}
