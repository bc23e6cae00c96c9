// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the `DirectoryStore` contract defined
//! in the domain layer.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve directory records
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! - **PostgresDirectoryStore** - sqlx-backed store, production
//! - **InMemoryDirectoryStore** - copy-on-write state behind a tokio `RwLock`,
//!   used for development, demos and tests
//!
//! # Isolation
//!
//! The in-memory transaction owns the write half of the lock for its whole
//! lifetime and works on a staged copy of the state. Readers hold the read
//! half, so they observe either the state before a cascade or after it,
//! never in between.

pub mod postgres_directory;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

use crate::domain::employee::{
    ArchivedEmployee, ContactRecord, Department, DepartmentId, Employee, EmployeeId, SalaryRecord,
};
use crate::domain::policy::SchemaCommand;
use crate::domain::projection::{build_projection, DirectoryRow};
use crate::domain::repository::{DirectoryStore, DirectoryTransaction, RepositoryError};
use crate::infrastructure::seed::SeedRecords;

#[derive(Debug, Clone, Default)]
struct DirectoryState {
    employees: BTreeMap<EmployeeId, Employee>,
    departments: BTreeMap<DepartmentId, Department>,
    salaries: HashMap<EmployeeId, SalaryRecord>,
    contacts: HashMap<EmployeeId, ContactRecord>,
    archive: BTreeMap<EmployeeId, ArchivedEmployee>,
    /// Last issued employee id
    employee_sequence: i64,
    schema_log: Vec<SchemaCommand>,
}

#[derive(Clone, Default)]
pub struct InMemoryDirectoryStore {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: SeedRecords) -> Self {
        let mut state = DirectoryState::default();
        for department in records.departments {
            state.departments.insert(department.id, department);
        }
        for employee in records.employees {
            state.employee_sequence = state.employee_sequence.max(employee.id.0);
            state.employees.insert(employee.id, employee);
        }
        for salary in records.salaries {
            state.salaries.insert(salary.employee_id, salary);
        }
        for contact in records.contacts {
            state.contacts.insert(contact.employee_id, contact);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Departments are created outside the engine; this is that outside path.
    pub async fn add_department(&self, department: Department) {
        let mut state = self.state.write().await;
        state.departments.insert(department.id, department);
    }

    /// Structural commands that reached the store.
    pub async fn applied_schema_commands(&self) -> Vec<SchemaCommand> {
        self.state.read().await.schema_log.clone()
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn begin(&self) -> Result<Box<dyn DirectoryTransaction>, RepositoryError> {
        let guard = self.state.clone().write_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }

    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(self.state.read().await.employees.get(&id).cloned())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.state.read().await.employees.values().cloned().collect())
    }

    async fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        Ok(self.state.read().await.departments.get(&id).cloned())
    }

    async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.state.read().await.departments.values().cloned().collect())
    }

    async fn find_salary(&self, employee_id: EmployeeId) -> Result<Option<SalaryRecord>, RepositoryError> {
        Ok(self.state.read().await.salaries.get(&employee_id).cloned())
    }

    async fn find_contact(&self, employee_id: EmployeeId) -> Result<Option<ContactRecord>, RepositoryError> {
        Ok(self.state.read().await.contacts.get(&employee_id).cloned())
    }

    async fn list_archive(&self) -> Result<Vec<ArchivedEmployee>, RepositoryError> {
        Ok(self.state.read().await.archive.values().cloned().collect())
    }

    async fn projection(&self) -> Result<Vec<DirectoryRow>, RepositoryError> {
        let state = self.state.read().await;
        Ok(build_projection(
            state.employees.values(),
            state.departments.values(),
            state.salaries.values(),
        ))
    }

    async fn ascend(&self, seed: EmployeeId, max_depth: usize) -> Result<Vec<Employee>, RepositoryError> {
        let state = self.state.read().await;
        let mut rows = Vec::new();
        let mut current = Some(seed);
        while let Some(id) = current {
            if rows.len() > max_depth {
                break;
            }
            match state.employees.get(&id) {
                Some(employee) => {
                    current = employee.manager_id;
                    rows.push(employee.clone());
                }
                None => break,
            }
        }
        Ok(rows)
    }

    async fn apply_schema_command(&self, command: &SchemaCommand) -> Result<(), RepositoryError> {
        self.state.write().await.schema_log.push(command.clone());
        Ok(())
    }
}

struct InMemoryTransaction {
    guard: OwnedRwLockWriteGuard<DirectoryState>,
    staged: DirectoryState,
}

#[async_trait]
impl DirectoryTransaction for InMemoryTransaction {
    async fn allocate_employee_id(&mut self) -> Result<EmployeeId, RepositoryError> {
        self.staged.employee_sequence += 1;
        Ok(EmployeeId(self.staged.employee_sequence))
    }

    async fn max_department_id(&mut self) -> Result<Option<DepartmentId>, RepositoryError> {
        Ok(self.staged.departments.keys().next_back().copied())
    }

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(self.staged.employees.get(&id).cloned())
    }

    async fn find_employee_by_name(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, RepositoryError> {
        Ok(self
            .staged
            .employees
            .values()
            .find(|e| e.first_name == first_name && e.last_name == last_name)
            .cloned())
    }

    async fn find_department(&mut self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        Ok(self.staged.departments.get(&id).cloned())
    }

    async fn insert_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError> {
        if self.staged.employees.contains_key(&employee.id) {
            return Err(RepositoryError::Conflict(format!("employee {} already exists", employee.id)));
        }
        if !self.staged.departments.contains_key(&employee.department_id) {
            return Err(RepositoryError::NotFound(format!("department {}", employee.department_id)));
        }
        self.staged.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn insert_salary(&mut self, salary: &SalaryRecord) -> Result<(), RepositoryError> {
        if !self.staged.employees.contains_key(&salary.employee_id) {
            return Err(RepositoryError::NotFound(format!("employee {}", salary.employee_id)));
        }
        if self.staged.salaries.contains_key(&salary.employee_id) {
            return Err(RepositoryError::Conflict(format!(
                "salary for employee {} already exists",
                salary.employee_id
            )));
        }
        self.staged.salaries.insert(salary.employee_id, salary.clone());
        Ok(())
    }

    async fn insert_contact(&mut self, contact: &ContactRecord) -> Result<(), RepositoryError> {
        if !self.staged.employees.contains_key(&contact.employee_id) {
            return Err(RepositoryError::NotFound(format!("employee {}", contact.employee_id)));
        }
        if self.staged.contacts.contains_key(&contact.employee_id) {
            return Err(RepositoryError::Conflict(format!(
                "contact for employee {} already exists",
                contact.employee_id
            )));
        }
        self.staged.contacts.insert(contact.employee_id, contact.clone());
        Ok(())
    }

    async fn delete_contact(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        Ok(self.staged.contacts.remove(&employee_id).is_some())
    }

    async fn delete_salary(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        Ok(self.staged.salaries.remove(&employee_id).is_some())
    }

    async fn delete_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        if self.staged.contacts.contains_key(&id) || self.staged.salaries.contains_key(&id) {
            return Err(RepositoryError::Conflict(format!(
                "employee {} still has dependent records",
                id
            )));
        }
        Ok(self.staged.employees.remove(&id))
    }

    async fn archive_exists(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        Ok(self.staged.archive.contains_key(&employee_id))
    }

    async fn insert_archive(&mut self, archived: &ArchivedEmployee) -> Result<(), RepositoryError> {
        if self.staged.archive.contains_key(&archived.employee_id) {
            return Err(RepositoryError::Conflict(format!(
                "employee {} already archived",
                archived.employee_id
            )));
        }
        self.staged.archive.insert(archived.employee_id, archived.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let InMemoryTransaction { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        // Dropping the guard discards the staged copy
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn seeded() -> InMemoryDirectoryStore {
        InMemoryDirectoryStore::from_records(SeedRecords {
            departments: vec![Department { id: DepartmentId(1), name: "Ops".to_string() }],
            employees: vec![Employee {
                id: EmployeeId(7),
                first_name: "Lindiwe".to_string(),
                last_name: "Dube".to_string(),
                job_title: "Lead".to_string(),
                department_id: DepartmentId(1),
                manager_id: None,
            }],
            salaries: vec![SalaryRecord { employee_id: EmployeeId(7), amount: Decimal::new(1000, 0) }],
            contacts: vec![],
        })
    }

    #[tokio::test]
    async fn test_allocator_continues_after_seed() {
        let store = seeded();
        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.allocate_employee_id().await.unwrap(), EmployeeId(8));
        assert_eq!(tx.allocate_employee_id().await.unwrap(), EmployeeId(9));
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(tx.allocate_employee_id().await.unwrap(), EmployeeId(10));
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = seeded();
        {
            let mut tx = store.begin().await.unwrap();
            assert!(tx.delete_salary(EmployeeId(7)).await.unwrap());
        }
        assert!(store.find_salary(EmployeeId(7)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let store = seeded();
        let mut tx = store.begin().await.unwrap();
        tx.delete_salary(EmployeeId(7)).await.unwrap();
        tx.delete_employee(EmployeeId(7)).await.unwrap();
        tx.commit().await.unwrap();
        assert!(store.find_employee(EmployeeId(7)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_parent_delete_requires_children_gone() {
        let store = seeded();
        let mut tx = store.begin().await.unwrap();
        let err = tx.delete_employee(EmployeeId(7)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_ascend_bounded() {
        let store = InMemoryDirectoryStore::from_records(SeedRecords {
            departments: vec![Department { id: DepartmentId(1), name: "Ops".to_string() }],
            employees: vec![
                Employee {
                    id: EmployeeId(1),
                    first_name: "A".to_string(),
                    last_name: "A".to_string(),
                    job_title: "x".to_string(),
                    department_id: DepartmentId(1),
                    manager_id: Some(EmployeeId(2)),
                },
                Employee {
                    id: EmployeeId(2),
                    first_name: "B".to_string(),
                    last_name: "B".to_string(),
                    job_title: "x".to_string(),
                    department_id: DepartmentId(1),
                    manager_id: Some(EmployeeId(1)),
                },
            ],
            salaries: vec![],
            contacts: vec![],
        });
        let rows = store.ascend(EmployeeId(1), 5).await.unwrap();
        assert_eq!(rows.len(), 6);
    }
}
