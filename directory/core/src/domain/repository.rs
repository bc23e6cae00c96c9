// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Store Contract
//!
//! Persistence contract consumed by the engine. The store owns table layout,
//! indexes and durability; the engine only sees the operations below.
//!
//! | Trait | Purpose | Implementations |
//! |-------|---------|----------------|
//! | `DirectoryStore` | reads, transaction factory, schema interception | `InMemoryDirectoryStore`, `PostgresDirectoryStore` |
//! | `DirectoryTransaction` | atomic multi-record mutation | one per store |
//!
//! ## Transactions
//!
//! Every mutation runs inside a `DirectoryTransaction` obtained from
//! `DirectoryStore::begin`. A transaction ends with `commit` or `rollback`;
//! dropping it without either discards every staged write, so an early
//! return through `?` always releases it.
//!
//! ## Identifier allocation
//!
//! `allocate_employee_id` is issued by the store under exclusive access
//! (a sequence in PostgreSQL, a guarded counter in memory). Concurrent
//! admissions never observe the same id.

use async_trait::async_trait;

use crate::domain::employee::{
    ArchivedEmployee, ContactRecord, Department, DepartmentId, Employee, EmployeeId, SalaryRecord,
};
use crate::domain::policy::SchemaCommand;
use crate::domain::projection::DirectoryRow;

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Open a transaction. Writes become visible to readers only on commit.
    async fn begin(&self) -> Result<Box<dyn DirectoryTransaction>, RepositoryError>;

    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError>;

    async fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError>;

    async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError>;

    async fn find_salary(&self, employee_id: EmployeeId) -> Result<Option<SalaryRecord>, RepositoryError>;

    async fn find_contact(&self, employee_id: EmployeeId) -> Result<Option<ContactRecord>, RepositoryError>;

    async fn list_archive(&self) -> Result<Vec<ArchivedEmployee>, RepositoryError>;

    /// Merged employee / manager / department / salary view, ordered by employee id.
    async fn projection(&self) -> Result<Vec<DirectoryRow>, RepositoryError>;

    /// Recursive ascent through the manager relation starting at `seed`.
    ///
    /// Returns the seed row first, then each manager in turn, stopping at a
    /// root, a dangling reference, or after `max_depth + 1` rows. Rows are
    /// returned as found; cycle validation belongs to the caller.
    async fn ascend(&self, seed: EmployeeId, max_depth: usize) -> Result<Vec<Employee>, RepositoryError>;

    /// Apply a structural command. Only reached after the schema guard accepted it.
    async fn apply_schema_command(&self, command: &SchemaCommand) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait DirectoryTransaction: Send {
    /// Issue the next employee id. Never returns an id already handed out
    /// to a committed transaction.
    async fn allocate_employee_id(&mut self) -> Result<EmployeeId, RepositoryError>;

    async fn max_department_id(&mut self) -> Result<Option<DepartmentId>, RepositoryError>;

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    async fn find_employee_by_name(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, RepositoryError>;

    async fn find_department(&mut self, id: DepartmentId) -> Result<Option<Department>, RepositoryError>;

    async fn insert_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError>;

    async fn insert_salary(&mut self, salary: &SalaryRecord) -> Result<(), RepositoryError>;

    async fn insert_contact(&mut self, contact: &ContactRecord) -> Result<(), RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete_contact(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete_salary(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError>;

    /// Removes the employee row and returns it as it was before removal.
    async fn delete_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    async fn archive_exists(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError>;

    async fn insert_archive(&mut self, archived: &ArchivedEmployee) -> Result<(), RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.message().to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
