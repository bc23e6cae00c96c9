// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Admit Employee Use Case
//!
//! Validates a candidate employee and writes the Employee, SalaryRecord and
//! ContactRecord triple in one transaction.
//!
//! # Flow
//!
//! 1. Trim names, reject blank ones and salaries outside `NUMERIC(14, 2)`
//! 2. Open a transaction
//! 3. Reject a duplicate first + last name
//! 4. Reject a department id above the highest existing one, or a gap
//! 5. Allocate the employee id from the store
//! 6. Reject a manager id at or above the allocated id, or one that does not exist
//! 7. Derive `first.last@domain` and insert all three records
//! 8. Commit, then publish `EmployeeAdmitted`
//!
//! Any rejection rolls the transaction back; nothing is written.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::employee::{ContactRecord, Employee, NewEmployee, SalaryRecord};
use crate::domain::error::{DirectoryError, EntityKind};
use crate::domain::events::DirectoryEvent;
use crate::domain::repository::{DirectoryStore, DirectoryTransaction, RepositoryError};
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AdmittedEmployee {
    pub employee: Employee,
    pub salary: SalaryRecord,
    pub contact: ContactRecord,
}

#[async_trait]
pub trait AdmitEmployeeUseCase: Send + Sync {
    /// Admit a new employee.
    ///
    /// # Errors
    ///
    /// - `Validation`: duplicate name, department or manager reference out of range
    /// - `Repository`: store failure; nothing was written
    async fn insert_employee(&self, candidate: NewEmployee) -> Result<AdmittedEmployee, DirectoryError>;
}

pub struct StandardAdmitEmployeeUseCase {
    store: Arc<dyn DirectoryStore>,
    event_bus: EventBus,
    email_domain: String,
}

impl StandardAdmitEmployeeUseCase {
    pub fn new(store: Arc<dyn DirectoryStore>, event_bus: EventBus, email_domain: impl Into<String>) -> Self {
        Self {
            store,
            event_bus,
            email_domain: email_domain.into(),
        }
    }

    /// Trim names and check the fields that need no store access.
    fn precheck(mut candidate: NewEmployee) -> Result<NewEmployee, DirectoryError> {
        candidate.first_name = candidate.first_name.trim().to_string();
        candidate.last_name = candidate.last_name.trim().to_string();

        if candidate.first_name.is_empty() {
            return Err(DirectoryError::validation(
                EntityKind::Employee,
                "first_name",
                &candidate.first_name,
                "first name must not be blank",
            ));
        }
        if candidate.last_name.is_empty() {
            return Err(DirectoryError::validation(
                EntityKind::Employee,
                "last_name",
                &candidate.last_name,
                "last name must not be blank",
            ));
        }
        SalaryRecord::check_amount(candidate.salary)?;
        Ok(candidate)
    }

    async fn admit_in(
        &self,
        tx: &mut dyn DirectoryTransaction,
        candidate: NewEmployee,
    ) -> Result<AdmittedEmployee, DirectoryError> {
        if let Some(existing) = tx
            .find_employee_by_name(&candidate.first_name, &candidate.last_name)
            .await?
        {
            return Err(DirectoryError::validation(
                EntityKind::Employee,
                "name",
                format!("{} {}", candidate.first_name, candidate.last_name),
                format!("an employee with this name already exists (id {})", existing.id),
            ));
        }

        let max_department = tx.max_department_id().await?;
        match max_department {
            Some(max) if candidate.department_id <= max => {}
            _ => {
                return Err(DirectoryError::validation(
                    EntityKind::Department,
                    "department_id",
                    candidate.department_id,
                    "department id exceeds the highest existing department id",
                ))
            }
        }
        if tx.find_department(candidate.department_id).await?.is_none() {
            return Err(DirectoryError::validation(
                EntityKind::Department,
                "department_id",
                candidate.department_id,
                "department does not exist",
            ));
        }

        let id = tx.allocate_employee_id().await?;
        debug!(employee_id = %id, "Allocated employee id");

        if let Some(manager_id) = candidate.manager_id {
            if manager_id >= id {
                return Err(DirectoryError::validation(
                    EntityKind::Employee,
                    "manager_id",
                    manager_id,
                    format!("manager id must reference an existing employee below {}", id),
                ));
            }
            if tx.find_employee(manager_id).await?.is_none() {
                return Err(DirectoryError::validation(
                    EntityKind::Employee,
                    "manager_id",
                    manager_id,
                    "manager does not exist",
                ));
            }
        }

        let (employee, phone, amount) = candidate.into_employee(id);
        let email = ContactRecord::derive_email(&employee.first_name, &employee.last_name, &self.email_domain);
        let salary = SalaryRecord::new(id, amount)?;
        let contact = ContactRecord::new(id, phone, email);

        tx.insert_employee(&employee).await.map_err(|e| conflict_as_validation(e, &employee))?;
        tx.insert_salary(&salary).await?;
        tx.insert_contact(&contact).await?;

        Ok(AdmittedEmployee {
            employee,
            salary,
            contact,
        })
    }
}

/// A unique-constraint hit on insert is a duplicate that raced past the name check.
fn conflict_as_validation(err: RepositoryError, employee: &Employee) -> DirectoryError {
    match err {
        RepositoryError::Conflict(reason) => {
            DirectoryError::validation(EntityKind::Employee, "name", employee.full_name(), reason)
        }
        other => DirectoryError::Repository(other),
    }
}

#[async_trait]
impl AdmitEmployeeUseCase for StandardAdmitEmployeeUseCase {
    async fn insert_employee(&self, candidate: NewEmployee) -> Result<AdmittedEmployee, DirectoryError> {
        let candidate = Self::precheck(candidate)?;

        let mut tx = self.store.begin().await?;
        let admitted = match self.admit_in(tx.as_mut(), candidate).await {
            Ok(admitted) => admitted,
            Err(err) => {
                warn!(error = %err, kind = err.kind(), "Employee admission rejected");
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback after rejected admission failed");
                }
                return Err(err);
            }
        };
        tx.commit().await?;

        info!(
            employee_id = %admitted.employee.id,
            email = %admitted.contact.email,
            "Employee admitted"
        );
        self.event_bus.publish(DirectoryEvent::EmployeeAdmitted {
            employee_id: admitted.employee.id,
            email: admitted.contact.email.clone(),
            admitted_at: Utc::now(),
        });

        Ok(admitted)
    }
}
