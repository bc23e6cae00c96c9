// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Entities
//!
//! Employee, Department, SalaryRecord, ContactRecord and ArchivedEmployee.
//!
//! An `Employee` is admitted together with exactly one `SalaryRecord` and one
//! `ContactRecord`, and all three leave together. `ArchivedEmployee` is the
//! permanent snapshot written when an employee is deleted. Departments are
//! created outside the engine and never removed through it.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DirectoryError, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentId(pub i64);

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub department_id: DepartmentId,
    /// `None` marks the organizational root.
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_root(&self) -> bool {
        self.manager_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub employee_id: EmployeeId,
    pub amount: Decimal,
}

/// Fractional digits a stored salary may carry (`NUMERIC(14, 2)`).
pub const SALARY_SCALE: u32 = 2;

/// Exclusive upper bound on a salary amount (`NUMERIC(14, 2)`).
pub fn salary_limit() -> Decimal {
    Decimal::from(1_000_000_000_000i64)
}

impl SalaryRecord {
    pub fn new(employee_id: EmployeeId, amount: Decimal) -> Result<Self, DirectoryError> {
        Self::check_amount(amount)?;
        Ok(Self { employee_id, amount })
    }

    /// Accepts amounts in `0 <= amount < 10^12` with at most two decimal places.
    pub fn check_amount(amount: Decimal) -> Result<(), DirectoryError> {
        let reject = |reason: &str| DirectoryError::Validation {
            entity: EntityKind::Salary,
            field: "amount",
            value: amount.to_string(),
            reason: reason.to_string(),
        };
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(reject("salary must not be negative"));
        }
        if amount >= salary_limit() {
            return Err(reject("salary must be below 1000000000000"));
        }
        if amount.normalize().scale() > SALARY_SCALE {
            return Err(reject("salary must have at most two decimal places"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub employee_id: EmployeeId,
    pub phone: String,
    pub email: String,
}

impl ContactRecord {
    pub fn new(employee_id: EmployeeId, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            employee_id,
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// `first.last@domain`, keeping the case the names were given in.
    pub fn derive_email(first_name: &str, last_name: &str, domain: &str) -> String {
        format!("{}.{}@{}", first_name, last_name, domain)
    }
}

/// Snapshot of an employee row taken at deletion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedEmployee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub department_id: DepartmentId,
    pub manager_id: Option<EmployeeId>,
    pub archived_at: DateTime<Utc>,
}

impl ArchivedEmployee {
    pub fn snapshot(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            job_title: employee.job_title.clone(),
            department_id: employee.department_id,
            manager_id: employee.manager_id,
            archived_at: Utc::now(),
        }
    }
}

/// Candidate record submitted for admission. The id is issued by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub job_title: String,
    pub department_id: DepartmentId,
    pub manager_id: Option<EmployeeId>,
    pub salary: Decimal,
}

impl NewEmployee {
    pub fn into_employee(self, id: EmployeeId) -> (Employee, String, Decimal) {
        let employee = Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            job_title: self.job_title,
            department_id: self.department_id,
            manager_id: self.manager_id,
        };
        (employee, self.phone, self.salary)
    }
}
