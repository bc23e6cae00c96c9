// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Seed
//!
//! YAML fixture describing departments and employees (with their salary and
//! phone). Seeds bypass admission: ids are taken as given, and the store's
//! allocator continues after the highest seeded id.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::employee::{
    ContactRecord, Department, DepartmentId, Employee, EmployeeId, SalaryRecord,
};
use crate::domain::error::DirectoryError;

/// Problems with a seed fixture. All of them are input errors.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate department id {0} in seed")]
    DuplicateDepartment(DepartmentId),

    #[error("Duplicate employee id {0} in seed")]
    DuplicateEmployee(EmployeeId),

    #[error("Duplicate employee name {first_name} {last_name} in seed")]
    DuplicateName { first_name: String, last_name: String },

    #[error("Seeded employee {employee_id} references unknown department {department_id}")]
    UnknownDepartment {
        employee_id: EmployeeId,
        department_id: DepartmentId,
    },

    #[error("Seeded employee {employee_id} references unknown manager {manager_id}")]
    UnknownManager {
        employee_id: EmployeeId,
        manager_id: EmployeeId,
    },

    #[error("Seeded employee {employee_id} has an invalid salary: {source}")]
    InvalidSalary {
        employee_id: EmployeeId,
        #[source]
        source: DirectoryError,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectorySeed {
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub department_id: DepartmentId,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    pub phone: String,
    /// Derived from the name when absent
    #[serde(default)]
    pub email: Option<String>,
    pub salary: Decimal,
}

/// Seed rows ready to be written to a store.
#[derive(Debug, Clone, Default)]
pub struct SeedRecords {
    pub departments: Vec<Department>,
    pub employees: Vec<Employee>,
    pub salaries: Vec<SalaryRecord>,
    pub contacts: Vec<ContactRecord>,
}

impl DirectorySeed {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| SeedError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Check referential integrity of the fixture and split it into records.
    pub fn into_records(self, email_domain: &str) -> Result<SeedRecords, SeedError> {
        let mut department_ids = HashSet::new();
        for department in &self.departments {
            if !department_ids.insert(department.id) {
                return Err(SeedError::DuplicateDepartment(department.id));
            }
        }

        let mut employee_ids = HashSet::new();
        for employee in &self.employees {
            if !employee_ids.insert(employee.id) {
                return Err(SeedError::DuplicateEmployee(employee.id));
            }
        }

        let mut names = HashSet::new();
        let mut records = SeedRecords {
            departments: self.departments,
            ..SeedRecords::default()
        };

        for seed in self.employees {
            if !department_ids.contains(&seed.department_id) {
                return Err(SeedError::UnknownDepartment {
                    employee_id: seed.id,
                    department_id: seed.department_id,
                });
            }
            if let Some(manager) = seed.manager_id {
                if !employee_ids.contains(&manager) {
                    return Err(SeedError::UnknownManager {
                        employee_id: seed.id,
                        manager_id: manager,
                    });
                }
            }
            if !names.insert((seed.first_name.clone(), seed.last_name.clone())) {
                return Err(SeedError::DuplicateName {
                    first_name: seed.first_name,
                    last_name: seed.last_name,
                });
            }

            let email = seed.email.unwrap_or_else(|| {
                ContactRecord::derive_email(&seed.first_name, &seed.last_name, email_domain)
            });
            let salary = SalaryRecord::new(seed.id, seed.salary)
                .map_err(|source| SeedError::InvalidSalary {
                    employee_id: seed.id,
                    source,
                })?;

            records.contacts.push(ContactRecord::new(seed.id, seed.phone, email));
            records.salaries.push(salary);
            records.employees.push(Employee {
                id: seed.id,
                first_name: seed.first_name,
                last_name: seed.last_name,
                job_title: seed.job_title,
                department_id: seed.department_id,
                manager_id: seed.manager_id,
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"
departments:
  - { id: 1, name: Executive }
  - { id: 2, name: Engineering }
employees:
  - { id: 1, first_name: Thandi, last_name: Mokoena, job_title: CEO, department_id: 1, phone: "555-000-0001", salary: "250000" }
  - { id: 2, first_name: Ravi, last_name: Pillay, job_title: CTO, department_id: 2, manager_id: 1, phone: "555-000-0002", salary: "180000" }
"#;

    #[test]
    fn test_parse_and_split() {
        let records = DirectorySeed::from_yaml_str(SEED)
            .unwrap()
            .into_records("company.com")
            .unwrap();
        assert_eq!(records.departments.len(), 2);
        assert_eq!(records.employees.len(), 2);
        assert_eq!(records.contacts[1].email, "Ravi.Pillay@company.com");
        assert_eq!(records.salaries[0].amount, Decimal::new(250000, 0));
    }

    #[test]
    fn test_unknown_department_rejected() {
        let mut seed = DirectorySeed::from_yaml_str(SEED).unwrap();
        seed.employees[1].department_id = DepartmentId(9);
        assert!(matches!(
            seed.into_records("company.com"),
            Err(SeedError::UnknownDepartment { department_id: DepartmentId(9), .. })
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut seed = DirectorySeed::from_yaml_str(SEED).unwrap();
        seed.employees[1].first_name = "Thandi".to_string();
        seed.employees[1].last_name = "Mokoena".to_string();
        assert!(matches!(seed.into_records("company.com"), Err(SeedError::DuplicateName { .. })));
    }

    #[test]
    fn test_salary_errors_name_the_employee() {
        let mut seed = DirectorySeed::from_yaml_str(SEED).unwrap();
        seed.employees[1].salary = Decimal::new(-5, 0);
        let err = seed.into_records("company.com").unwrap_err();
        assert!(matches!(err, SeedError::InvalidSalary { employee_id: EmployeeId(2), .. }));
        assert!(err.to_string().starts_with("Seeded employee 2 has an invalid salary"));
    }

    #[test]
    fn test_unknown_manager_and_duplicate_id_rejected() {
        let mut seed = DirectorySeed::from_yaml_str(SEED).unwrap();
        seed.employees[1].manager_id = Some(EmployeeId(40));
        let err = seed.into_records("company.com").unwrap_err();
        assert_eq!(err.to_string(), "Seeded employee 2 references unknown manager 40");

        let mut seed = DirectorySeed::from_yaml_str(SEED).unwrap();
        seed.employees[1].id = EmployeeId(1);
        assert!(matches!(
            seed.into_records("company.com"),
            Err(SeedError::DuplicateEmployee(EmployeeId(1)))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DirectorySeed::from_yaml_file("/nonexistent/orgdir/seed.yaml").unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }
}
