// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Directory Projection
//!
//! Read-only merged view: employee attributes, manager first name,
//! department name and salary. Department and salary are inner joins;
//! the manager is a left join so the root keeps its row.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::employee::{Department, DepartmentId, Employee, EmployeeId, SalaryRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRow {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub department_id: DepartmentId,
    pub department_name: String,
    pub manager_id: Option<EmployeeId>,
    pub manager_first_name: Option<String>,
    pub salary: Decimal,
}

impl DirectoryRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn build_projection<'a>(
    employees: impl IntoIterator<Item = &'a Employee>,
    departments: impl IntoIterator<Item = &'a Department>,
    salaries: impl IntoIterator<Item = &'a SalaryRecord>,
) -> Vec<DirectoryRow> {
    let employees: Vec<&Employee> = employees.into_iter().collect();
    let by_id: HashMap<EmployeeId, &Employee> = employees.iter().map(|e| (e.id, *e)).collect();
    let departments: HashMap<DepartmentId, &Department> =
        departments.into_iter().map(|d| (d.id, d)).collect();
    let salaries: HashMap<EmployeeId, Decimal> =
        salaries.into_iter().map(|s| (s.employee_id, s.amount)).collect();

    let mut rows: Vec<DirectoryRow> = employees
        .iter()
        .filter_map(|e| {
            let department = departments.get(&e.department_id)?;
            let salary = salaries.get(&e.id)?;
            let manager_first_name = e
                .manager_id
                .and_then(|m| by_id.get(&m))
                .map(|m| m.first_name.clone());
            Some(DirectoryRow {
                employee_id: e.id,
                first_name: e.first_name.clone(),
                last_name: e.last_name.clone(),
                job_title: e.job_title.clone(),
                department_id: e.department_id,
                department_name: department.name.clone(),
                manager_id: e.manager_id,
                manager_first_name,
                salary: *salary,
            })
        })
        .collect();

    rows.sort_by_key(|r| r.employee_id);
    rows
}
