// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Employee commands: add, delete, show

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::employee::{
    ContactRecord, DepartmentId, Employee, EmployeeId, NewEmployee, SalaryRecord,
};
use orgdir_core::domain::error::{DirectoryError, EntityKind};

use crate::output::Output;

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Admit a new employee with salary and contact records
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        job_title: String,

        /// Department id (must already exist)
        #[arg(long, value_name = "ID")]
        department: i64,

        /// Manager id (omit for a root employee)
        #[arg(long, value_name = "ID")]
        manager: Option<i64>,

        /// Annual salary, non-negative
        #[arg(long)]
        salary: Decimal,
    },

    /// Delete an employee and archive it
    Delete {
        #[arg(value_name = "EMPLOYEE_ID")]
        id: i64,
    },

    /// Show an employee with salary and contact
    Show {
        #[arg(value_name = "EMPLOYEE_ID")]
        id: i64,
    },
}

#[derive(Serialize)]
struct EmployeeDetails {
    employee: Employee,
    salary: Option<SalaryRecord>,
    contact: Option<ContactRecord>,
}

pub async fn handle_command(command: EmployeeCommand, service: &DirectoryService, output: Output) -> Result<()> {
    match command {
        EmployeeCommand::Add {
            first_name,
            last_name,
            phone,
            job_title,
            department,
            manager,
            salary,
        } => {
            let candidate = NewEmployee {
                first_name,
                last_name,
                phone,
                job_title,
                department_id: DepartmentId(department),
                manager_id: manager.map(EmployeeId),
                salary,
            };
            add(candidate, service, output).await
        }
        EmployeeCommand::Delete { id } => delete(EmployeeId(id), service, output).await,
        EmployeeCommand::Show { id } => show(EmployeeId(id), service, output).await,
    }
}

async fn add(candidate: NewEmployee, service: &DirectoryService, output: Output) -> Result<()> {
    let admitted = service.insert_employee(candidate).await?;

    output.emit(&admitted, |admitted| {
        println!(
            "{}",
            format!(
                "✓ Employee {} admitted: {}",
                admitted.employee.id,
                admitted.employee.full_name()
            )
            .green()
        );
        println!("  Email:  {}", admitted.contact.email);
        println!("  Phone:  {}", admitted.contact.phone);
        println!("  Salary: {}", admitted.salary.amount);
    })
}

async fn delete(id: EmployeeId, service: &DirectoryService, output: Output) -> Result<()> {
    let report = service.delete_employee(id).await?;

    output.emit(&report, |report| {
        println!(
            "{}",
            format!("✓ Employee {} deleted and archived", report.archived.employee_id).green()
        );
        println!("  Archived at: {}", report.archived.archived_at.to_rfc3339());
        let steps: Vec<String> = report.steps.iter().map(|s| s.to_string()).collect();
        println!("  Steps: {}", steps.join(" -> ").dimmed());
    })
}

async fn show(id: EmployeeId, service: &DirectoryService, output: Output) -> Result<()> {
    let store = service.store();
    let employee = store
        .find_employee(id)
        .await?
        .ok_or_else(|| DirectoryError::not_found(EntityKind::Employee, id))?;
    let details = EmployeeDetails {
        salary: store.find_salary(id).await?,
        contact: store.find_contact(id).await?,
        employee,
    };

    output.emit(&details, |details| {
        let e = &details.employee;
        println!("{} {}", e.id.to_string().bold(), e.full_name().bold());
        println!("  Title:      {}", e.job_title);
        println!("  Department: {}", e.department_id);
        match e.manager_id {
            Some(manager) => println!("  Manager:    {}", manager),
            None => println!("  Manager:    {}", "(root)".dimmed()),
        }
        if let Some(salary) = &details.salary {
            println!("  Salary:     {}", salary.amount);
        }
        if let Some(contact) = &details.contact {
            println!("  Email:      {}", contact.email);
            println!("  Phone:      {}", contact.phone);
        }
    })
}
