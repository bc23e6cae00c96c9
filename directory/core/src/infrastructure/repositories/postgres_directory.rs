// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Directory Store
//!
//! Production `DirectoryStore` backed by the `departments`, `employees`,
//! `salaries`, `contacts` and `archived_employees` tables (see
//! `migrations/`). Transactions are `sqlx::Transaction`s; dropping one
//! without commit rolls it back. Employee ids come from the
//! `employees_id_seq` sequence, so concurrent admissions never share an id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Postgres, Row, Transaction};

use crate::domain::employee::{
    ArchivedEmployee, ContactRecord, Department, DepartmentId, Employee, EmployeeId, SalaryRecord,
};
use crate::domain::policy::SchemaCommand;
use crate::domain::projection::DirectoryRow;
use crate::domain::repository::{DirectoryStore, DirectoryTransaction, RepositoryError};
use crate::infrastructure::seed::SeedRecords;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, job_title, department_id, manager_id";

pub struct PostgresDirectoryStore {
    pool: PgPool,
}

impl PostgresDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write seed records with their given ids and move the sequence past them.
    pub async fn load_seed(&self, records: &SeedRecords) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for department in &records.departments {
            sqlx::query("INSERT INTO departments (id, name) VALUES ($1, $2)")
                .bind(department.id.0)
                .bind(&department.name)
                .execute(&mut *tx)
                .await?;
        }
        for employee in &records.employees {
            sqlx::query(
                r#"
                INSERT INTO employees (id, first_name, last_name, job_title, department_id, manager_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(employee.id.0)
            .bind(&employee.first_name)
            .bind(&employee.last_name)
            .bind(&employee.job_title)
            .bind(employee.department_id.0)
            .bind(employee.manager_id.map(|m| m.0))
            .execute(&mut *tx)
            .await?;
        }
        for salary in &records.salaries {
            sqlx::query("INSERT INTO salaries (employee_id, amount) VALUES ($1, $2)")
                .bind(salary.employee_id.0)
                .bind(salary.amount)
                .execute(&mut *tx)
                .await?;
        }
        for contact in &records.contacts {
            sqlx::query("INSERT INTO contacts (employee_id, phone, email) VALUES ($1, $2, $3)")
                .bind(contact.employee_id.0)
                .bind(&contact.phone)
                .bind(&contact.email)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            SELECT setval('employees_id_seq', GREATEST(MAX(id), 1), MAX(id) IS NOT NULL)
            FROM employees
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

fn employee_from_row(row: &PgRow) -> Result<Employee, RepositoryError> {
    let manager_id: Option<i64> = row.try_get("manager_id")?;
    Ok(Employee {
        id: EmployeeId(row.try_get("id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        job_title: row.try_get("job_title")?,
        department_id: DepartmentId(row.try_get("department_id")?),
        manager_id: manager_id.map(EmployeeId),
    })
}

fn department_from_row(row: &PgRow) -> Result<Department, RepositoryError> {
    Ok(Department {
        id: DepartmentId(row.try_get("id")?),
        name: row.try_get("name")?,
    })
}

fn archive_from_row(row: &PgRow) -> Result<ArchivedEmployee, RepositoryError> {
    let manager_id: Option<i64> = row.try_get("manager_id")?;
    let archived_at: DateTime<Utc> = row.try_get("archived_at")?;
    Ok(ArchivedEmployee {
        employee_id: EmployeeId(row.try_get("employee_id")?),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        job_title: row.try_get("job_title")?,
        department_id: DepartmentId(row.try_get("department_id")?),
        manager_id: manager_id.map(EmployeeId),
        archived_at,
    })
}

#[async_trait]
impl DirectoryStore for PostgresDirectoryStore {
    async fn begin(&self) -> Result<Box<dyn DirectoryTransaction>, RepositoryError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresTransaction { tx }))
    }

    async fn find_employee(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, RepositoryError> {
        let rows = sqlx::query(&format!("SELECT {} FROM employees ORDER BY id", EMPLOYEE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(employee_from_row).collect()
    }

    async fn find_department(&self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        let row = sqlx::query("SELECT id, name FROM departments WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(department_from_row).transpose()
    }

    async fn list_departments(&self) -> Result<Vec<Department>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(department_from_row).collect()
    }

    async fn find_salary(&self, employee_id: EmployeeId) -> Result<Option<SalaryRecord>, RepositoryError> {
        let amount: Option<Decimal> =
            sqlx::query_scalar("SELECT amount FROM salaries WHERE employee_id = $1")
                .bind(employee_id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(amount.map(|amount| SalaryRecord { employee_id, amount }))
    }

    async fn find_contact(&self, employee_id: EmployeeId) -> Result<Option<ContactRecord>, RepositoryError> {
        let row = sqlx::query("SELECT phone, email FROM contacts WHERE employee_id = $1")
            .bind(employee_id.0)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(ContactRecord {
                employee_id,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
            })),
            None => Ok(None),
        }
    }

    async fn list_archive(&self) -> Result<Vec<ArchivedEmployee>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT employee_id, first_name, last_name, job_title, department_id, manager_id, archived_at
            FROM archived_employees
            ORDER BY employee_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(archive_from_row).collect()
    }

    async fn projection(&self) -> Result<Vec<DirectoryRow>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.job_title,
                   e.department_id, d.name AS department_name,
                   e.manager_id, m.first_name AS manager_first_name,
                   s.amount AS salary
            FROM employees e
            JOIN departments d ON d.id = e.department_id
            JOIN salaries s ON s.employee_id = e.id
            LEFT JOIN employees m ON m.id = e.manager_id
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<DirectoryRow, RepositoryError> {
                let manager_id: Option<i64> = row.try_get("manager_id")?;
                Ok(DirectoryRow {
                    employee_id: EmployeeId(row.try_get("id")?),
                    first_name: row.try_get("first_name")?,
                    last_name: row.try_get("last_name")?,
                    job_title: row.try_get("job_title")?,
                    department_id: DepartmentId(row.try_get("department_id")?),
                    department_name: row.try_get("department_name")?,
                    manager_id: manager_id.map(EmployeeId),
                    manager_first_name: row.try_get("manager_first_name")?,
                    salary: row.try_get("salary")?,
                })
            })
            .collect()
    }

    async fn ascend(&self, seed: EmployeeId, max_depth: usize) -> Result<Vec<Employee>, RepositoryError> {
        // UNION ALL keeps revisited rows so the resolver can see the cycle;
        // the depth predicate bounds the recursion.
        let rows = sqlx::query(
            r#"
            WITH RECURSIVE chain AS (
                SELECT id, first_name, last_name, job_title, department_id, manager_id, 1 AS depth
                FROM employees
                WHERE id = $1
                UNION ALL
                SELECT e.id, e.first_name, e.last_name, e.job_title, e.department_id, e.manager_id,
                       c.depth + 1
                FROM employees e
                JOIN chain c ON e.id = c.manager_id
                WHERE c.depth <= $2
            )
            SELECT id, first_name, last_name, job_title, department_id, manager_id
            FROM chain
            ORDER BY depth
            "#,
        )
        .bind(seed.0)
        .bind(i32::try_from(max_depth).unwrap_or(i32::MAX))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(employee_from_row).collect()
    }

    async fn apply_schema_command(&self, command: &SchemaCommand) -> Result<(), RepositoryError> {
        let sql = command.to_sql();
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

struct PostgresTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl DirectoryTransaction for PostgresTransaction {
    async fn allocate_employee_id(&mut self) -> Result<EmployeeId, RepositoryError> {
        let id: i64 = sqlx::query_scalar("SELECT nextval('employees_id_seq')")
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(EmployeeId(id))
    }

    async fn max_department_id(&mut self) -> Result<Option<DepartmentId>, RepositoryError> {
        let max: Option<i64> = sqlx::query_scalar("SELECT MAX(id) FROM departments")
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(max.map(DepartmentId))
    }

    async fn find_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE id = $1 FOR UPDATE",
            EMPLOYEE_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_employee_by_name(
        &mut self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM employees WHERE first_name = $1 AND last_name = $2",
            EMPLOYEE_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn find_department(&mut self, id: DepartmentId) -> Result<Option<Department>, RepositoryError> {
        let row = sqlx::query("SELECT id, name FROM departments WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&mut *self.tx)
            .await?;
        row.as_ref().map(department_from_row).transpose()
    }

    async fn insert_employee(&mut self, employee: &Employee) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO employees (id, first_name, last_name, job_title, department_id, manager_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employee.id.0)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.job_title)
        .bind(employee.department_id.0)
        .bind(employee.manager_id.map(|m| m.0))
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn insert_salary(&mut self, salary: &SalaryRecord) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO salaries (employee_id, amount) VALUES ($1, $2)")
            .bind(salary.employee_id.0)
            .bind(salary.amount)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn insert_contact(&mut self, contact: &ContactRecord) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO contacts (employee_id, phone, email) VALUES ($1, $2, $3)")
            .bind(contact.employee_id.0)
            .bind(&contact.phone)
            .bind(&contact.email)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn delete_contact(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM contacts WHERE employee_id = $1")
            .bind(employee_id.0)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_salary(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM salaries WHERE employee_id = $1")
            .bind(employee_id.0)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let row = sqlx::query(&format!(
            "DELETE FROM employees WHERE id = $1 RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.as_ref().map(employee_from_row).transpose()
    }

    async fn archive_exists(&mut self, employee_id: EmployeeId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM archived_employees WHERE employee_id = $1)",
        )
        .bind(employee_id.0)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn insert_archive(&mut self, archived: &ArchivedEmployee) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO archived_employees (
                employee_id, first_name, last_name, job_title, department_id, manager_id, archived_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(archived.employee_id.0)
        .bind(&archived.first_name)
        .bind(&archived.last_name)
        .bind(&archived.job_title)
        .bind(archived.department_id.0)
        .bind(archived.manager_id.map(|m| m.0))
        .bind(archived.archived_at)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
