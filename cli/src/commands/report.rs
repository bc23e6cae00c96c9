// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Read-only reports: hierarchy, rankings, projection, archive

use anyhow::Result;
use colored::Colorize;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::employee::EmployeeId;

use crate::output::Output;

pub async fn hierarchy(id: i64, service: &DirectoryService, output: Output) -> Result<()> {
    let chain = service.resolve_hierarchy(EmployeeId(id)).await?;

    output.emit(&chain, |chain| {
        println!("{:<6} {:<6} {}", "LEVEL", "ID", "NAME");
        for level in chain {
            let name = if level.level == 1 {
                level.name.bold().to_string()
            } else {
                level.name.clone()
            };
            println!("{:<6} {:<6} {}", level.level, level.employee_id, name);
        }
    })
}

pub async fn rankings(service: &DirectoryService, output: Output) -> Result<()> {
    let rows = service.compute_rankings().await?;

    output.emit(&rows, |rows| {
        if rows.is_empty() {
            println!("{}", "No employees with salary records".yellow());
            return;
        }
        println!(
            "{:<20} {:<5} {:<6} {:<28} {:>12} {:>8}",
            "DEPARTMENT", "RANK", "ID", "NAME", "SALARY", "SHARE %"
        );
        let mut current = None;
        for row in rows {
            if current != Some(row.department_id) {
                if current.is_some() {
                    println!();
                }
                current = Some(row.department_id);
            }
            println!(
                "{:<20} {:<5} {:<6} {:<28} {:>12} {:>8}",
                row.department, row.rank_in_department, row.employee_id, row.name, row.salary, row.contribution_pct
            );
        }
    })
}

pub async fn projection(service: &DirectoryService, output: Output) -> Result<()> {
    let rows = service.directory_projection().await?;

    output.emit(&rows, |rows| {
        println!(
            "{:<6} {:<28} {:<28} {:<18} {:<12} {:>12}",
            "ID", "NAME", "TITLE", "DEPARTMENT", "MANAGER", "SALARY"
        );
        for row in rows {
            println!(
                "{:<6} {:<28} {:<28} {:<18} {:<12} {:>12}",
                row.employee_id,
                row.full_name(),
                row.job_title,
                row.department_name,
                row.manager_first_name.as_deref().unwrap_or("-"),
                row.salary
            );
        }
    })
}

pub async fn archive(service: &DirectoryService, output: Output) -> Result<()> {
    let archived = service.list_archive().await?;

    output.emit(&archived, |archived| {
        if archived.is_empty() {
            println!("{}", "Archive is empty".yellow());
            return;
        }
        println!(
            "{:<6} {:<28} {:<24} {:<6} {:<8} {}",
            "ID", "NAME", "TITLE", "DEPT", "MANAGER", "ARCHIVED AT"
        );
        for entry in archived {
            println!(
                "{:<6} {:<28} {:<24} {:<6} {:<8} {}",
                entry.employee_id,
                format!("{} {}", entry.first_name, entry.last_name),
                entry.job_title,
                entry.department_id,
                entry.manager_id.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()),
                entry.archived_at.to_rfc3339()
            );
        }
    })
}
