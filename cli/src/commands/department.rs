// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use orgdir_core::application::DirectoryService;
use orgdir_core::domain::employee::DepartmentId;

use crate::output::Output;

#[derive(Subcommand)]
pub enum DepartmentCommand {
    /// Attempt to delete a department (always refused)
    Delete {
        #[arg(value_name = "DEPARTMENT_ID")]
        id: i64,
    },
}

#[derive(Serialize)]
struct DepartmentDeleted {
    department_id: DepartmentId,
}

/// The refusal surfaces as an error; `report_error` renders it in either mode.
pub fn handle_command(command: DepartmentCommand, service: &DirectoryService, output: Output) -> Result<()> {
    match command {
        DepartmentCommand::Delete { id } => {
            let department_id = DepartmentId(id);
            service.delete_department(department_id)?;
            output.emit(&DepartmentDeleted { department_id }, |deleted| {
                println!("Department {} deleted", deleted.department_id);
            })
        }
    }
}
