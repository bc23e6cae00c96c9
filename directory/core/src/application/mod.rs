// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod admission;
pub mod deletion;
pub mod guard;
pub mod schema_admin;
pub mod queries;
pub mod directory_service;
pub mod repository_factory;

// Re-export use cases for convenience
pub use admission::{AdmitEmployeeUseCase, AdmittedEmployee, StandardAdmitEmployeeUseCase};
pub use deletion::{DeleteEmployeeUseCase, DeletionPipeline, DeletionReport, DeletionStep};
pub use directory_service::DirectoryService;
