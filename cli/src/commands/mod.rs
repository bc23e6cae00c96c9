// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the orgdir CLI

pub mod config;
pub mod department;
pub mod employee;
pub mod report;
pub mod schema;
pub mod seed;

pub use self::config::ConfigCommand;
pub use self::department::DepartmentCommand;
pub use self::employee::EmployeeCommand;
pub use self::schema::SchemaArgs;
