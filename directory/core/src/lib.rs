// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Lib
//!
//! Directory integrity and hierarchy engine.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Validation, cascading deletion, guard policies, hierarchy
//!   resolution and salary ranking over the employee directory

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
