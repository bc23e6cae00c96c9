// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides the directory domain model.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Entities, store contract, policies and pure algorithms

pub mod employee;
pub mod error;
pub mod repository;
pub mod policy;
pub mod hierarchy;
pub mod projection;
pub mod ranking;
pub mod events;
pub mod config;
