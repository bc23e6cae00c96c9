// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Read-side use cases: hierarchy, rankings and the merged projection.
//! None of them open a transaction or mutate the store.

use std::sync::Arc;

use tracing::debug;

use crate::domain::employee::EmployeeId;
use crate::domain::error::DirectoryError;
use crate::domain::hierarchy::{resolve_chain, HierarchyLevel};
use crate::domain::projection::DirectoryRow;
use crate::domain::ranking::{compute_rankings, RankedRow};
use crate::domain::repository::DirectoryStore;

pub struct DirectoryQueries {
    store: Arc<dyn DirectoryStore>,
    max_depth: usize,
}

impl DirectoryQueries {
    pub fn new(store: Arc<dyn DirectoryStore>, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Chain of command from `employee_id` (level 1) up to the root.
    pub async fn resolve_hierarchy(&self, employee_id: EmployeeId) -> Result<Vec<HierarchyLevel>, DirectoryError> {
        let rows = self.store.ascend(employee_id, self.max_depth).await?;
        debug!(employee_id = %employee_id, rows = rows.len(), "Ascent returned");
        resolve_chain(employee_id, &rows, self.max_depth)
    }

    pub async fn directory_projection(&self) -> Result<Vec<DirectoryRow>, DirectoryError> {
        Ok(self.store.projection().await?)
    }

    pub async fn compute_rankings(&self) -> Result<Vec<RankedRow>, DirectoryError> {
        let rows = self.store.projection().await?;
        compute_rankings(&rows)
    }
}
