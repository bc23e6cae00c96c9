// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Hierarchy Resolution
//!
//! Turns the rows returned by `DirectoryStore::ascend` into a chain of
//! command. The store walks the manager relation; this module checks the
//! walk: every step must follow the previous row's manager reference, no
//! id may appear twice, and the chain may not exceed the depth bound.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::error::{DirectoryError, EntityKind};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLevel {
    pub employee_id: EmployeeId,
    pub name: String,
    /// 1 for the starting employee, root last.
    pub level: u32,
}

pub fn resolve_chain(
    seed: EmployeeId,
    rows: &[Employee],
    max_depth: usize,
) -> Result<Vec<HierarchyLevel>, DirectoryError> {
    let first = rows
        .first()
        .ok_or_else(|| DirectoryError::not_found(EntityKind::Employee, seed))?;
    if first.id != seed {
        return Err(DirectoryError::Integrity {
            entity: EntityKind::Employee,
            id: seed.to_string(),
            reason: format!("ascent started at employee {} instead", first.id),
        });
    }

    let mut seen = HashSet::new();
    let mut chain = Vec::with_capacity(rows.len());
    let mut expected = Some(seed);

    for row in rows {
        match expected {
            Some(id) if id == row.id => {}
            // Walk already reached a root or a dangling reference.
            None => break,
            Some(id) => {
                return Err(DirectoryError::Integrity {
                    entity: EntityKind::Employee,
                    id: id.to_string(),
                    reason: format!("ascent returned employee {} out of order", row.id),
                })
            }
        }

        if !seen.insert(row.id) || chain.len() >= max_depth {
            let mut ids: Vec<EmployeeId> = chain.iter().map(|l: &HierarchyLevel| l.employee_id).collect();
            ids.push(row.id);
            return Err(DirectoryError::CycleDetected {
                employee_id: seed,
                chain: ids,
            });
        }

        chain.push(HierarchyLevel {
            employee_id: row.id,
            name: row.full_name(),
            level: chain.len() as u32 + 1,
        });
        expected = row.manager_id;
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::DepartmentId;

    fn emp(id: i64, manager: Option<i64>) -> Employee {
        Employee {
            id: EmployeeId(id),
            first_name: format!("F{}", id),
            last_name: format!("L{}", id),
            job_title: "Engineer".to_string(),
            department_id: DepartmentId(1),
            manager_id: manager.map(EmployeeId),
        }
    }

    #[test]
    fn test_chain_to_root() {
        let rows = vec![emp(16, Some(2)), emp(2, Some(1)), emp(1, None)];
        let chain = resolve_chain(EmployeeId(16), &rows, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].name, "F16 L16");
        assert_eq!(chain[0].level, 1);
        assert_eq!(chain[2].employee_id, EmployeeId(1));
        assert_eq!(chain[2].level, 3);
    }

    #[test]
    fn test_root_alone() {
        let chain = resolve_chain(EmployeeId(1), &[emp(1, None)], DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0].level, 1);
    }

    #[test]
    fn test_dangling_manager_ends_chain() {
        let rows = vec![emp(5, Some(4)), emp(4, Some(99))];
        let chain = resolve_chain(EmployeeId(5), &rows, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_revisit_is_cycle() {
        let rows = vec![emp(3, Some(4)), emp(4, Some(3)), emp(3, Some(4))];
        let err = resolve_chain(EmployeeId(3), &rows, DEFAULT_MAX_DEPTH).unwrap_err();
        match err {
            DirectoryError::CycleDetected { employee_id, chain } => {
                assert_eq!(employee_id, EmployeeId(3));
                assert_eq!(chain, vec![EmployeeId(3), EmployeeId(4), EmployeeId(3)]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_depth_bound_is_cycle() {
        let rows = vec![emp(3, Some(2)), emp(2, Some(1)), emp(1, None)];
        let err = resolve_chain(EmployeeId(3), &rows, 2).unwrap_err();
        assert!(matches!(err, DirectoryError::CycleDetected { .. }));
    }

    #[test]
    fn test_empty_rows_is_not_found() {
        let err = resolve_chain(EmployeeId(42), &[], DEFAULT_MAX_DEPTH).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound { .. }));
    }
}
