// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Ranking & Contribution
//!
//! Windowed aggregation over the directory projection, partitioned by
//! department:
//!
//! - `contribution_pct`: salary / department total * 100, rounded to two
//!   places, half away from zero.
//! - `rank_in_department`: competition rank by salary descending. Ties share
//!   a rank and the next rank skips (1, 2, 2, 4).

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::employee::{DepartmentId, EmployeeId};
use crate::domain::error::{DirectoryError, EntityKind};
use crate::domain::projection::DirectoryRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department_id: DepartmentId,
    pub department: String,
    pub salary: Decimal,
    pub contribution_pct: Decimal,
    pub rank_in_department: u32,
}

/// Fails with `Integrity` when a department's salary total does not fit in a `Decimal`.
pub fn compute_rankings(rows: &[DirectoryRow]) -> Result<Vec<RankedRow>, DirectoryError> {
    let mut partitions: BTreeMap<DepartmentId, Vec<&DirectoryRow>> = BTreeMap::new();
    for row in rows {
        partitions.entry(row.department_id).or_default().push(row);
    }

    let hundred = Decimal::ONE_HUNDRED;
    let mut ranked = Vec::with_capacity(rows.len());

    for members in partitions.values_mut() {
        members.sort_by(|a, b| b.salary.cmp(&a.salary).then(a.employee_id.cmp(&b.employee_id)));
        let total = members
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.salary))
            .ok_or_else(|| DirectoryError::Integrity {
                entity: EntityKind::Salary,
                id: members[0].department_id.to_string(),
                reason: "department salary total overflows".to_string(),
            })?;

        let mut rank = 0u32;
        let mut previous: Option<Decimal> = None;
        for (position, row) in members.iter().enumerate() {
            if previous != Some(row.salary) {
                rank = position as u32 + 1;
                previous = Some(row.salary);
            }
            let contribution_pct = if total.is_zero() {
                Decimal::ZERO.round_dp(2)
            } else {
                (row.salary / total * hundred)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            };
            ranked.push(RankedRow {
                employee_id: row.employee_id,
                name: row.full_name(),
                department_id: row.department_id,
                department: row.department_name.clone(),
                salary: row.salary,
                contribution_pct,
                rank_in_department: rank,
            });
        }
    }

    ranked.sort_by(|a, b| {
        a.department
            .cmp(&b.department)
            .then(a.department_id.cmp(&b.department_id))
            .then(a.rank_in_department.cmp(&b.rank_in_department))
            .then(a.employee_id.cmp(&b.employee_id))
    });
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row(id: i64, dept: i64, dept_name: &str, salary: &str) -> DirectoryRow {
        DirectoryRow {
            employee_id: EmployeeId(id),
            first_name: format!("F{}", id),
            last_name: format!("L{}", id),
            job_title: "Engineer".to_string(),
            department_id: DepartmentId(dept),
            department_name: dept_name.to_string(),
            manager_id: None,
            manager_first_name: None,
            salary: Decimal::from_str(salary).unwrap(),
        }
    }

    fn find(rows: &[RankedRow], id: i64) -> &RankedRow {
        rows.iter().find(|r| r.employee_id == EmployeeId(id)).unwrap()
    }

    #[test]
    fn test_competition_rank_with_ties() {
        let rows = vec![
            row(1, 1, "Eng", "100"),
            row(2, 1, "Eng", "80"),
            row(3, 1, "Eng", "80"),
            row(4, 1, "Eng", "50"),
        ];
        let ranked = compute_rankings(&rows).unwrap();
        assert_eq!(find(&ranked, 1).rank_in_department, 1);
        assert_eq!(find(&ranked, 2).rank_in_department, 2);
        assert_eq!(find(&ranked, 3).rank_in_department, 2);
        assert_eq!(find(&ranked, 4).rank_in_department, 4);
    }

    #[test]
    fn test_contribution_rounding() {
        let rows = vec![row(1, 1, "Eng", "1"), row(2, 1, "Eng", "1"), row(3, 1, "Eng", "1")];
        let ranked = compute_rankings(&rows).unwrap();
        for r in &ranked {
            assert_eq!(r.contribution_pct, Decimal::from_str("33.33").unwrap());
        }
    }

    #[test]
    fn test_contribution_sums_to_hundred_per_department() {
        let rows = vec![
            row(1, 1, "Eng", "95000"),
            row(2, 1, "Eng", "72000.50"),
            row(3, 1, "Eng", "61000"),
            row(4, 2, "Sales", "35000"),
            row(5, 2, "Sales", "48000"),
        ];
        let ranked = compute_rankings(&rows).unwrap();
        let tolerance = Decimal::from_str("0.1").unwrap();
        for dept in ["Eng", "Sales"] {
            let sum: Decimal = ranked
                .iter()
                .filter(|r| r.department == dept)
                .map(|r| r.contribution_pct)
                .sum();
            assert!((sum - Decimal::ONE_HUNDRED).abs() <= tolerance, "{} sums to {}", dept, sum);
        }
    }

    #[test]
    fn test_zero_total_department() {
        let ranked = compute_rankings(&[row(1, 1, "Unpaid", "0"), row(2, 1, "Unpaid", "0")]).unwrap();
        assert!(ranked.iter().all(|r| r.contribution_pct.is_zero()));
        assert!(ranked.iter().all(|r| r.rank_in_department == 1));
    }

    #[test]
    fn test_output_ordering() {
        let rows = vec![row(1, 2, "Sales", "10"), row(2, 1, "Eng", "5"), row(3, 1, "Eng", "7")];
        let ranked = compute_rankings(&rows).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|r| r.employee_id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_empty_input() {
        assert!(compute_rankings(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_overflowing_department_total_is_an_error() {
        let rows = vec![
            row(1, 1, "Eng", "50000000000000000000000000000"),
            row(2, 1, "Eng", "50000000000000000000000000000"),
        ];
        let err = compute_rankings(&rows).unwrap_err();
        assert!(matches!(err, DirectoryError::Integrity { entity: EntityKind::Salary, .. }));
    }
}
