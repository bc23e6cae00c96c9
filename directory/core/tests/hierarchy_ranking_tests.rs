// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;

use common::{dec, sanele, seeded_service, service_over};
use orgdir_core::domain::employee::EmployeeId;
use orgdir_core::domain::error::{DirectoryError, EntityKind};
use orgdir_core::infrastructure::repositories::InMemoryDirectoryStore;
use orgdir_core::infrastructure::seed::DirectorySeed;

#[tokio::test]
async fn test_hierarchy_levels_increase_to_root() {
    let (service, _store) = seeded_service();

    let chain = service.resolve_hierarchy(EmployeeId(10)).await.unwrap();

    let ids: Vec<i64> = chain.iter().map(|l| l.employee_id.0).collect();
    assert_eq!(ids, vec![10, 9, 2, 1]);
    for (index, level) in chain.iter().enumerate() {
        assert_eq!(level.level, index as u32 + 1);
    }
    assert_eq!(chain[0].name, "Zanele Khumalo");
    assert_eq!(chain[3].name, "Thandiwe Mokoena");
}

#[tokio::test]
async fn test_hierarchy_of_new_hire() {
    let (service, _store) = seeded_service();
    service.insert_employee(sanele()).await.unwrap();

    let chain = service.resolve_hierarchy(EmployeeId(16)).await.unwrap();

    let ids: Vec<i64> = chain.iter().map(|l| l.employee_id.0).collect();
    assert_eq!(ids, vec![16, 2, 1]);
}

#[tokio::test]
async fn test_hierarchy_of_unknown_employee() {
    let (service, _store) = seeded_service();

    let err = service.resolve_hierarchy(EmployeeId(77)).await.unwrap_err();

    assert!(matches!(err, DirectoryError::NotFound { entity: EntityKind::Employee, .. }));
}

#[tokio::test]
async fn test_hierarchy_cycle_detected() {
    let seed = r#"
departments:
  - { id: 1, name: Ops }
employees:
  - { id: 1, first_name: Ada, last_name: One, job_title: Lead, department_id: 1, manager_id: 3, phone: "1", salary: "10" }
  - { id: 2, first_name: Ben, last_name: Two, job_title: Lead, department_id: 1, manager_id: 1, phone: "2", salary: "10" }
  - { id: 3, first_name: Cy, last_name: Three, job_title: Lead, department_id: 1, manager_id: 2, phone: "3", salary: "10" }
"#;
    let records = DirectorySeed::from_yaml_str(seed)
        .unwrap()
        .into_records("company.com")
        .unwrap();
    let service = service_over(Arc::new(InMemoryDirectoryStore::from_records(records)));

    let err = service.resolve_hierarchy(EmployeeId(2)).await.unwrap_err();

    match err {
        DirectoryError::CycleDetected { employee_id, chain } => {
            assert_eq!(employee_id, EmployeeId(2));
            assert_eq!(chain, vec![EmployeeId(2), EmployeeId(1), EmployeeId(3), EmployeeId(2)]);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_rankings_sum_to_hundred_per_department() {
    let (service, _store) = seeded_service();

    let rankings = service.compute_rankings().await.unwrap();
    assert_eq!(rankings.len(), 15);

    let mut departments: Vec<_> = rankings.iter().map(|r| r.department_id).collect();
    departments.dedup();
    for department in departments {
        let total: Decimal = rankings
            .iter()
            .filter(|r| r.department_id == department)
            .map(|r| r.contribution_pct)
            .sum();
        assert!((total - dec("100")).abs() <= dec("0.1"), "department {} sums to {}", department, total);
    }
}

#[tokio::test]
async fn test_rankings_share_rank_on_tied_salary() {
    let (service, _store) = seeded_service();

    let rankings = service.compute_rankings().await.unwrap();
    let engineering: Vec<_> = rankings.iter().filter(|r| r.department == "Engineering").collect();

    let ranks: Vec<(i64, u32)> = engineering
        .iter()
        .map(|r| (r.employee_id.0, r.rank_in_department))
        .collect();
    assert_eq!(ranks, vec![(3, 1), (6, 2), (7, 3), (8, 3)]);

    // 85000 / 465000
    assert_eq!(engineering[2].contribution_pct, dec("18.28"));
    assert_eq!(engineering[3].contribution_pct, dec("18.28"));
}

#[tokio::test]
async fn test_rankings_grouped_by_department_name() {
    let (service, _store) = seeded_service();

    let rankings = service.compute_rankings().await.unwrap();
    let mut names: Vec<&str> = rankings.iter().map(|r| r.department.as_str()).collect();
    names.dedup();

    assert_eq!(
        names,
        vec!["Engineering", "Executive", "Finance", "Human Resources", "Operations"]
    );
}

#[tokio::test]
async fn test_projection_includes_manager_first_name() {
    let (service, _store) = seeded_service();

    let rows = service.directory_projection().await.unwrap();

    assert_eq!(rows.len(), 15);
    assert_eq!(rows[0].manager_first_name, None);
    let row = rows.iter().find(|r| r.employee_id == EmployeeId(6)).unwrap();
    assert_eq!(row.manager_first_name.as_deref(), Some("Aisha"));
    assert_eq!(row.department_name, "Engineering");
    assert_eq!(row.salary, dec("110000"));
}
