//! Governed workflow integration tests
//!
//! Exercises the public service API end to end:
//! - Client lifecycle with one audit entry per mutation
//! - Approval sequence, terminal rejection, refusal below admin
//! - Audit gap surfaced when the audit write fails after a committed write
//! - Audit rows cannot be updated or deleted
//! - Attendance check-in idempotency per calendar day

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;

use hlm_config::AuthConfig;
use hlm_core::entities::{NewClient, NewProject, NewServiceOffering, NewTask};
use hlm_core::enums::{
    ApprovalStatus, AttendanceStatus, AuditAction, ClientStatus, GovernedTable, Role,
};
use hlm_core::identity::Actor;
use hlm_db::repos::audit::AuditFilter;
use hlm_db::updates::client::ClientUpdateBuilder;
use hlm_db::{DatabaseError, ErrorKind, HlmService};

struct Team {
    owner: Actor,
    admin: Actor,
    employee: Actor,
}

async fn test_service() -> HlmService {
    HlmService::new_local(
        ":memory:",
        AuthConfig {
            pbkdf2_iterations: 1_000,
            session_ttl_hours: 12,
        },
    )
    .await
    .unwrap()
}

async fn seed_team(svc: &HlmService) -> Team {
    let owner = svc
        .sign_up("owner@hlm.test", "correct horse", "Owner")
        .await
        .unwrap();
    let admin = svc
        .sign_up("sari@hlm.test", "correct horse", "Sari")
        .await
        .unwrap();
    let employee = svc
        .sign_up("budi@hlm.test", "correct horse", "Budi")
        .await
        .unwrap();
    let owner = Actor::new(owner.profile.user_id, owner.role);
    let admin = svc
        .set_role(&owner, &admin.profile.user_id, Role::Admin)
        .await
        .unwrap();
    Team {
        owner,
        admin: Actor::new(admin.profile.user_id, admin.role),
        employee: Actor::new(employee.profile.user_id, employee.role),
    }
}

async fn audit_count(svc: &HlmService, reader: &Actor) -> usize {
    svc.query_audit(
        reader,
        &AuditFilter {
            limit: Some(10_000),
            ..AuditFilter::default()
        },
    )
    .await
    .unwrap()
    .len()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn client_create_edit_delete_is_fully_audited() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;

    let client = svc
        .create_client(
            &team.employee,
            NewClient {
                client_id: "CLT-001".into(),
                brand_name: "Acme".into(),
                status: ClientStatus::Lead,
                ..NewClient::default()
            },
        )
        .await
        .unwrap();

    let listed = svc.list_clients(None, 50).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].client_id, "CLT-001");
    assert_eq!(listed[0].brand_name, "Acme");
    assert_eq!(listed[0].status, ClientStatus::Lead);

    svc.update_client(
        &team.employee,
        &client.id,
        ClientUpdateBuilder::new().status(ClientStatus::Active).build(),
    )
    .await
    .unwrap();
    svc.delete_client(&team.employee, &client.id).await.unwrap();
    assert!(svc.list_clients(None, 50).await.unwrap().is_empty());

    let mut trail = svc
        .query_audit(
            &team.admin,
            &AuditFilter {
                table: Some(GovernedTable::Clients),
                record_id: Some(client.id.clone()),
                ..AuditFilter::default()
            },
        )
        .await
        .unwrap();
    trail.reverse();
    let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Insert, AuditAction::Update, AuditAction::Delete]
    );
    assert!(trail.iter().all(|e| e.user_id == team.employee.user_id));

    let update = &trail[1];
    assert_eq!(update.old_values.as_ref().unwrap()["status"], "lead");
    assert_eq!(update.new_values.as_ref().unwrap()["status"], "active");
    assert!(trail[2].new_values.is_none());
}

#[tokio::test]
async fn each_successful_mutation_adds_exactly_one_entry() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let baseline = audit_count(&svc, &team.owner).await;

    let client = svc
        .create_client(
            &team.employee,
            NewClient {
                client_id: "CLT-002".into(),
                brand_name: "Kopi".into(),
                ..NewClient::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(audit_count(&svc, &team.owner).await, baseline + 1);

    let project = svc
        .create_project(
            &team.employee,
            NewProject {
                project_id: "PRJ-002".into(),
                name: "Launch".into(),
                client_id: Some(client.id.clone()),
                ..NewProject::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(audit_count(&svc, &team.owner).await, baseline + 2);

    let task = svc
        .create_task(
            &team.employee,
            NewTask {
                project_id: project.id.clone(),
                title: "Teaser".into(),
                ..NewTask::default()
            },
        )
        .await
        .unwrap();
    svc.advance_approval(&team.admin, &task.id).await.unwrap();
    assert_eq!(audit_count(&svc, &team.owner).await, baseline + 4);

    // A refused mutation leaves no trace.
    let _ = svc.advance_approval(&team.employee, &task.id).await;
    assert_eq!(audit_count(&svc, &team.owner).await, baseline + 4);
}

// ---------------------------------------------------------------------------
// Approval workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approval_runs_forward_to_published_only() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let project = svc
        .create_project(
            &team.employee,
            NewProject {
                project_id: "PRJ-003".into(),
                name: "Ramadan".into(),
                ..NewProject::default()
            },
        )
        .await
        .unwrap();
    let task = svc
        .create_task(
            &team.employee,
            NewTask {
                project_id: project.id.clone(),
                title: "Hero video".into(),
                ..NewTask::default()
            },
        )
        .await
        .unwrap();

    let mut seen = vec![task.approval_status];
    for _ in 0..6 {
        seen.push(
            svc.advance_approval(&team.admin, &task.id)
                .await
                .unwrap()
                .approval_status,
        );
    }
    assert_eq!(seen, ApprovalStatus::SEQUENCE.to_vec());

    let err = svc.advance_approval(&team.owner, &task.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    assert_eq!(
        svc.get_task(&task.id).await.unwrap().approval_status,
        ApprovalStatus::Published
    );
}

#[tokio::test]
async fn employee_advance_is_an_authorization_error() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let project = svc
        .create_project(
            &team.employee,
            NewProject {
                project_id: "PRJ-004".into(),
                name: "Merdeka".into(),
                ..NewProject::default()
            },
        )
        .await
        .unwrap();
    let task = svc
        .create_task(
            &team.employee,
            NewTask {
                project_id: project.id,
                title: "Carousel".into(),
                ..NewTask::default()
            },
        )
        .await
        .unwrap();

    let err = svc
        .advance_approval(&team.employee, &task.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert_eq!(
        svc.get_task(&task.id).await.unwrap().approval_status,
        ApprovalStatus::Draft
    );
}

// ---------------------------------------------------------------------------
// Audit log guarantees
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_audit_write_surfaces_as_gap_after_commit() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let client = svc
        .create_client(
            &team.employee,
            NewClient {
                client_id: "CLT-005".into(),
                brand_name: "Batik".into(),
                ..NewClient::default()
            },
        )
        .await
        .unwrap();

    svc.db()
        .conn()
        .execute("DROP TABLE audit_log", ())
        .await
        .unwrap();

    let err = svc
        .update_client(
            &team.employee,
            &client.id,
            ClientUpdateBuilder::new().status(ClientStatus::Active).build(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuditGap);
    assert!(
        matches!(err, DatabaseError::AuditGap { ref record_id, .. } if *record_id == client.id)
    );

    // The data write itself committed.
    assert_eq!(
        svc.get_client(&client.id).await.unwrap().status,
        ClientStatus::Active
    );
}

#[tokio::test]
async fn audit_rows_cannot_be_changed_or_removed() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let before = audit_count(&svc, &team.owner).await;
    assert!(before > 0);

    let conn = svc.db().conn();
    assert!(
        conn.execute("UPDATE audit_log SET user_id = 'usr-forged'", ())
            .await
            .is_err()
    );
    assert!(conn.execute("DELETE FROM audit_log", ()).await.is_err());
    assert_eq!(audit_count(&svc, &team.owner).await, before);
}

#[tokio::test]
async fn employees_cannot_read_the_trail() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let err = svc
        .query_audit(&team.employee, &AuditFilter::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_in_twice_same_day_keeps_one_record() {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let nine = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    let eleven = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();

    let (record, created) = svc
        .check_in(&team.employee, nine, AttendanceStatus::Present, None)
        .await
        .unwrap();
    assert!(created);
    let (again, created) = svc
        .check_in(&team.employee, eleven, AttendanceStatus::Present, None)
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(again.id, record.id);
    assert_eq!(again.check_in, Some(nine));

    let day = svc.today_attendance(nine.date_naive()).await.unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].full_name.as_deref(), Some("Budi"));
}

// ---------------------------------------------------------------------------
// Mutation guard per role
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
enum Who {
    Owner,
    Admin,
    Employee,
}

impl Team {
    const fn pick(&self, who: Who) -> &Actor {
        match who {
            Who::Owner => &self.owner,
            Who::Admin => &self.admin,
            Who::Employee => &self.employee,
        }
    }
}

#[rstest]
#[case(Who::Owner, true)]
#[case(Who::Admin, false)]
#[case(Who::Employee, true)]
#[tokio::test]
async fn project_creation_follows_policy(#[case] who: Who, #[case] allowed: bool) {
    let svc = test_service().await;
    let team = seed_team(&svc).await;
    let baseline = audit_count(&svc, &team.owner).await;

    let result = svc
        .create_project(
            team.pick(who),
            NewProject {
                project_id: "PRJ-010".into(),
                name: "Ramadan campaign".into(),
                ..NewProject::default()
            },
        )
        .await;

    assert_eq!(result.is_ok(), allowed);
    if let Err(error) = result {
        assert_eq!(error.kind(), ErrorKind::Authorization);
    }
    let expected = if allowed { baseline + 1 } else { baseline };
    assert_eq!(audit_count(&svc, &team.owner).await, expected);
}

#[rstest]
#[case(Who::Owner, true)]
#[case(Who::Admin, false)]
#[case(Who::Employee, false)]
#[tokio::test]
async fn catalog_is_super_admin_only(#[case] who: Who, #[case] allowed: bool) {
    let svc = test_service().await;
    let team = seed_team(&svc).await;

    let result = svc
        .create_service_offering(
            team.pick(who),
            NewServiceOffering {
                name: "Social media management".into(),
                category: "Social".into(),
                price: Some(7_500_000),
                ..NewServiceOffering::default()
            },
        )
        .await;

    assert_eq!(result.is_ok(), allowed);
}
