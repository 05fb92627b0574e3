//! Serde roundtrip and JsonSchema validation for the entities that cross
//! crate boundaries as JSON (CLI output, audit snapshots).

use chrono::{NaiveDate, Utc};
use hlm_core::entities::*;
use hlm_core::enums::*;
use hlm_core::responses::*;
use schemars::schema_for;

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

roundtrip_and_validate!(
    client_roundtrip,
    Client,
    Client {
        id: "cli-a3f8b2c1".into(),
        client_id: "CLT-001".into(),
        brand_name: "Acme".into(),
        pic_name: Some("Rina".into()),
        service_category: Some("social media".into()),
        package: None,
        value_idr: Some(15_000_000),
        start_date: Some(date(2024, 1, 1)),
        status: ClientStatus::Lead,
        notes: None,
        created_by: Some("usr-00000001".into()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: "tsk-a3f8b2c1".into(),
        project_id: "prj-0000aaaa".into(),
        title: "Ramadan teaser".into(),
        description: None,
        brief: Some("Warm, family-centred".into()),
        caption: None,
        script: None,
        pillar: Some("brand".into()),
        emotional_angle: None,
        medium: Some(TaskMedium::Reels),
        reference_url: None,
        asset_url: None,
        assigned_pl: Some("usr-1".into()),
        assigned_copywriter: None,
        assigned_editor: None,
        assigned_videographer: None,
        start_date: None,
        due_date: Some(date(2024, 3, 10)),
        done_date: None,
        status: ProductionStatus::InProgress,
        approval_status: ApprovalStatus::ClientReview,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    audit_entry_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-a3f8b2c1".into(),
        user_id: "usr-00000001".into(),
        action: AuditAction::Approve,
        table_name: GovernedTable::Tasks,
        record_id: Some("tsk-a3f8b2c1".into()),
        old_values: Some(serde_json::json!({"approval_status": "draft"})),
        new_values: Some(serde_json::json!({"approval_status": "pl review"})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    team_member_roundtrip,
    TeamMember,
    TeamMember {
        profile: Profile {
            id: "prf-a3f8b2c1".into(),
            user_id: "usr-00000001".into(),
            full_name: "Dewi".into(),
            employee_id: Some("EMP-01".into()),
            department: Some("creative".into()),
            phone: None,
            join_date: Some(date(2023, 6, 1)),
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
        role: Role::Admin,
    }
);

roundtrip_and_validate!(
    dashboard_roundtrip,
    DashboardSummary,
    DashboardSummary {
        total_income: 10,
        total_expense: 4,
        net_profit: 6,
        active_projects: 2,
        active_clients: 1,
        present_today: 3,
        total_content: 9,
        monthly_income: vec![MonthlyAmount {
            month: "2024-01".into(),
            amount: 10
        }],
        projects_by_status: vec![StatusCount {
            status: "briefing".into(),
            count: 2
        }],
        tasks_by_approval: vec![],
    }
);

#[test]
fn audit_entry_uses_wire_names() {
    let entry = AuditEntry {
        id: "aud-1".into(),
        user_id: "usr-1".into(),
        action: AuditAction::Update,
        table_name: GovernedTable::FinanceTransactions,
        record_id: None,
        old_values: None,
        new_values: None,
        created_at: Utc::now(),
    };
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["action"], "UPDATE");
    assert_eq!(json["table_name"], "finance_transactions");
}

#[test]
fn team_member_flattens_profile() {
    let json = serde_json::json!({
        "id": "prf-1",
        "user_id": "usr-1",
        "full_name": "Dewi",
        "employee_id": null,
        "department": null,
        "phone": null,
        "join_date": null,
        "status": "active",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "role": "employee"
    });
    let member: TeamMember = serde_json::from_value(json).unwrap();
    assert_eq!(member.profile.full_name, "Dewi");
    assert_eq!(member.role, Role::Employee);
}
