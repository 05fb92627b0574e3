//! Shared test utilities for hlm-db unit tests.

pub(crate) mod helpers {
    use chrono::NaiveDate;
    use hlm_config::AuthConfig;
    use hlm_core::entities::{Client, NewClient, NewProject, NewTask, Project, Task, TeamMember};
    use hlm_core::enums::Role;
    use hlm_core::identity::Actor;

    use crate::HlmDb;
    use crate::service::HlmService;

    /// In-memory service with cheap password hashing.
    pub async fn test_service() -> HlmService {
        let db = HlmDb::open_local(":memory:").await.unwrap();
        HlmService::from_db(
            db,
            AuthConfig {
                pbkdf2_iterations: 1_000,
                session_ttl_hours: 12,
            },
        )
    }

    pub fn super_admin() -> Actor {
        Actor::new("usr-00000001", Role::SuperAdmin)
    }

    pub fn admin() -> Actor {
        Actor::new("usr-00000002", Role::Admin)
    }

    pub fn employee() -> Actor {
        Actor::new("usr-00000003", Role::Employee)
    }

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub async fn seed_client(svc: &HlmService, code: &str) -> Client {
        svc.create_client(
            &super_admin(),
            NewClient {
                client_id: code.into(),
                brand_name: format!("Brand {code}"),
                ..NewClient::default()
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_project(svc: &HlmService, code: &str) -> Project {
        svc.create_project(
            &super_admin(),
            NewProject {
                project_id: code.into(),
                name: format!("Project {code}"),
                ..NewProject::default()
            },
        )
        .await
        .unwrap()
    }

    pub async fn seed_task(svc: &HlmService, project: &Project, title: &str) -> Task {
        svc.create_task(
            &employee(),
            NewTask {
                project_id: project.id.clone(),
                title: title.into(),
                ..NewTask::default()
            },
        )
        .await
        .unwrap()
    }

    /// Register an account. The first one in a database becomes super_admin.
    pub async fn seed_member(svc: &HlmService, email: &str, full_name: &str) -> TeamMember {
        svc.sign_up(email, "correct horse", full_name).await.unwrap()
    }
}
