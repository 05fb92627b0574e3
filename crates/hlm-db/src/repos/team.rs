//! Team repository: profiles joined with their single role row.
//!
//! Profile edits go through the governed layer. Role changes are written
//! here and audited as `UPDATE` on `user_roles` with `{role: old} -> {role: new}`.

use chrono::Utc;
use libsql::Value;

use hlm_core::access::Operation;
use hlm_core::entities::{Profile, TeamMember, UserRole};
use hlm_core::enums::{AuditAction, GovernedTable, RecordStatus, Role};
use hlm_core::identity::Actor;
use hlm_core::ids::{PREFIX_PROFILE, PREFIX_USER_ROLE};

use crate::error::DatabaseError;
use crate::governed::{GovernedRecord, ensure_can_mutate, qualified_columns};
use crate::helpers::{
    get_opt_string, opt_date, opt_text, parse_datetime, parse_enum, parse_optional_date, text,
    timestamp,
};
use crate::service::HlmService;
use crate::updates::profile::ProfileUpdate;

impl GovernedRecord for Profile {
    const TABLE: GovernedTable = GovernedTable::Profiles;
    const ID_PREFIX: &'static str = PREFIX_PROFILE;
    const COLUMNS: &'static str = "id, user_id, full_name, employee_id, department, phone, \
         join_date, status, created_at, updated_at";
    const ORDER_BY: &'static str = "full_name ASC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            full_name: row.get(2)?,
            employee_id: get_opt_string(row, 3)?,
            department: get_opt_string(row, 4)?,
            phone: get_opt_string(row, 5)?,
            join_date: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
            status: parse_enum(&row.get::<String>(7)?)?,
            created_at: parse_datetime(&row.get::<String>(8)?)?,
            updated_at: parse_datetime(&row.get::<String>(9)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.user_id.as_str()),
            text(self.full_name.as_str()),
            opt_text(self.employee_id.as_deref()),
            opt_text(self.department.as_deref()),
            opt_text(self.phone.as_deref()),
            opt_date(self.join_date),
            text(self.status.as_str()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

impl GovernedRecord for UserRole {
    const TABLE: GovernedTable = GovernedTable::UserRoles;
    const ID_PREFIX: &'static str = PREFIX_USER_ROLE;
    const COLUMNS: &'static str = "id, user_id, role";
    const ORDER_BY: &'static str = "rowid ASC";
    const TOUCHES_UPDATED_AT: bool = false;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            role: parse_enum(&row.get::<String>(2)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.user_id.as_str()),
            text(self.role.as_str()),
        ]
    }
}

/// Profile columns followed by the role; a missing role row reads as employee.
fn member_select() -> String {
    format!(
        "SELECT {}, COALESCE(r.role, 'employee') FROM profiles p
         LEFT JOIN user_roles r ON r.user_id = p.user_id",
        qualified_columns::<Profile>("p")
    )
}

fn row_to_member(row: &libsql::Row) -> Result<TeamMember, DatabaseError> {
    Ok(TeamMember {
        profile: Profile::from_row(row)?,
        role: parse_enum(&row.get::<String>(10)?)?,
    })
}

impl HlmService {
    /// Every member ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_team(&self, limit: u32) -> Result<Vec<TeamMember>, DatabaseError> {
        let sql = format!("{} ORDER BY p.full_name ASC LIMIT {limit}", member_select());
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row_to_member(&row)?);
        }
        Ok(members)
    }

    /// # Errors
    ///
    /// `NotFound` when the user has no profile.
    pub async fn get_member(&self, user_id: &str) -> Result<TeamMember, DatabaseError> {
        let sql = format!("{} WHERE p.user_id = ?1", member_select());
        let mut rows = self.db().conn().query(&sql, [user_id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(GovernedTable::Profiles.as_str(), user_id))?;
        row_to_member(&row)
    }

    /// # Errors
    ///
    /// `Validation` for a blank name, `Unauthorized` below super_admin,
    /// `NotFound`, or `AuditGap`.
    pub async fn update_profile(
        &self,
        actor: &Actor,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<TeamMember, DatabaseError> {
        if update.full_name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DatabaseError::Validation("full_name cannot be blank".into()));
        }
        let member = self.get_member(user_id).await?;
        let profile: Profile = self
            .patch_governed(actor, &member.profile.id, &update)
            .await?;
        Ok(TeamMember {
            profile,
            role: member.role,
        })
    }

    /// Change a user's role.
    ///
    /// Setting the role a user already holds writes nothing. Demoting the
    /// last super_admin is refused with `InvalidState`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` below super_admin, `NotFound`, `InvalidState`, or `AuditGap`.
    pub async fn set_role(
        &self,
        actor: &Actor,
        user_id: &str,
        role: Role,
    ) -> Result<TeamMember, DatabaseError> {
        ensure_can_mutate(actor, GovernedTable::UserRoles, Operation::Update)?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {} FROM user_roles WHERE user_id = ?1", UserRole::COLUMNS),
                [user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(GovernedTable::UserRoles.as_str(), user_id))?;
        let current = UserRole::from_row(&row)?;
        if current.role == role {
            return self.get_member(user_id).await;
        }

        if current.role.is_super_admin() {
            let super_admins = self
                .db()
                .scalar_i64(
                    "SELECT COUNT(*) FROM user_roles WHERE role = 'super_admin'",
                    Vec::new(),
                )
                .await?;
            if super_admins <= 1 {
                return Err(DatabaseError::InvalidState(
                    "cannot demote the last super_admin".into(),
                ));
            }
        }

        self.db()
            .conn()
            .execute(
                "UPDATE user_roles SET role = ?1 WHERE id = ?2",
                libsql::params![role.as_str(), current.id.as_str()],
            )
            .await?;
        tracing::info!(user_id, from = %current.role, to = %role, by = %actor.user_id, "role changed");

        self.audit_after_write(
            actor,
            AuditAction::Update,
            GovernedTable::UserRoles,
            &current.id,
            Some(serde_json::json!({ "role": current.role.as_str() })),
            Some(serde_json::json!({ "role": role.as_str() })),
        )
        .await?;

        self.get_member(user_id).await
    }

    /// Create the profile and role rows for a freshly registered account,
    /// audited as the new user.
    pub(crate) async fn create_member(
        &self,
        user_id: &str,
        full_name: &str,
        role: Role,
    ) -> Result<TeamMember, DatabaseError> {
        let actor = Actor::new(user_id, role);
        let now = Utc::now();
        let profile = Profile {
            id: self.db().generate_id(Profile::ID_PREFIX).await?,
            user_id: user_id.to_string(),
            full_name: full_name.trim().to_string(),
            employee_id: None,
            department: None,
            phone: None,
            join_date: Some(now.date_naive()),
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.insert_and_audit(&actor, &profile).await?;

        let role_row = UserRole {
            id: self.db().generate_id(UserRole::ID_PREFIX).await?,
            user_id: user_id.to_string(),
            role,
        };
        self.insert_and_audit(&actor, &role_row).await?;

        Ok(TeamMember { profile, role })
    }
}
