//! Local identity provider: accounts, sessions and password changes.
//!
//! The first registered account becomes `super_admin`; every later one
//! starts as `employee`. Roles are read fresh on each session resolution so
//! a role change applies to existing sessions.

use chrono::{DateTime, Duration, Utc};

use hlm_auth::{PasswordHash, generate_session_token, hash_password, verify_password};
use hlm_core::entities::{AuthSession, TeamMember};
use hlm_core::enums::{RecordStatus, Role};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum, timestamp};
use crate::service::HlmService;

const MIN_PASSWORD_LEN: usize = 6;

fn normalize_email(email: &str) -> Result<String, DatabaseError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(DatabaseError::Validation("a valid email is required".into()));
    }
    Ok(email)
}

fn check_password_rules(password: &str) -> Result<(), DatabaseError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DatabaseError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

struct StoredAccount {
    id: String,
    email: String,
    hash: PasswordHash,
}

fn row_to_account(row: &libsql::Row) -> Result<StoredAccount, DatabaseError> {
    let iterations: i64 = row.get(4)?;
    Ok(StoredAccount {
        id: row.get(0)?,
        email: row.get(1)?,
        hash: PasswordHash {
            salt: row.get(2)?,
            hash: row.get(3)?,
            iterations: u32::try_from(iterations).unwrap_or(1),
        },
    })
}

const ACCOUNT_COLUMNS: &str = "id, email, password_salt, password_hash, password_iterations";

impl HlmService {
    async fn find_account(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<StoredAccount>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = ?1"),
                [value],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    /// Register a new account with its profile and role.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed email, short password, blank name or an
    /// email that is already registered.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<TeamMember, DatabaseError> {
        let email = normalize_email(email)?;
        check_password_rules(password)?;
        if full_name.trim().is_empty() {
            return Err(DatabaseError::Validation("full_name is required".into()));
        }
        if self.find_account("email", &email).await?.is_some() {
            return Err(DatabaseError::Validation(format!(
                "{email} is already registered"
            )));
        }

        let existing = self
            .db()
            .scalar_i64("SELECT COUNT(*) FROM accounts", Vec::new())
            .await?;
        let role = if existing == 0 {
            Role::SuperAdmin
        } else {
            Role::Employee
        };

        let hash = hash_password(password, self.auth_config().pbkdf2_iterations)?;
        let tx = self.db().conn().transaction().await?;
        match self.insert_account(&email, &hash, full_name, role).await {
            Ok(member) => {
                tx.commit().await?;
                tracing::info!(user_id = %member.profile.user_id, %role, "account registered");
                Ok(member)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::error!(%email, error = %rollback, "sign-up rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Account, profile and role rows. Runs inside the sign-up transaction.
    async fn insert_account(
        &self,
        email: &str,
        hash: &PasswordHash,
        full_name: &str,
        role: Role,
    ) -> Result<TeamMember, DatabaseError> {
        let user_id = self.db().generate_id(PREFIX_USER).await?;
        let now = timestamp(Utc::now());
        self.db()
            .conn()
            .execute(
                "INSERT INTO accounts (id, email, password_salt, password_hash,
                 password_iterations, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                libsql::params![
                    user_id.as_str(),
                    email,
                    hash.salt.as_str(),
                    hash.hash.as_str(),
                    i64::from(hash.iterations),
                    now
                ],
            )
            .await?;
        self.create_member(&user_id, full_name, role).await
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email or wrong password,
    /// `Unauthorized` when the member's profile is inactive.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, DatabaseError> {
        let email = email.trim().to_lowercase();
        let Some(account) = self.find_account("email", &email).await? else {
            tracing::warn!(%email, "sign-in for unknown email");
            return Err(DatabaseError::InvalidCredentials);
        };
        if !verify_password(password, &account.hash)? {
            tracing::warn!(user_id = %account.id, "sign-in with wrong password");
            return Err(DatabaseError::InvalidCredentials);
        }

        let member = self.get_member(&account.id).await?;
        if member.profile.status == RecordStatus::Inactive {
            return Err(DatabaseError::Unauthorized {
                role: member.role.to_string(),
                action: "sign in with an inactive profile".into(),
            });
        }

        let ttl = self.auth_config().session_ttl_hours;
        let expires_at = Duration::try_hours(ttl)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                DatabaseError::Validation(format!("session TTL of {ttl} hours is out of range"))
            })?;
        let token = generate_session_token()?;
        self.db()
            .conn()
            .execute(
                "INSERT INTO auth_sessions (token, user_id, created_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    token.as_str(),
                    account.id.as_str(),
                    timestamp(now),
                    timestamp(expires_at)
                ],
            )
            .await?;
        tracing::info!(user_id = %account.id, "signed in");

        Ok(AuthSession {
            token,
            user_id: account.id,
            email: account.email,
            role: member.role,
            created_at: now,
            expires_at,
        })
    }

    /// Resolve a session token to the acting identity.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` for an unknown or expired token.
    pub async fn resolve_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Actor, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT s.user_id, s.expires_at, COALESCE(r.role, 'employee')
                 FROM auth_sessions s
                 LEFT JOIN user_roles r ON r.user_id = s.user_id
                 WHERE s.token = ?1",
                [token],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotAuthenticated)?;
        let user_id: String = row.get(0)?;
        let expires_at = parse_datetime(&row.get::<String>(1)?)?;
        if now >= expires_at {
            tracing::debug!(%user_id, "session expired");
            return Err(DatabaseError::NotAuthenticated);
        }
        let role: Role = parse_enum(&row.get::<String>(2)?)?;
        Ok(Actor::new(user_id, role))
    }

    /// End a session. Returns whether a session was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn sign_out(&self, token: &str) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute("DELETE FROM auth_sessions WHERE token = ?1", [token])
            .await?;
        Ok(removed > 0)
    }

    /// # Errors
    ///
    /// `InvalidCredentials` when `current` is wrong, `Validation` when `next`
    /// breaks the password rules, `NotFound` for an unknown account.
    pub async fn change_password(
        &self,
        actor: &Actor,
        current: &str,
        next: &str,
    ) -> Result<(), DatabaseError> {
        let account = self
            .find_account("id", &actor.user_id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("accounts", actor.user_id.as_str()))?;
        if !verify_password(current, &account.hash)? {
            return Err(DatabaseError::InvalidCredentials);
        }
        check_password_rules(next)?;

        let hash = hash_password(next, self.auth_config().pbkdf2_iterations)?;
        self.db()
            .conn()
            .execute(
                "UPDATE accounts SET password_salt = ?1, password_hash = ?2,
                 password_iterations = ?3, updated_at = ?4 WHERE id = ?5",
                libsql::params![
                    hash.salt,
                    hash.hash,
                    i64::from(hash.iterations),
                    timestamp(Utc::now()),
                    account.id.as_str()
                ],
            )
            .await?;
        tracing::info!(user_id = %account.id, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_member, test_service};
    use hlm_config::AuthConfig;
    use crate::updates::profile::ProfileUpdateBuilder;
    use pretty_assertions::assert_eq;

    async fn row_count(svc: &HlmService, table: &str) -> i64 {
        svc.db()
            .scalar_i64(&format!("SELECT COUNT(*) FROM {table}"), Vec::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_account_is_super_admin_then_employees() {
        let svc = test_service().await;
        let first = seed_member(&svc, "owner@hlm.test", "Owner").await;
        let second = seed_member(&svc, "budi@hlm.test", "Budi").await;
        assert_eq!(first.role, Role::SuperAdmin);
        assert_eq!(second.role, Role::Employee);
        assert!(first.profile.user_id.starts_with("usr-"));
    }

    #[tokio::test]
    async fn duplicate_email_rejected_case_insensitively() {
        let svc = test_service().await;
        seed_member(&svc, "owner@hlm.test", "Owner").await;
        let err = svc
            .sign_up("  Owner@HLM.test ", "another pass", "Clone")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn failed_member_setup_leaves_no_account_behind() {
        let svc = test_service().await;
        seed_member(&svc, "owner@hlm.test", "Owner").await;
        svc.db()
            .conn()
            .execute(
                "CREATE TRIGGER roles_offline BEFORE INSERT ON user_roles
                 BEGIN SELECT RAISE(ABORT, 'roles offline'); END",
                (),
            )
            .await
            .unwrap();

        assert!(svc.sign_up("budi@hlm.test", "correct horse", "Budi").await.is_err());
        assert_eq!(row_count(&svc, "accounts").await, 1);
        assert_eq!(row_count(&svc, "profiles").await, 1);
        assert_eq!(row_count(&svc, "audit_log").await, 2);

        svc.db()
            .conn()
            .execute("DROP TRIGGER roles_offline", ())
            .await
            .unwrap();
        let budi = seed_member(&svc, "budi@hlm.test", "Budi").await;
        assert_eq!(budi.role, Role::Employee);
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let svc = test_service().await;
        let err = svc.sign_up("a@hlm.test", "abc", "A").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn sign_in_and_resolve() {
        let svc = test_service().await;
        let owner = seed_member(&svc, "owner@hlm.test", "Owner").await;
        let now = Utc::now();

        let session = svc
            .sign_in("owner@hlm.test", "correct horse", now)
            .await
            .unwrap();
        assert_eq!(session.role, Role::SuperAdmin);
        assert_eq!(session.expires_at, now + Duration::hours(12));

        let actor = svc.resolve_session(&session.token, now).await.unwrap();
        assert_eq!(actor.user_id, owner.profile.user_id);
        assert_eq!(actor.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn unrepresentable_session_ttl_is_an_error() {
        let svc = HlmService::new_local(
            ":memory:",
            AuthConfig {
                pbkdf2_iterations: 1_000,
                session_ttl_hours: i64::MAX / 4,
            },
        )
        .await
        .unwrap();
        seed_member(&svc, "owner@hlm.test", "Owner").await;

        let err = svc
            .sign_in("owner@hlm.test", "correct horse", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert_eq!(row_count(&svc, "auth_sessions").await, 0);
    }

    #[tokio::test]
    async fn wrong_password_refused() {
        let svc = test_service().await;
        seed_member(&svc, "owner@hlm.test", "Owner").await;
        let err = svc
            .sign_in("owner@hlm.test", "wrong horse", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidCredentials));

        let err = svc
            .sign_in("nobody@hlm.test", "correct horse", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidCredentials));
    }

    #[tokio::test]
    async fn expired_session_does_not_resolve() {
        let svc = test_service().await;
        seed_member(&svc, "owner@hlm.test", "Owner").await;
        let now = Utc::now();
        let session = svc
            .sign_in("owner@hlm.test", "correct horse", now)
            .await
            .unwrap();

        let later = now + Duration::hours(13);
        let err = svc.resolve_session(&session.token, later).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotAuthenticated));
    }

    #[tokio::test]
    async fn sign_out_ends_session() {
        let svc = test_service().await;
        seed_member(&svc, "owner@hlm.test", "Owner").await;
        let now = Utc::now();
        let session = svc
            .sign_in("owner@hlm.test", "correct horse", now)
            .await
            .unwrap();

        assert!(svc.sign_out(&session.token).await.unwrap());
        assert!(!svc.sign_out(&session.token).await.unwrap());
        assert!(svc.resolve_session(&session.token, now).await.is_err());
    }

    #[tokio::test]
    async fn role_change_applies_to_live_session() {
        let svc = test_service().await;
        let owner = seed_member(&svc, "owner@hlm.test", "Owner").await;
        seed_member(&svc, "budi@hlm.test", "Budi").await;
        let now = Utc::now();
        let session = svc
            .sign_in("budi@hlm.test", "correct horse", now)
            .await
            .unwrap();

        let owner_actor = Actor::new(owner.profile.user_id.clone(), owner.role);
        svc.set_role(&owner_actor, &session.user_id, Role::Admin)
            .await
            .unwrap();
        let actor = svc.resolve_session(&session.token, now).await.unwrap();
        assert_eq!(actor.role, Role::Admin);
    }

    #[tokio::test]
    async fn inactive_profile_cannot_sign_in() {
        let svc = test_service().await;
        let owner = seed_member(&svc, "owner@hlm.test", "Owner").await;
        let budi = seed_member(&svc, "budi@hlm.test", "Budi").await;
        let owner_actor = Actor::new(owner.profile.user_id.clone(), owner.role);
        svc.update_profile(
            &owner_actor,
            &budi.profile.user_id,
            ProfileUpdateBuilder::new()
                .status(RecordStatus::Inactive)
                .build(),
        )
        .await
        .unwrap();

        let err = svc
            .sign_in("budi@hlm.test", "correct horse", Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = test_service().await;
        let owner = seed_member(&svc, "owner@hlm.test", "Owner").await;
        let actor = Actor::new(owner.profile.user_id.clone(), owner.role);

        let err = svc
            .change_password(&actor, "wrong horse", "battery staple")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidCredentials));

        svc.change_password(&actor, "correct horse", "battery staple")
            .await
            .unwrap();
        assert!(
            svc.sign_in("owner@hlm.test", "battery staple", Utc::now())
                .await
                .is_ok()
        );
        assert!(
            svc.sign_in("owner@hlm.test", "correct horse", Utc::now())
                .await
                .is_err()
        );
    }
}
