//! Notifications: plain row inserts addressed to one user.

use chrono::Utc;

use hlm_core::entities::{NewNotification, Notification};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_NOTIFICATION;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::HlmService;

const SELECT_COLS: &str = "id, user_id, title, message, link, kind, read, created_at";

fn row_to_notification(row: &libsql::Row) -> Result<Notification, DatabaseError> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        message: get_opt_string(row, 3)?,
        link: get_opt_string(row, 4)?,
        kind: parse_enum(&row.get::<String>(5)?)?,
        read: row.get::<i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl HlmService {
    /// Send a notification to one user. Admin-or-above only.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Validation`, or a persistence error.
    pub async fn notify(
        &self,
        actor: &Actor,
        input: NewNotification,
    ) -> Result<Notification, DatabaseError> {
        if !actor.is_admin_or_above() {
            tracing::warn!(user_id = %actor.user_id, role = %actor.role, "notify refused");
            return Err(DatabaseError::Unauthorized {
                role: actor.role.to_string(),
                action: "send notifications".into(),
            });
        }
        input.validate()?;

        let notification = Notification {
            id: self.db().generate_id(PREFIX_NOTIFICATION).await?,
            user_id: input.user_id,
            title: input.title.trim().to_string(),
            message: input.message,
            link: input.link,
            kind: input.kind,
            read: false,
            created_at: Utc::now(),
        };
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO notifications ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)"),
                libsql::params![
                    notification.id.as_str(),
                    notification.user_id.as_str(),
                    notification.title.as_str(),
                    notification.message.as_deref(),
                    notification.link.as_deref(),
                    notification.kind.as_str(),
                    notification.created_at.to_rfc3339()
                ],
            )
            .await?;
        tracing::info!(id = %notification.id, to = %notification.user_id, "notification sent");
        Ok(notification)
    }

    /// The actor's own notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_notifications(
        &self,
        actor: &Actor,
        unread_only: bool,
        limit: u32,
    ) -> Result<Vec<Notification>, DatabaseError> {
        let unread = if unread_only { "AND read = 0" } else { "" };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM notifications WHERE user_id = ?1 {unread}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [actor.user_id.as_str()])
            .await?;
        let mut notifications = Vec::new();
        while let Some(row) = rows.next().await? {
            notifications.push(row_to_notification(&row)?);
        }
        Ok(notifications)
    }

    /// Mark one of the actor's notifications as read.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist or belongs to someone else.
    pub async fn mark_notification_read(
        &self,
        actor: &Actor,
        id: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE notifications SET read = 1 WHERE id = ?1 AND user_id = ?2",
                libsql::params![id, actor.user_id.as_str()],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("notifications", id));
        }
        Ok(())
    }

    /// Mark every unread notification of the actor as read. Returns the count.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn mark_all_notifications_read(&self, actor: &Actor) -> Result<u64, DatabaseError> {
        Ok(self
            .db()
            .conn()
            .execute(
                "UPDATE notifications SET read = 1 WHERE user_id = ?1 AND read = 0",
                [actor.user_id.as_str()],
            )
            .await?)
    }
}
