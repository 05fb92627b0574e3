//! Attendance repository.
//!
//! One row per user per UTC calendar day, enforced by `UNIQUE (user_id, date)`.
//! Check-in inserts with `ON CONFLICT DO NOTHING`, so a repeated check-in
//! returns the existing row untouched.

use chrono::{DateTime, NaiveDate, Utc};

use hlm_core::entities::AttendanceRecord;
use hlm_core::enums::AttendanceStatus;
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_ATTENDANCE;

use crate::error::DatabaseError;
use crate::helpers::{
    date_text, get_opt_string, parse_date, parse_datetime, parse_enum, parse_optional_datetime,
    text,
};
use crate::service::HlmService;

const SELECT_COLS: &str = "a.id, a.user_id, a.date, a.check_in, a.check_out, a.status, a.notes, \
     p.full_name, a.created_at, a.updated_at";

fn row_to_record(row: &libsql::Row) -> Result<AttendanceRecord, DatabaseError> {
    Ok(AttendanceRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: parse_date(&row.get::<String>(2)?)?,
        check_in: parse_optional_datetime(get_opt_string(row, 3)?.as_deref())?,
        check_out: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
        status: parse_enum(&row.get::<String>(5)?)?,
        notes: get_opt_string(row, 6)?,
        full_name: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl HlmService {
    async fn attendance_where(
        &self,
        condition: &str,
        params: Vec<libsql::Value>,
        limit: u32,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS} FROM attendance a
             LEFT JOIN profiles p ON p.user_id = a.user_id
             {condition}
             ORDER BY a.date DESC, a.check_in DESC, a.rowid DESC LIMIT {limit}"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn attendance_for(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DatabaseError> {
        let mut records = self
            .attendance_where(
                "WHERE a.user_id = ?1 AND a.date = ?2",
                vec![text(user_id), text(date_text(date))],
                1,
            )
            .await?;
        Ok(records.pop())
    }

    /// Check in for the calendar day of `now`.
    ///
    /// Returns the day's record and whether this call created it. A second
    /// check-in on the same day returns the existing record unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the write or read fails.
    pub async fn check_in(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
        status: AttendanceStatus,
        notes: Option<String>,
    ) -> Result<(AttendanceRecord, bool), DatabaseError> {
        let date = now.date_naive();
        let id = self.db().generate_id(PREFIX_ATTENDANCE).await?;
        let stamp = now.to_rfc3339();
        let inserted = self
            .db()
            .conn()
            .execute(
                "INSERT INTO attendance (id, user_id, date, check_in, status, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?4, ?4)
                 ON CONFLICT (user_id, date) DO NOTHING",
                libsql::params![
                    id.as_str(),
                    actor.user_id.as_str(),
                    date_text(date),
                    stamp,
                    status.as_str(),
                    notes
                ],
            )
            .await?;
        let created = inserted > 0;
        if created {
            tracing::info!(user_id = %actor.user_id, %date, %status, "checked in");
        } else {
            tracing::debug!(user_id = %actor.user_id, %date, "already checked in");
        }

        let record = self
            .attendance_for(&actor.user_id, date)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        Ok((record, created))
    }

    /// Close the actor's record for the calendar day of `now`.
    ///
    /// # Errors
    ///
    /// `InvalidState` without a check-in today or after a previous check-out.
    pub async fn check_out(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<AttendanceRecord, DatabaseError> {
        let date = now.date_naive();
        let record = self
            .attendance_for(&actor.user_id, date)
            .await?
            .ok_or_else(|| DatabaseError::InvalidState(format!("not checked in on {date}")))?;
        if record.check_out.is_some() {
            return Err(DatabaseError::InvalidState(format!(
                "already checked out on {date}"
            )));
        }

        let stamp = now.to_rfc3339();
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE attendance SET check_out = ?1, updated_at = ?1
                 WHERE id = ?2 AND check_out IS NULL",
                libsql::params![stamp, record.id.as_str()],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::InvalidState(format!(
                "already checked out on {date}"
            )));
        }
        tracing::info!(user_id = %actor.user_id, %date, "checked out");

        self.attendance_for(&actor.user_id, date)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Everyone's records for one day, with member names.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn today_attendance(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        self.attendance_where("WHERE a.date = ?1", vec![text(date_text(today))], 500)
            .await
    }

    /// Recent records, newest day first, optionally for one user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_attendance(
        &self,
        user_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<AttendanceRecord>, DatabaseError> {
        match user_id {
            Some(user_id) => {
                self.attendance_where("WHERE a.user_id = ?1", vec![text(user_id)], limit)
                    .await
            }
            None => self.attendance_where("", Vec::new(), limit).await,
        }
    }
}
