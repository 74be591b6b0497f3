//! SQLite implementation of the appointment repository.
//!
//! All reads filter to confirmed rows; cancellation is a status flip, never a
//! DELETE. Timestamps are stored as ISO-8601 text, so lexicographic ordering
//! in SQL matches chronological ordering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rusqlite::{params, Row};
use slotwise_core::AppointmentRepository;
use slotwise_domain::{Appointment, AppointmentStatus, Result, SlotwiseError};
use tracing::instrument;
use uuid::Uuid;

use super::{map_join_error, map_sql_error, parse_stored, DbManager};

const APPOINTMENT_COLUMNS: &str = "id, host_id, workspace_id, guest_name, guest_email, title, \
     reason, start_time, end_time, kind, status, created_at";

pub struct SqliteAppointmentRepository {
    db: Arc<DbManager>,
}

impl SqliteAppointmentRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        host_id: row.get(1)?,
        workspace_id: row.get(2)?,
        guest_name: row.get(3)?,
        guest_email: row.get(4)?,
        title: row.get(5)?,
        reason: row.get(6)?,
        start_time: row.get(7)?,
        end_time: row.get(8)?,
        kind: parse_stored(9, &row.get::<_, String>(9)?)?,
        status: parse_stored(10, &row.get::<_, String>(10)?)?,
        created_at: row.get(11)?,
    })
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    #[instrument(skip(self))]
    async fn list_confirmed_between(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
                     WHERE host_id = ?1 AND status = 'confirmed' \
                       AND start_time >= ?2 AND start_time < ?3 \
                     ORDER BY start_time ASC, id ASC"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![host_id, start, end], row_to_appointment)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn list_confirmed_overlapping(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Appointment>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
                     WHERE host_id = ?1 AND status = 'confirmed' \
                       AND start_time < ?3 AND end_time > ?2 \
                       AND (?4 IS NULL OR id <> ?4) \
                     ORDER BY start_time ASC, id ASC"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![host_id, start, end, exclude], row_to_appointment)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, appointment), fields(id = %appointment.id))]
    async fn insert(&self, appointment: &Appointment) -> Result<()> {
        let db = Arc::clone(&self.db);
        let appointment = appointment.clone();

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO appointments \
                 (id, host_id, workspace_id, guest_name, guest_email, title, reason, \
                  start_time, end_time, kind, status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    appointment.id,
                    appointment.host_id,
                    appointment.workspace_id,
                    appointment.guest_name,
                    appointment.guest_email,
                    appointment.title,
                    appointment.reason,
                    appointment.start_time,
                    appointment.end_time,
                    appointment.kind.as_str(),
                    appointment.status.as_str(),
                    appointment.created_at,
                ],
            )
            .map_err(map_sql_error)?;

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn update_times(&self, id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE appointments SET start_time = ?2, end_time = ?3 WHERE id = ?1",
                    params![id, start, end],
                )
                .map_err(map_sql_error)?;

            if updated == 0 {
                return Err(SlotwiseError::NotFound(format!("appointment not found: {id}")));
            }

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> Result<()> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE appointments SET status = ?2 WHERE id = ?1",
                    params![id, status.as_str()],
                )
                .map_err(map_sql_error)?;

            if updated == 0 {
                return Err(SlotwiseError::NotFound(format!("appointment not found: {id}")));
            }

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn find(&self, id: Uuid) -> Result<Option<Appointment>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let result = conn.query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
                params![id],
                row_to_appointment,
            );

            match result {
                Ok(appointment) => Ok(Some(appointment)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(map_sql_error(e)),
            }
        })
        .await
        .map_err(map_join_error)?
    }
}
