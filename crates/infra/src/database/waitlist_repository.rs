//! SQLite implementation of the waitlist repository.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row};
use slotwise_core::WaitlistRepository;
use slotwise_domain::{Result, SlotwiseError, WaitlistEntry, WaitlistStatus};
use tracing::instrument;
use uuid::Uuid;

use super::{map_join_error, map_sql_error, parse_stored, DbManager};

const WAITLIST_COLUMNS: &str = "id, host_id, guest_name, guest_email, guest_reason, \
     preferred_start, preferred_end, status, created_at";

pub struct SqliteWaitlistRepository {
    db: Arc<DbManager>,
}

impl SqliteWaitlistRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<WaitlistEntry> {
    Ok(WaitlistEntry {
        id: row.get(0)?,
        host_id: row.get(1)?,
        guest_name: row.get(2)?,
        guest_email: row.get(3)?,
        guest_reason: row.get(4)?,
        preferred_start: row.get(5)?,
        preferred_end: row.get(6)?,
        status: parse_stored(7, &row.get::<_, String>(7)?)?,
        created_at: row.get(8)?,
    })
}

#[async_trait]
impl WaitlistRepository for SqliteWaitlistRepository {
    #[instrument(skip(self))]
    async fn list_waiting(&self, host_id: Uuid) -> Result<Vec<WaitlistEntry>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {WAITLIST_COLUMNS} FROM waitlist_entries \
                     WHERE host_id = ?1 AND status = 'waiting' \
                     ORDER BY created_at ASC, id ASC"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![host_id], row_to_entry)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, entry), fields(id = %entry.id))]
    async fn insert(&self, entry: &WaitlistEntry) -> Result<()> {
        let db = Arc::clone(&self.db);
        let entry = entry.clone();

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO waitlist_entries \
                 (id, host_id, guest_name, guest_email, guest_reason, \
                  preferred_start, preferred_end, status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    entry.id,
                    entry.host_id,
                    entry.guest_name,
                    entry.guest_email,
                    entry.guest_reason,
                    entry.preferred_start,
                    entry.preferred_end,
                    entry.status.as_str(),
                    entry.created_at,
                ],
            )
            .map_err(map_sql_error)?;

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn set_status(&self, id: Uuid, status: WaitlistStatus) -> Result<()> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let updated = conn
                .execute(
                    "UPDATE waitlist_entries SET status = ?2 WHERE id = ?1",
                    params![id, status.as_str()],
                )
                .map_err(map_sql_error)?;

            if updated == 0 {
                return Err(SlotwiseError::NotFound(format!("waitlist entry not found: {id}")));
            }

            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
