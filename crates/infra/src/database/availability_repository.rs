//! SQLite implementation of the availability-rule repository.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row};
use slotwise_core::AvailabilityRepository;
use slotwise_domain::{AvailabilityRule, Result};
use tracing::instrument;
use uuid::Uuid;

use super::{map_join_error, map_sql_error, DbManager};

const RULE_COLUMNS: &str =
    "id, host_id, day_of_week, start_time, end_time, buffer_minutes, is_bookable";

pub struct SqliteAvailabilityRepository {
    db: Arc<DbManager>,
}

impl SqliteAvailabilityRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn row_to_rule(row: &Row<'_>) -> rusqlite::Result<AvailabilityRule> {
    Ok(AvailabilityRule {
        id: row.get(0)?,
        host_id: row.get(1)?,
        day_of_week: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        buffer_minutes: row.get(5)?,
        is_bookable: row.get(6)?,
    })
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepository {
    #[instrument(skip(self))]
    async fn list_bookable(&self, host_id: Uuid, day_of_week: u8) -> Result<Vec<AvailabilityRule>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {RULE_COLUMNS} FROM availability_rules \
                     WHERE host_id = ?1 AND day_of_week = ?2 AND is_bookable = 1 \
                     ORDER BY start_time ASC, id ASC"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![host_id, day_of_week], row_to_rule)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn list_for_host(&self, host_id: Uuid) -> Result<Vec<AvailabilityRule>> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {RULE_COLUMNS} FROM availability_rules \
                     WHERE host_id = ?1 \
                     ORDER BY day_of_week ASC, start_time ASC, id ASC"
                ))
                .map_err(map_sql_error)?;

            let rows = stmt
                .query_map(params![host_id], row_to_rule)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            Ok(rows)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, rules), fields(count = rules.len()))]
    async fn replace_for_host(&self, host_id: Uuid, rules: Vec<AvailabilityRule>) -> Result<()> {
        let db = Arc::clone(&self.db);

        tokio::task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            tx.execute("DELETE FROM availability_rules WHERE host_id = ?1", params![host_id])
                .map_err(map_sql_error)?;

            for rule in &rules {
                tx.execute(
                    "INSERT INTO availability_rules \
                     (id, host_id, day_of_week, start_time, end_time, buffer_minutes, is_bookable) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        rule.id,
                        host_id,
                        rule.day_of_week,
                        rule.start_time,
                        rule.end_time,
                        rule.buffer_minutes,
                        rule.is_bookable,
                    ],
                )
                .map_err(map_sql_error)?;
            }

            tx.commit().map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
