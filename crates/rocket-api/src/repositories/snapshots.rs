//! Rocket snapshot repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::domain::RocketSnapshot;

#[derive(Debug, FromRow)]
struct SnapshotRow {
    channel: Uuid,
    at_message_number: i32,
    rocket_type: Option<String>,
    mission: Option<String>,
    speed: i32,
    status: String,
    exploded_reason: Option<String>,
    launched_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SnapshotRow> for RocketSnapshot {
    type Error = anyhow::Error;

    fn try_from(row: SnapshotRow) -> Result<Self> {
        Ok(Self {
            channel: row.channel,
            at_message_number: row.at_message_number,
            rocket_type: row.rocket_type,
            mission: row.mission,
            speed: row.speed,
            status: row.status.parse()?,
            exploded_reason: row.exploded_reason,
            launched_at: row.launched_at,
            created_at: Some(row.created_at),
        })
    }
}

pub struct SnapshotRepository;

impl SnapshotRepository {
    /// Store a snapshot; an existing one at the same message number is kept
    pub async fn insert<'e, E>(executor: E, snapshot: &RocketSnapshot) -> Result<bool>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO rocket_snapshot (
                channel, at_message_number, rocket_type, mission, speed,
                status, exploded_reason, launched_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, NOW()))
            ON CONFLICT (channel, at_message_number) DO NOTHING
            "#,
        )
        .bind(snapshot.channel)
        .bind(snapshot.at_message_number)
        .bind(&snapshot.rocket_type)
        .bind(&snapshot.mission)
        .bind(snapshot.speed)
        .bind(snapshot.status.as_str())
        .bind(&snapshot.exploded_reason)
        .bind(snapshot.launched_at)
        .bind(snapshot.created_at)
        .execute(executor)
        .await
        .with_context(|| {
            format!(
                "Failed to insert snapshot {} of channel {}",
                snapshot.at_message_number, snapshot.channel
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Snapshot with the highest message number of a channel
    pub async fn find_latest<'e, E>(executor: E, channel: Uuid) -> Result<Option<RocketSnapshot>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r#"
            SELECT channel, at_message_number, rocket_type, mission, speed,
                   status, exploded_reason, launched_at, created_at
            FROM rocket_snapshot
            WHERE channel = $1
            ORDER BY at_message_number DESC
            LIMIT 1
            "#,
        )
        .bind(channel)
        .fetch_optional(executor)
        .await
        .with_context(|| format!("Failed to load latest snapshot of channel {}", channel))?;

        row.map(RocketSnapshot::try_from).transpose()
    }
}
