//! Rocket event log repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{types::Json, Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::domain::RocketEvent;

#[derive(Debug, FromRow)]
struct EventRow {
    channel: Uuid,
    message_number: i32,
    message_time: DateTime<Utc>,
    message_type: String,
    payload: Json<Map<String, Value>>,
}

impl TryFrom<EventRow> for RocketEvent {
    type Error = anyhow::Error;

    fn try_from(row: EventRow) -> Result<Self> {
        let message_type = row.message_type.parse()?;
        let event = RocketEvent::new(
            row.channel,
            row.message_number,
            row.message_time,
            message_type,
            row.payload.0,
        )?;
        Ok(event)
    }
}

pub struct EventRepository;

impl EventRepository {
    /// Append an event to the log
    ///
    /// Returns `false` without touching the log when `(channel, message_number)`
    /// is already stored.
    pub async fn insert<'e, E>(executor: E, event: &RocketEvent) -> Result<bool>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO rocket_event (channel, message_number, message_time, message_type, payload)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (channel, message_number) DO NOTHING
            "#,
        )
        .bind(event.channel())
        .bind(event.message_number())
        .bind(event.message_time())
        .bind(event.message_type().as_str())
        .bind(Json(event.payload()))
        .execute(executor)
        .await
        .with_context(|| {
            format!(
                "Failed to insert event {} of channel {}",
                event.message_number(),
                event.channel()
            )
        })?;

        Ok(result.rows_affected() == 1)
    }

    /// Events of a channel numbered above `after`, in message-number order
    pub async fn find_by_channel_after<'e, E>(
        executor: E,
        channel: Uuid,
        after: i32,
    ) -> Result<Vec<RocketEvent>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT channel, message_number, message_time, message_type, payload
            FROM rocket_event
            WHERE channel = $1 AND message_number > $2
            ORDER BY message_number ASC
            "#,
        )
        .bind(channel)
        .bind(after)
        .fetch_all(executor)
        .await
        .with_context(|| format!("Failed to load events of channel {}", channel))?;

        rows.into_iter().map(RocketEvent::try_from).collect()
    }

    pub async fn count_by_channel<'e, E>(executor: E, channel: Uuid) -> Result<i64>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rocket_event WHERE channel = $1")
            .bind(channel)
            .fetch_one(executor)
            .await
            .with_context(|| format!("Failed to count events of channel {}", channel))?;

        Ok(count)
    }
}
