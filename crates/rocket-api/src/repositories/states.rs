//! Rocket state repository

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Executor, FromRow, Postgres};
use uuid::Uuid;

use crate::domain::{RocketSort, RocketState, SortField, SortOrder};

#[derive(Debug, FromRow)]
struct StateRow {
    channel: Uuid,
    rocket_type: Option<String>,
    mission: Option<String>,
    speed: i32,
    status: String,
    exploded_reason: Option<String>,
    launched_at: Option<DateTime<Utc>>,
    last_updated_at: Option<DateTime<Utc>>,
    last_processed_msg_number: i32,
    stale: bool,
}

impl TryFrom<StateRow> for RocketState {
    type Error = anyhow::Error;

    fn try_from(row: StateRow) -> Result<Self> {
        Ok(Self {
            channel: row.channel,
            rocket_type: row.rocket_type,
            mission: row.mission,
            speed: row.speed,
            status: row.status.parse()?,
            exploded_reason: row.exploded_reason,
            launched_at: row.launched_at,
            last_updated_at: row.last_updated_at,
            last_processed_msg_number: row.last_processed_msg_number,
            stale: row.stale,
        })
    }
}

const SELECT_STATE: &str = r#"
    SELECT channel, rocket_type, mission, speed, status, exploded_reason,
           launched_at, last_updated_at, last_processed_msg_number, stale
    FROM rocket_state
"#;

fn sort_column(field: SortField) -> &'static str {
    match field {
        SortField::Type => "rocket_type",
        SortField::Speed => "speed",
        SortField::Mission => "mission",
        SortField::Status => "status",
    }
}

fn order_by_clause(sort: RocketSort) -> String {
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(
        "ORDER BY {} {} NULLS LAST, channel ASC",
        sort_column(sort.field),
        direction
    )
}

pub struct StateRepository;

impl StateRepository {
    /// Insert or replace the state of a rocket
    pub async fn upsert<'e, E>(executor: E, state: &RocketState) -> Result<()>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO rocket_state (
                channel, rocket_type, mission, speed, status, exploded_reason,
                launched_at, last_updated_at, last_processed_msg_number, stale
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (channel)
            DO UPDATE SET
                rocket_type = EXCLUDED.rocket_type,
                mission = EXCLUDED.mission,
                speed = EXCLUDED.speed,
                status = EXCLUDED.status,
                exploded_reason = EXCLUDED.exploded_reason,
                launched_at = EXCLUDED.launched_at,
                last_updated_at = EXCLUDED.last_updated_at,
                last_processed_msg_number = EXCLUDED.last_processed_msg_number,
                stale = EXCLUDED.stale
            "#,
        )
        .bind(state.channel)
        .bind(&state.rocket_type)
        .bind(&state.mission)
        .bind(state.speed)
        .bind(state.status.as_str())
        .bind(&state.exploded_reason)
        .bind(state.launched_at)
        .bind(state.last_updated_at)
        .bind(state.last_processed_msg_number)
        .bind(state.stale)
        .execute(executor)
        .await
        .with_context(|| format!("Failed to upsert state of channel {}", state.channel))?;

        Ok(())
    }

    pub async fn find_by_channel<'e, E>(executor: E, channel: Uuid) -> Result<Option<RocketState>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("{SELECT_STATE} WHERE channel = $1");
        let row = sqlx::query_as::<_, StateRow>(&query)
            .bind(channel)
            .fetch_optional(executor)
            .await
            .with_context(|| format!("Failed to find state of channel {}", channel))?;

        row.map(RocketState::try_from).transpose()
    }

    /// All rocket states; absent values sort last in either direction
    pub async fn list<'e, E>(executor: E, sort: RocketSort) -> Result<Vec<RocketState>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("{SELECT_STATE} {}", order_by_clause(sort));
        let rows = sqlx::query_as::<_, StateRow>(&query)
            .fetch_all(executor)
            .await
            .context("Failed to list rocket states")?;

        rows.into_iter().map(RocketState::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_default() {
        assert_eq!(
            order_by_clause(RocketSort::default()),
            "ORDER BY rocket_type ASC NULLS LAST, channel ASC"
        );
    }

    #[test]
    fn test_order_by_speed_desc() {
        assert_eq!(
            order_by_clause(RocketSort::new(SortField::Speed, SortOrder::Desc)),
            "ORDER BY speed DESC NULLS LAST, channel ASC"
        );
    }

    #[test]
    fn test_sort_columns() {
        assert_eq!(sort_column(SortField::Mission), "mission");
        assert_eq!(sort_column(SortField::Status), "status");
    }
}
