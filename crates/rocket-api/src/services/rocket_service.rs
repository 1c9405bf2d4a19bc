//! Rocket use cases: receive a message, read one rocket, list rockets

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use shared::DbPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::{RocketEvent, RocketSnapshot, RocketSort, RocketState};
use crate::repositories::{self, EventRepository, SnapshotRepository, StateRepository};

/// Result of handing a message to the service
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiveOutcome {
    /// The event was stored and the rocket state recomputed
    Accepted {
        state: RocketState,
        snapshot_taken: bool,
    },
    /// `(channel, message_number)` was already stored; nothing changed
    Duplicate,
}

#[async_trait]
pub trait RocketService: Send + Sync {
    /// Store an event and recompute the state of its rocket
    async fn receive_message(&self, event: RocketEvent) -> Result<ReceiveOutcome>;

    async fn get_rocket(&self, channel: Uuid) -> Result<Option<RocketState>>;

    async fn list_rockets(&self, sort: RocketSort) -> Result<Vec<RocketState>>;
}

/// PostgreSQL-backed rocket service
#[derive(Clone)]
pub struct PgRocketService {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl PgRocketService {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl RocketService for PgRocketService {
    async fn receive_message(&self, event: RocketEvent) -> Result<ReceiveOutcome> {
        let channel = event.channel();
        let message_number = event.message_number();

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        repositories::lock_channel(&mut *tx, channel).await?;

        if !EventRepository::insert(&mut *tx, &event).await? {
            tx.rollback().await.context("Failed to roll back transaction")?;
            counter!("rocket_messages_total", "outcome" => "duplicate").increment(1);
            debug!(
                channel = %channel,
                message_number,
                "Duplicate message ignored"
            );
            return Ok(ReceiveOutcome::Duplicate);
        }

        let now = self.clock.now();
        let base = SnapshotRepository::find_latest(&mut *tx, channel)
            .await?
            .map(|snapshot| snapshot.to_state())
            .unwrap_or_else(|| RocketState::empty(channel, now));

        let events =
            EventRepository::find_by_channel_after(&mut *tx, channel, base.last_processed_msg_number)
                .await?;
        let state = base.apply_all(&events, now);

        StateRepository::upsert(&mut *tx, &state).await?;

        let snapshot_taken = if state.should_snapshot() {
            let snapshot = RocketSnapshot::from_state(&state, now);
            SnapshotRepository::insert(&mut *tx, &snapshot).await?
        } else {
            false
        };

        tx.commit().await.context("Failed to commit transaction")?;

        counter!("rocket_messages_total", "outcome" => "accepted").increment(1);
        if snapshot_taken {
            counter!("rocket_snapshots_total").increment(1);
        }
        if state.stale {
            counter!("rocket_stale_recomputations_total").increment(1);
            warn!(
                channel = %channel,
                message_number,
                last_processed = state.last_processed_msg_number,
                "Gap in message sequence, rocket state is stale"
            );
        }

        info!(
            channel = %channel,
            message_number,
            message_type = %event.message_type(),
            last_processed = state.last_processed_msg_number,
            replayed = events.len(),
            snapshot_taken,
            "Rocket message processed"
        );

        Ok(ReceiveOutcome::Accepted {
            state,
            snapshot_taken,
        })
    }

    async fn get_rocket(&self, channel: Uuid) -> Result<Option<RocketState>> {
        StateRepository::find_by_channel(&self.pool, channel).await
    }

    async fn list_rockets(&self, sort: RocketSort) -> Result<Vec<RocketState>> {
        StateRepository::list(&self.pool, sort).await
    }
}
