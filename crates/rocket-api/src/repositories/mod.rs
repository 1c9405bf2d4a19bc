//! Repository layer for database access

pub mod events;
pub mod snapshots;
pub mod states;

use anyhow::{Context, Result};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub use events::EventRepository;
pub use snapshots::SnapshotRepository;
pub use states::StateRepository;

/// Advisory lock key of a channel
pub fn channel_lock_key(channel: Uuid) -> i64 {
    let (high, low) = channel.as_u64_pair();
    (high ^ low) as i64
}

/// Serialize writers of one channel until the surrounding transaction ends
pub async fn lock_channel<'e, E>(executor: E, channel: Uuid) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(channel_lock_key(channel))
        .execute(executor)
        .await
        .with_context(|| format!("Failed to lock channel {}", channel))?;

    Ok(())
}
