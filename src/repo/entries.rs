use chrono::Utc;

use crate::domain::{GiveawayId, UserId};
use crate::repository;

repository!(Entries,
    // Re-entering is a no-op, not an error: toggle events may be duplicated
    // or arrive out of order, and the unique pair absorbs both.
    pub async fn add(&self, giveaway_id: GiveawayId, uid: UserId) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO giveaway_entries (giveaway_id, uid, entered_at) VALUES (?, ?, ?)
                ON CONFLICT (giveaway_id, uid) DO NOTHING")
            .bind(giveaway_id.0)
            .bind(uid.0)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
,
    pub async fn remove(&self, giveaway_id: GiveawayId, uid: UserId) -> anyhow::Result<()> {
        sqlx::query(
            "DELETE FROM giveaway_entries WHERE giveaway_id = ? AND uid = ?")
            .bind(giveaway_id.0)
            .bind(uid.0)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
,
    pub async fn list(&self, giveaway_id: GiveawayId) -> anyhow::Result<Vec<UserId>> {
        let uids: Vec<i64> = sqlx::query_scalar(
            "SELECT uid FROM giveaway_entries WHERE giveaway_id = ? ORDER BY entered_at, uid")
            .bind(giveaway_id.0)
            .fetch_all(&self.pool)
            .await?;
        Ok(uids.into_iter().map(UserId).collect())
    }
,
    pub async fn count(&self, giveaway_id: GiveawayId) -> anyhow::Result<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT count(*) FROM giveaway_entries WHERE giveaway_id = ?")
            .bind(giveaway_id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }
);
