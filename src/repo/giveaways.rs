use chrono::{DateTime, Utc};
use derive_more::Constructor;

use crate::domain::{ChannelId, GiveawayId, GuildId, MessageId, UserId};
use crate::repository;

#[derive(Debug, Clone)]
pub struct Giveaway {
    pub id: GiveawayId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    // Stays empty until the announcement message is rendered and attached.
    pub message_id: Option<MessageId>,
    pub host_id: UserId,
    pub prize: String,
    pub winners: u32,
    pub ends_at: DateTime<Utc>,
    pub ended: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Constructor)]
pub struct NewGiveaway {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub host_id: UserId,
    pub prize: String,
    pub winners: u32,
    pub ends_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct GiveawayEntity {
    id: i64,
    guild_id: i64,
    channel_id: i64,
    message_id: Option<i64>,
    host_id: i64,
    prize: String,
    winners: i64,
    ends_at: DateTime<Utc>,
    ended: bool,
    created_at: DateTime<Utc>,
}

impl From<GiveawayEntity> for Giveaway {
    fn from(value: GiveawayEntity) -> Self {
        Self {
            id: GiveawayId(value.id),
            guild_id: GuildId(value.guild_id),
            channel_id: ChannelId(value.channel_id),
            message_id: value.message_id.map(MessageId),
            host_id: UserId(value.host_id),
            prize: value.prize,
            winners: value.winners as u32,
            ends_at: value.ends_at,
            ended: value.ended,
            created_at: value.created_at,
        }
    }
}

repository!(Giveaways,
    pub async fn create(&self, new: NewGiveaway) -> anyhow::Result<Giveaway> {
        let entity: GiveawayEntity = sqlx::query_as(
            "INSERT INTO giveaways (guild_id, channel_id, host_id, prize, winners, ends_at, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                RETURNING *")
            .bind(new.guild_id.0)
            .bind(new.channel_id.0)
            .bind(new.host_id.0)
            .bind(&new.prize)
            .bind(new.winners as i64)
            .bind(new.ends_at)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;
        Ok(entity.into())
    }
,
    pub async fn get(&self, id: GiveawayId) -> anyhow::Result<Option<Giveaway>> {
        let entity: Option<GiveawayEntity> = sqlx::query_as(
            "SELECT * FROM giveaways WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entity.map(Into::into))
    }
,
    pub async fn get_by_announcement(&self, channel_id: ChannelId, message_id: MessageId) -> anyhow::Result<Option<Giveaway>> {
        let entity: Option<GiveawayEntity> = sqlx::query_as(
            "SELECT * FROM giveaways WHERE channel_id = ? AND message_id = ?")
            .bind(channel_id.0)
            .bind(message_id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entity.map(Into::into))
    }
,
    pub async fn get_unresolved_expired(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Giveaway>> {
        let entities: Vec<GiveawayEntity> = sqlx::query_as(
            "SELECT * FROM giveaways WHERE ended = FALSE AND ends_at <= ? ORDER BY ends_at")
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
,
    // The conditional update is the whole point: out of any number of
    // concurrent callers, exactly one observes rows_affected() == 1.
    pub async fn try_resolve(&self, id: GiveawayId) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE giveaways SET ended = TRUE WHERE id = ? AND ended = FALSE")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
,
    pub async fn attach_announcement(&self, id: GiveawayId, channel_id: ChannelId, message_id: MessageId) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE giveaways SET channel_id = ?, message_id = ? WHERE id = ? AND ended = FALSE")
            .bind(channel_id.0)
            .bind(message_id.0)
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() == 1)
    }
,
    pub async fn list_active(&self, guild_id: GuildId) -> anyhow::Result<Vec<Giveaway>> {
        let entities: Vec<GiveawayEntity> = sqlx::query_as(
            "SELECT * FROM giveaways WHERE guild_id = ? AND ended = FALSE ORDER BY ends_at")
            .bind(guild_id.0)
            .fetch_all(&self.pool)
            .await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
,
    pub async fn purge_resolved_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "DELETE FROM giveaway_entries WHERE giveaway_id IN
                (SELECT id FROM giveaways WHERE ended = TRUE AND ends_at <= ?)")
            .bind(cutoff)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query(
            "DELETE FROM giveaways WHERE ended = TRUE AND ends_at <= ?")
            .bind(cutoff)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected())
    }
);
