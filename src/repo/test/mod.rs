
use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::domain::{ChannelId, GuildId, UserId};
use crate::repo;
use crate::repo::NewGiveaway;

pub const HOST_ID: i64 = 12345;
pub const GUILD_ID: i64 = 67890;
pub const CHANNEL_ID: i64 = 111;
pub const PRIZE: &str = "a test prize";

// A single connection keeps every statement on the same in-memory database.
pub async fn start_sqlite() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("couldn't open an in-memory database");
    repo::MIGRATOR.run(&pool)
        .await
        .expect("couldn't apply the migrations");
    pool
}

pub fn new_giveaway(winners: u32, ends_in: Duration) -> NewGiveaway {
    NewGiveaway::new(
        GuildId(GUILD_ID),
        ChannelId(CHANNEL_ID),
        UserId(HOST_ID),
        PRIZE.to_owned(),
        winners,
        Utc::now() + ends_in,
    )
}
