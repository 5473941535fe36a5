mod announce;
mod sweeper;
mod tracker;


use chrono::Utc;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

pub use announce::*;
pub use sweeper::*;
pub use tracker::*;

use crate::domain::{parse_duration, ChannelId, EngineError, EngineResult, GiveawayId, GuildId, MessageId, UserId};
use crate::metrics;
use crate::repo::{Giveaway, NewGiveaway, Repositories};

/// What happened to a giveaway when someone tried to finish it. The caller
/// is responsible for rendering and delivering the announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Winners(Vec<UserId>),
    NoEntries,
    AlreadyResolved,
}

pub struct ActiveGiveaway {
    pub giveaway: Giveaway,
    pub entry_count: u64,
}

#[derive(Clone)]
pub struct GiveawayService {
    repos: Repositories,
}

impl GiveawayService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, guild_id: GuildId, channel_id: ChannelId, host_id: UserId,
                        prize: &str, winners: u32, duration: &str) -> EngineResult<Giveaway> {
        if winners < 1 {
            return Err(EngineError::Validation("the number of winners must be at least 1".to_owned()));
        }
        let prize = prize.trim();
        if prize.is_empty() {
            return Err(EngineError::Validation("the prize description must not be blank".to_owned()));
        }
        let span = parse_duration(duration)?;
        let giveaway = self.repos.giveaways
            .create(NewGiveaway::new(guild_id, channel_id, host_id, prize.to_owned(), winners, Utc::now() + span))
            .await?;
        metrics::STARTED_COUNTER.inc();
        log::info!("giveaway {} for '{}' started by {} in guild {}, ends at {}",
            giveaway.id, giveaway.prize, host_id, guild_id, giveaway.ends_at);
        Ok(giveaway)
    }

    pub async fn attach_announcement(&self, id: GiveawayId, channel_id: ChannelId, message_id: MessageId) -> EngineResult<()> {
        let attached = self.repos.giveaways.attach_announcement(id, channel_id, message_id).await?;
        if attached {
            Ok(())
        } else {
            Err(EngineError::NotFound)
        }
    }

    pub async fn end_early(&self, id: GiveawayId, requester: UserId) -> EngineResult<Outcome> {
        let giveaway = self.repos.giveaways.get(id).await?
            .filter(|g| !g.ended)
            .ok_or(EngineError::NotFound)?;
        log::info!("giveaway {id} is being ended early by {requester}");
        self.resolve(&giveaway).await
    }

    /// Finishes a giveaway at most once, whoever asks first: the entry set is
    /// read before the conditional flag flip, so a failed read leaves the row
    /// unresolved and the next sweep retries it.
    pub async fn resolve(&self, giveaway: &Giveaway) -> EngineResult<Outcome> {
        let entries = self.repos.entries.list(giveaway.id).await?;
        if !self.repos.giveaways.try_resolve(giveaway.id).await? {
            return Ok(Outcome::AlreadyResolved);
        }
        let outcome = if entries.is_empty() {
            metrics::RESOLVED_COUNTER.no_entries();
            Outcome::NoEntries
        } else {
            metrics::RESOLVED_COUNTER.winners();
            let mut rng = OsRng::default();
            Outcome::Winners(draw_winners(&entries, giveaway.winners as usize, &mut rng))
        };
        log::info!("giveaway {} for '{}' resolved: {:?}", giveaway.id, giveaway.prize, outcome);
        Ok(outcome)
    }

    pub async fn list_active(&self, guild_id: GuildId) -> EngineResult<Vec<ActiveGiveaway>> {
        let giveaways = self.repos.giveaways.list_active(guild_id).await?;
        let mut listed = Vec::with_capacity(giveaways.len());
        for giveaway in giveaways {
            let entry_count = self.repos.entries.count(giveaway.id).await?;
            listed.push(ActiveGiveaway { giveaway, entry_count });
        }
        Ok(listed)
    }
}

// Uniform sampling without replacement; fewer entrants than prizes means
// everyone wins.
fn draw_winners<R: Rng + ?Sized>(entries: &[UserId], winners: usize, rng: &mut R) -> Vec<UserId> {
    entries.choose_multiple(rng, winners).copied().collect()
}
