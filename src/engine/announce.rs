use async_trait::async_trait;

use crate::repo::Giveaway;
use super::Outcome;

/// Outbound seam to the presentation layer. Delivery is fire-and-forget:
/// once the resolved flag is flipped, a failed announcement is only logged.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, giveaway: &Giveaway, outcome: &Outcome) -> anyhow::Result<()>;
}

/// Used when the process runs headless, without a chat client attached.
#[derive(Default)]
pub struct LogAnnouncer;

#[async_trait]
impl Announcer for LogAnnouncer {
    async fn announce(&self, giveaway: &Giveaway, outcome: &Outcome) -> anyhow::Result<()> {
        match outcome {
            Outcome::Winners(winners) =>
                log::info!("giveaway {} ('{}'): the winners are {winners:?}", giveaway.id, giveaway.prize),
            Outcome::NoEntries =>
                log::info!("giveaway {} ('{}') finished without a single entry", giveaway.id, giveaway.prize),
            Outcome::AlreadyResolved => (),
        }
        Ok(())
    }
}
