use crate::domain::{ChannelId, EngineResult, MessageId, UserId};
use crate::metrics;
use crate::repo::Repositories;

/// Feeds membership-toggle events from the chat platform into the entry set.
/// Events for unknown messages and finished giveaways are dropped silently;
/// this component never triggers a resolution.
#[derive(Clone)]
pub struct EntryTracker {
    repos: Repositories,
}

impl EntryTracker {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn on_toggle_add(&self, channel_id: ChannelId, message_id: MessageId, uid: UserId) -> EngineResult<()> {
        let Some(giveaway) = self.repos.giveaways.get_by_announcement(channel_id, message_id).await? else {
            return Ok(());
        };
        if giveaway.ended {
            log::debug!("ignoring an entry of {uid} into the finished giveaway {}", giveaway.id);
            return Ok(());
        }
        self.repos.entries.add(giveaway.id, uid).await?;
        metrics::ENTRY_COUNTER.added();
        Ok(())
    }

    pub async fn on_toggle_remove(&self, channel_id: ChannelId, message_id: MessageId, uid: UserId) -> EngineResult<()> {
        let Some(giveaway) = self.repos.giveaways.get_by_announcement(channel_id, message_id).await? else {
            return Ok(());
        };
        if giveaway.ended {
            return Ok(());
        }
        self.repos.entries.remove(giveaway.id, uid).await?;
        metrics::ENTRY_COUNTER.removed();
        Ok(())
    }
}
