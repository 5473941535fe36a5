use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;

use crate::config::{AppConfig, RetentionConfig};
use crate::metrics;
use crate::repo::Repositories;
use super::{Announcer, GiveawayService, Outcome};

/// Periodically discovers giveaways whose deadline has passed and asks the
/// service to resolve them. Ticks never overlap: a sweep runs to completion,
/// announcements included, before the next one is scheduled.
pub struct Sweeper {
    repos: Repositories,
    service: GiveawayService,
    announcer: Arc<dyn Announcer>,
    interval: Duration,
    retention: RetentionConfig,
    ticks: u64,
}

impl Sweeper {
    pub fn new(repos: Repositories, service: GiveawayService, announcer: Arc<dyn Announcer>,
               config: &AppConfig) -> Self {
        Self {
            repos,
            service,
            announcer,
            interval: config.sweep_interval,
            retention: config.retention,
            ticks: 0,
        }
    }

    /// Runs until the shutdown future completes. The shutdown signal is only
    /// consulted between ticks, so an in-flight sweep always finishes.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) {
        log::info!("the sweeper is starting with a {:?} interval", self.interval);
        let mut timer = tokio::time::interval(self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = timer.tick() => self.sweep().await,
                _ = &mut shutdown => {
                    log::info!("the sweeper is shutting down");
                    break;
                }
            }
        }
    }

    pub(crate) async fn sweep(&mut self) {
        self.ticks += 1;
        metrics::SWEEP_COUNTER.inc();
        let now = Utc::now();
        let expired = match self.repos.giveaways.get_unresolved_expired(now).await {
            Ok(expired) => expired,
            Err(err) => {
                log::error!("couldn't fetch the expired giveaways: {err}");
                return;
            }
        };
        for giveaway in expired {
            match self.service.resolve(&giveaway).await {
                Ok(Outcome::AlreadyResolved) => (),
                Ok(outcome) => {
                    if let Err(err) = self.announcer.announce(&giveaway, &outcome).await {
                        log::error!("couldn't announce the outcome of giveaway {}: {err}", giveaway.id);
                    }
                }
                // The row stays unresolved and the next sweep picks it up again.
                Err(err) => log::error!("couldn't resolve giveaway {}: {err}", giveaway.id),
            }
        }
        self.maybe_purge(now).await;
    }

    async fn maybe_purge(&self, now: DateTime<Utc>) {
        let every = u64::from(self.retention.purge_every_ticks);
        if every == 0 || self.ticks % every != 0 {
            return;
        }
        let cutoff = now - chrono::Duration::days(self.retention.keep_resolved_days);
        match self.repos.giveaways.purge_resolved_before(cutoff).await {
            Ok(0) => (),
            Ok(purged) => log::info!("purged {purged} giveaways resolved more than {} days ago",
                self.retention.keep_resolved_days),
            Err(err) => log::warn!("couldn't purge the old resolved giveaways: {err}"),
        }
    }
}
