//! Poll loop — drives fetch, diff, dispatch, deliver.
//!
//! One sequential loop owns the state cache; no other component reads or
//! writes it, so no locking is needed. Each cycle walks the configured
//! players in order, compares the fresh snapshot against the cached one, and
//! on any difference (a never-seen player counts as different) passes the
//! snapshot through the rule chain, delivering the first match to the
//! notifier with the player uuid as the display name.
//!
//! Failure policy: a failed key validation at startup is fatal and the loop
//! never starts. A failed fetch mid-cycle is logged and that player skipped
//! for the cycle, keeping its cached snapshot. A failed delivery is logged
//! and the cycle continues.

use crate::hypixel::StatusProvider;
use crate::rules::RuleChain;
use crate::types::Snapshot;
use crate::webhook::{Notifier, WebhookMessage};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Last-observed snapshot per player.
///
/// Bounded by the tracked player set; entries are overwritten, never evicted.
#[derive(Debug, Default)]
pub struct StateCache {
    inner: HashMap<String, Snapshot>,
}

impl StateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previous snapshot for a player, `None` if never polled.
    pub fn get(&self, uuid: &str) -> Option<&Snapshot> {
        self.inner.get(uuid)
    }

    /// Unconditionally replace the cached snapshot.
    pub fn insert(&mut self, uuid: impl Into<String>, snapshot: Snapshot) {
        self.inner.insert(uuid.into(), snapshot);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Counters for one completed cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Players successfully polled.
    pub polled: usize,
    /// Players skipped due to fetch errors.
    pub skipped: usize,
    /// Notifications delivered.
    pub notified: usize,
}

/// The watch loop over a status provider and a notifier.
pub struct Watcher<P, N> {
    provider: P,
    notifier: N,
    chain: RuleChain,
    uuids: Vec<String>,
    interval: Duration,
    shutdown: Arc<Notify>,
}

impl<P: StatusProvider, N: Notifier> Watcher<P, N> {
    pub fn new(
        provider: P,
        notifier: N,
        chain: RuleChain,
        uuids: Vec<String>,
        interval: Duration,
    ) -> Self {
        Self {
            provider,
            notifier,
            chain,
            uuids,
            interval,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Handle for requesting shutdown from another task (e.g. a ctrl-c
    /// handler). The inter-cycle sleep races this, so shutdown does not wait
    /// out the full interval.
    pub fn shutdown_handle(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Validate the API key, then poll until shutdown.
    pub async fn run(&self) -> Result<()> {
        info!("validating API key");
        let code = self
            .provider
            .validate_key()
            .await
            .context("API key validation failed")?;
        debug!(code, "API key validated");

        info!(
            players = self.uuids.len(),
            rules = self.chain.len(),
            interval_secs = self.interval.as_secs(),
            "entering poll loop"
        );

        let mut cache = StateCache::new();
        loop {
            let stats = self.cycle(&mut cache).await;
            debug!(
                polled = stats.polled,
                skipped = stats.skipped,
                notified = stats.notified,
                "cycle complete"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.notified() => {
                    info!("shutdown requested; stopping poll loop");
                    return Ok(());
                }
            }
        }
    }

    /// Run one poll cycle over all tracked players, in configured order.
    pub async fn cycle(&self, cache: &mut StateCache) -> CycleStats {
        let mut stats = CycleStats::default();

        for uuid in &self.uuids {
            let current = match self.provider.fetch_status(uuid).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(uuid, error = %e, "status fetch failed; skipping this cycle");
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.polled += 1;

            // A never-seen player always counts as changed.
            let changed = cache.get(uuid).map_or(true, |prev| prev != &current);
            cache.insert(uuid.clone(), current.clone());

            if !changed {
                continue;
            }

            let Some(content) = self.chain.dispatch(&current) else {
                debug!(uuid, "state changed but no rule matched");
                continue;
            };

            let message = WebhookMessage::new(content).with_username(uuid.clone());
            match self.notifier.send(&message).await {
                Ok(()) => {
                    info!(uuid, content = %message.content, "notification delivered");
                    stats.notified += 1;
                }
                Err(e) => {
                    warn!(uuid, error = %e, "notification delivery failed");
                }
            }
        }

        stats
    }
}
