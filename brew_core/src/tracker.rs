//! Cup tracking orchestration.
//!
//! [`CupTracker`] ties the store, the day-windowed log, and the caution
//! rules together so the presentation layer only triggers actions and
//! displays results. Writes persist the filtered list, so cups from earlier
//! days fall out of storage on the first write of a new day.

use crate::rules::{self, Caution, CautionPolicy, DaySummary};
use crate::store::CupStore;
use crate::{cup_log, Result};
use chrono::{DateTime, TimeZone, Utc};

/// Outcome of logging one cup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CupAdded {
    /// Today's count including the new cup
    pub count: usize,
    /// At most one advisory, chosen by fixed priority
    pub caution: Option<Caution>,
}

/// Orchestrates add/remove/count over an injected store
pub struct CupTracker<S: CupStore> {
    store: S,
    policy: CautionPolicy,
}

impl<S: CupStore> CupTracker<S> {
    pub fn new(store: S, policy: CautionPolicy) -> Self {
        Self { store, policy }
    }

    /// Today's cup timestamps in stored order
    pub fn today<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Vec<DateTime<Utc>> {
        cup_log::today_timestamps(&self.store.get(), now, tz)
    }

    /// Number of cups logged today
    pub fn count<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> usize {
        self.today(now, tz).len()
    }

    /// Log a cup at `now` and evaluate the caution rules against today's
    /// cups including the new one.
    pub fn add_cup<Tz: TimeZone>(&mut self, now: DateTime<Utc>, tz: &Tz) -> Result<CupAdded> {
        let mut cups = self.today(now, tz);
        cups.push(now);
        self.store.set(&cup_log::encode(&cups))?;

        let cutoff = self.policy.cutoff(now, tz);
        let caution = rules::warning(&cups, now, Some(cutoff), self.policy.max_cups, tz);

        tracing::info!("Logged a cup ({} today, caution: {:?})", cups.len(), caution);
        Ok(CupAdded {
            count: cups.len(),
            caution,
        })
    }

    /// Remove the most recent of today's cups. Returns the new count; a
    /// no-op when nothing was logged today.
    pub fn remove_last<Tz: TimeZone>(&mut self, now: DateTime<Utc>, tz: &Tz) -> Result<usize> {
        let mut cups = self.today(now, tz);
        cups.sort_unstable();
        if cups.pop().is_none() {
            return Ok(0);
        }
        self.store.set(&cup_log::encode(&cups))?;

        tracing::info!("Removed the latest cup ({} remaining today)", cups.len());
        Ok(cups.len())
    }

    /// End-of-day summary for today's cups, if any were logged
    pub fn summary<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> Option<DaySummary> {
        let cups = self.today(now, tz);
        let cutoff = self.policy.cutoff(now, tz);
        rules::daily_summary(&cups, now, Some(cutoff), tz)
    }
}
