//! Caffeine caution rules.
//!
//! Research-backed validation over today's cup timestamps: at most one
//! caution per logged cup, chosen by fixed priority (cutoff > daily limit >
//! noon spread), plus an optional end-of-day summary. Warn only, never
//! block, never fail.
//!
//! Evaluation is pure: "now" and the timezone are explicit inputs, so the
//! rules are deterministic and testable without a wall clock.

use crate::cup_log;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default cutoff: 4:00 PM local (for ~midnight bedtime).
pub const DEFAULT_CUTOFF_HOUR: u32 = 16;
pub const DEFAULT_CUTOFF_MINUTE: u32 = 0;
/// Default max cups per day (FDA ~400 mg, roughly 4 cups).
pub const DEFAULT_MAX_CUPS: usize = 4;

/// A single advisory shown after logging a cup
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Caution {
    LateCaffeine,
    DailyLimit,
    NoonSpread,
}

impl Caution {
    /// The user-facing text, consumed verbatim by the presentation layer
    pub fn message(&self) -> &'static str {
        match self {
            Caution::LateCaffeine => "Late caffeine—may affect sleep.",
            Caution::DailyLimit => "You're at the daily limit—take it easy.",
            Caution::NoonSpread => {
                "For 3+ cups, having the first two before noon helps keep energy steady."
            }
        }
    }
}

impl fmt::Display for Caution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// End-of-day advisory derived from the most recent cup's timing
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DaySummary {
    LastCupLate,
    GoodForSleep,
}

impl DaySummary {
    pub fn message(&self) -> &'static str {
        match self {
            DaySummary::LastCupLate => "Last cup late—consider earlier cutoff tomorrow.",
            DaySummary::GoodForSleep => "You're good for sleep.",
        }
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Caution thresholds, typically built from [`crate::Config`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CautionPolicy {
    pub cutoff_hour: u32,
    pub cutoff_minute: u32,
    pub max_cups: usize,
}

impl Default for CautionPolicy {
    fn default() -> Self {
        Self {
            cutoff_hour: DEFAULT_CUTOFF_HOUR,
            cutoff_minute: DEFAULT_CUTOFF_MINUTE,
            max_cups: DEFAULT_MAX_CUPS,
        }
    }
}

impl CautionPolicy {
    /// This policy's cutoff instant on the day containing `now`
    pub fn cutoff<Tz: TimeZone>(&self, now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
        cutoff_today(now, tz, self.cutoff_hour, self.cutoff_minute)
    }
}

/// Cutoff time today, e.g. 4:00 PM in the user's timezone. Degrades to
/// `start_of_today` when the local time cannot be reconstructed.
pub fn cutoff_today<Tz: TimeZone>(
    now: DateTime<Utc>,
    tz: &Tz,
    hour: u32,
    minute: u32,
) -> DateTime<Utc> {
    cup_log::instant_today(now, tz, hour, minute)
        .unwrap_or_else(|| cup_log::start_of_today(now, tz))
}

/// Returns the single caution to show (if any). Priority: cutoff > max cups
/// > first-two-before-noon; first match wins.
///
/// Call this *after* the new cup has been added; pass the full list of
/// today's cups including the new timestamp. A `cutoff` of `None` uses the
/// default 16:00 local cutoff.
pub fn warning<Tz: TimeZone>(
    cup_timestamps: &[DateTime<Utc>],
    now: DateTime<Utc>,
    cutoff: Option<DateTime<Utc>>,
    max_cups: usize,
    tz: &Tz,
) -> Option<Caution> {
    let cutoff = cutoff
        .unwrap_or_else(|| cutoff_today(now, tz, DEFAULT_CUTOFF_HOUR, DEFAULT_CUTOFF_MINUTE));
    let noon = cup_log::noon_today(now, tz);

    // 1. Cutoff: the new cup lands at or after cutoff
    if now >= cutoff {
        return Some(Caution::LateCaffeine);
    }

    // 2. Max cups: at or over the daily limit
    if cup_timestamps.len() >= max_cups {
        return Some(Caution::DailyLimit);
    }

    // 3. First two before noon: 3+ cups but fewer than 2 before noon
    if cup_timestamps.len() >= 3 {
        let before_noon = cup_timestamps.iter().filter(|cup| **cup < noon).count();
        if before_noon < 2 {
            return Some(Caution::NoonSpread);
        }
    }

    None
}

/// Optional end-of-day summary. Inspects only the latest cup: at/after
/// cutoff reads as a late last cup, otherwise good for sleep. `None` when
/// no cups were logged.
pub fn daily_summary<Tz: TimeZone>(
    cup_timestamps: &[DateTime<Utc>],
    now: DateTime<Utc>,
    cutoff: Option<DateTime<Utc>>,
    tz: &Tz,
) -> Option<DaySummary> {
    let last = cup_timestamps.iter().max().copied()?;
    let cutoff = cutoff
        .unwrap_or_else(|| cutoff_today(now, tz, DEFAULT_CUTOFF_HOUR, DEFAULT_CUTOFF_MINUTE));

    if last >= cutoff {
        Some(DaySummary::LastCupLate)
    } else {
        Some(DaySummary::GoodForSleep)
    }
}
