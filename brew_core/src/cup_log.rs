//! Daily cup log encoding and calendar-day filtering.
//!
//! Cup timestamps persist as a single JSON array of floating-point
//! seconds-since-epoch, e.g. `[1715000000.0, 1715003600.5]`. Decoding is
//! lossless to microsecond precision and degrades to an empty sequence on
//! any malformed input; nothing in this module panics or returns an error.
//!
//! Day boundaries are derived from an explicit "now" and timezone so the
//! same raw text filters identically under test and in production.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// The half-open calendar-day interval `[start, end)` used to select which
/// logged cups count as "today".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// The window for the calendar day containing `now` in `tz`.
    pub fn containing<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            start: start_of_today(now, tz),
            end: end_of_today(now, tz),
        }
    }

    /// Inclusive of `start`, exclusive of `end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// Encode cup timestamps as a JSON array of seconds-since-epoch.
///
/// Never fails observably: an empty sequence encodes as `"[]"` and a
/// serialization error falls back to the same literal.
pub fn encode(cups: &[DateTime<Utc>]) -> String {
    let seconds: Vec<f64> = cups.iter().map(epoch_seconds).collect();
    match serde_json::to_string(&seconds) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Failed to encode cup log: {}. Storing empty log.", e);
            "[]".into()
        }
    }
}

/// Decode a JSON array of seconds-since-epoch back into cup timestamps.
///
/// Malformed input yields an empty sequence; entries that are non-finite or
/// outside the representable timestamp range are dropped.
pub fn decode(raw: &str) -> Vec<DateTime<Utc>> {
    let seconds: Vec<f64> = match serde_json::from_str(raw) {
        Ok(seconds) => seconds,
        Err(e) => {
            tracing::warn!("Unparseable cup log ({}). Treating as empty.", e);
            return Vec::new();
        }
    };

    seconds.into_iter().filter_map(from_epoch_seconds).collect()
}

/// Decode `raw` and retain only cups within the current calendar day.
pub fn today_timestamps<Tz: TimeZone>(raw: &str, now: DateTime<Utc>, tz: &Tz) -> Vec<DateTime<Utc>> {
    let window = DayWindow::containing(now, tz);
    decode(raw)
        .into_iter()
        .filter(|cup| window.contains(*cup))
        .collect()
}

/// Local midnight of the day containing `now`.
pub fn start_of_today<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let today = now.with_timezone(tz).date_naive();
    instant_on(tz, today, 0, 0).unwrap_or(now)
}

/// Local midnight of the following day. Degrades to `start_of_today` when
/// the next day cannot be reconstructed in `tz`.
pub fn end_of_today<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let today = now.with_timezone(tz).date_naive();
    today
        .checked_add_days(Days::new(1))
        .and_then(|tomorrow| instant_on(tz, tomorrow, 0, 0))
        .unwrap_or_else(|| start_of_today(now, tz))
}

/// Noon today in `tz` (for the "first two before noon" rule). Degrades to
/// `start_of_today` when noon cannot be reconstructed.
pub fn noon_today<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    instant_today(now, tz, 12, 0).unwrap_or_else(|| start_of_today(now, tz))
}

/// A wall-clock time on the day containing `now`, resolved in `tz`.
/// `None` when the local time does not exist (e.g. inside a DST gap).
pub(crate) fn instant_today<Tz: TimeZone>(
    now: DateTime<Utc>,
    tz: &Tz,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(tz).date_naive();
    instant_on(tz, today, hour, minute)
}

fn instant_on<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Option<DateTime<Utc>> {
    tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, minute, 0)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
}

fn epoch_seconds(cup: &DateTime<Utc>) -> f64 {
    cup.timestamp() as f64 + f64::from(cup.timestamp_subsec_nanos()) / 1e9
}

fn from_epoch_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1e6).round();
    if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}
