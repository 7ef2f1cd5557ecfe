//! Logtime conversions
//!
//! `locations_stats` reports per-day presence as `HH:MM:SS.ssssss` strings;
//! hours can exceed 24 for aggregated entries.

/// Parse a `HH:MM:SS[.fraction]` duration into whole seconds.
/// Returns `None` on any malformed component.
pub fn time_to_seconds(time: &str) -> Option<u64> {
    let mut parts = time.split(':');
    let hours: u64 = parts.next()?.parse().ok()?;
    let minutes: u64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || minutes >= 60 || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds as u64)
}

/// Format whole seconds back into `HH:MM:SS`
pub fn seconds_to_time(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
