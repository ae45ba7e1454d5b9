use std::time::Duration;

use jiff::{SignedDuration, SpanRelativeTo};

/// Accepts `30s`, `1m 30s`, ISO 8601 (`PT30S`) or a bare number of seconds.
pub fn parse_timeout(input: &str) -> Result<Duration, String> {
    let duration = input
        .parse::<SignedDuration>()
        .or_else(|_| {
            input
                .parse::<jiff::Span>()
                .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
        })
        .or_else(|_| input.trim().parse::<u64>().map(|secs| SignedDuration::from_secs(secs as i64)))
        .map_err(|_| format!("Invalid timeout '{input}'"))?;

    if duration.is_zero() || duration.is_negative() {
        return Err(format!("Timeout must be positive, got '{input}'"));
    }

    Duration::try_from(duration).map_err(|err| err.to_string())
}
