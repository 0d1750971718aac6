// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Format a UTC timestamp as an ISO 8601 string with millisecond precision
/// and a `Z` suffix (e.g. `2026-10-19T12:00:00.000Z`).
pub fn format_iso8601_millis(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Timestamp `seconds` from `now`, formatted for `X-RateLimit-Reset`.
pub fn reset_at(now: DateTime<Utc>, seconds: i64) -> String {
    format_iso8601_millis(now + Duration::seconds(seconds))
}
