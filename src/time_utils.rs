// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
///
/// Channel timestamps cross the wire in this shape; the chart renderer
/// parses them back into Dates.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-06-01T09:00:00Z");
    }
}
