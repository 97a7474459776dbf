use chrono::{DateTime, Datelike, NaiveTime, Utc};
use tracing::warn;

use domain::weighing::parse_compact;

/// Inclusive `[from, to]` range of weighing timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Midnight (UTC) of `now`'s day until `now`
    pub fn today(now: DateTime<Utc>) -> Self {
        Self::new(now.date_naive().and_time(NaiveTime::MIN).and_utc(), now)
    }

    /// First day of `now`'s month at midnight (UTC) until `now`
    pub fn this_month(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        let first = date.with_day(1).unwrap_or(date);
        Self::new(first.and_time(NaiveTime::MIN).and_utc(), now)
    }

    /// Overrides `self` with optional `YYYYMMDDHHMMSS` bounds.
    ///
    /// A missing bound keeps the default; an unparsable one is logged and
    /// also keeps the default.
    pub fn with_bounds(self, from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: bound_or(from, self.from, "from"),
            to: bound_or(to, self.to, "to"),
        }
    }
}

fn bound_or(value: Option<&str>, default: DateTime<Utc>, name: &str) -> DateTime<Utc> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => default,
        Some(raw) => parse_compact(raw).unwrap_or_else(|| {
            warn!(bound = name, value = raw, "Invalid time bound, using default {}", default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 18, 14, 30, 12).unwrap()
    }

    #[test]
    fn test_today() {
        let window = TimeWindow::today(now());
        assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 5, 18, 0, 0, 0).unwrap());
        assert_eq!(window.to, now());
    }

    #[test]
    fn test_this_month() {
        let window = TimeWindow::this_month(now());
        assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_bounds_override_defaults() {
        let window = TimeWindow::today(now()).with_bounds(Some("20250501000000"), None);
        assert_eq!(window.from, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(window.to, now());
    }

    #[test]
    fn test_invalid_bound_falls_back() {
        let default = TimeWindow::today(now());
        assert_eq!(default.with_bounds(Some("garbage"), Some("")), default);
    }
}
