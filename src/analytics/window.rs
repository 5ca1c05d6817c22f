use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

/// Reporting period relative to a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum WindowKind {
    Day,
    Week,
    Month,
}

impl WindowKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" | "today" | "d" => Some(Self::Day),
            "week" | "w" => Some(Self::Week),
            "month" | "m" => Some(Self::Month),
            _ => None,
        }
    }
}

impl std::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Time interval `[start, end)`, or `[start, end]` when `end_inclusive` is set.
///
/// Day and Week windows are half-open. The Month window ends on the last
/// second of the month and includes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) kind: WindowKind,
    pub(crate) start: DateTime<Utc>,
    pub(crate) end: DateTime<Utc>,
    pub(crate) end_inclusive: bool,
}

impl Window {
    /// Resolve `kind` against `now`, using the calendar of `now`'s time zone.
    pub(crate) fn resolve<Tz: TimeZone>(now: &DateTime<Tz>, kind: WindowKind) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        match kind {
            WindowKind::Day => {
                let start = local_midnight(&tz, today);
                Self {
                    kind,
                    start,
                    end: start + Duration::hours(24),
                    end_inclusive: false,
                }
            }
            WindowKind::Week => {
                // Wall-clock subtraction; falls back to 168h when the local
                // time a week ago does not exist or is ambiguous.
                let start = now
                    .clone()
                    .checked_sub_days(Days::new(7))
                    .unwrap_or_else(|| now.clone() - Duration::days(7));
                Self {
                    kind,
                    start: start.with_timezone(&Utc),
                    end: now.with_timezone(&Utc),
                    end_inclusive: false,
                }
            }
            WindowKind::Month => {
                let first = today - Days::new(u64::from(today.day0()));
                let next = first + Months::new(1);
                Self {
                    kind,
                    start: local_midnight(&tz, first),
                    end: local_midnight(&tz, next) - Duration::seconds(1),
                    end_inclusive: true,
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, ts: &DateTime<Utc>) -> bool {
        if *ts < self.start {
            return false;
        }
        if self.end_inclusive {
            *ts <= self.end
        } else {
            *ts < self.end
        }
    }
}

/// First instant of `date` in `tz`. If a DST jump skips midnight, the first
/// existing local hour of that day is used.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=2)
        .find_map(|h| {
            tz.from_local_datetime(&(midnight + Duration::hours(h)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
