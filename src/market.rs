//! Market session classification. The session table is fixed in UTC; the
//! trade's local date/time is localized through its IANA timezone and the
//! UTC time-of-day tested against each window.

use chrono::{LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Session windows as UTC [start, end) times. Windows wrap across
/// midnight when end < start.
pub const MARKET_SESSIONS_UTC: [(&str, (u32, u32), (u32, u32)); 4] = [
    ("Sydney", (21, 0), (6, 0)),
    ("Tokyo", (0, 0), (9, 0)),
    ("London", (8, 0), (17, 0)),
    ("New York", (13, 0), (22, 0)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionClass {
    /// One or more sessions are open at the given instant.
    Active(Vec<&'static str>),
    Closed,
    /// The date/time string could not be parsed. Reported as a
    /// classification, never as an error to the caller.
    InvalidInput,
}

impl SessionClass {
    /// Human label: overlaps as "A+B" joined by " / " when more than one
    /// session is open, the session name when exactly one is.
    pub fn label(&self) -> String {
        match self {
            SessionClass::Active(names) if names.len() > 1 => {
                let mut overlaps = Vec::new();
                for i in 0..names.len() {
                    for j in (i + 1)..names.len() {
                        overlaps.push(format!("{}+{}", names[i], names[j]));
                    }
                }
                overlaps.join(" / ")
            }
            SessionClass::Active(names) => names.join(" / "),
            SessionClass::Closed => "Closed".to_string(),
            SessionClass::InvalidInput => "Invalid Date/Time".to_string(),
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("session table holds valid times")
}

fn is_open(t: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start < end {
        start <= t && t < end
    } else {
        t >= start || t < end
    }
}

/// Sessions open at the given UTC time-of-day, in table order.
pub fn open_sessions(utc_time: NaiveTime) -> Vec<&'static str> {
    MARKET_SESSIONS_UTC
        .iter()
        .filter(|(_, (sh, sm), (eh, em))| is_open(utc_time, hm(*sh, *sm), hm(*eh, *em)))
        .map(|(name, _, _)| *name)
        .collect()
}

/// Classify a local date/time. An unrecognized timezone falls back to
/// UTC; an unparseable date or time yields `InvalidInput`.
pub fn classify(date: &str, time: &str, tz_name: &str) -> SessionClass {
    let tz: Tz = tz_name.parse().unwrap_or(Tz::UTC);

    let mut time = time.trim().to_string();
    if !time.contains(':') {
        time.push_str(":00");
    }

    let Ok(date) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") else {
        return SessionClass::InvalidInput;
    };
    let Ok(time) = NaiveTime::parse_from_str(&time, "%H:%M") else {
        return SessionClass::InvalidInput;
    };

    let localized = match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        // The local time does not exist (DST gap).
        LocalResult::None => return SessionClass::InvalidInput,
    };
    let utc_time = localized.with_timezone(&Utc).time();

    let open = open_sessions(utc_time);
    if open.is_empty() {
        SessionClass::Closed
    } else {
        SessionClass::Active(open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_session_after_tokyo_close() {
        // 09:30 UTC: Tokyo closed at 09:00, London alone.
        let class = classify("2024-01-15", "09:30", "UTC");
        assert_eq!(class, SessionClass::Active(vec!["London"]));
        assert_eq!(class.label(), "London");
    }

    #[test]
    fn test_london_new_york_overlap() {
        let class = classify("2024-01-15", "13:30", "UTC");
        assert_eq!(class.label(), "London+New York");
    }

    #[test]
    fn test_sydney_tokyo_overlap_wraps_midnight() {
        let class = classify("2024-01-15", "02:00", "UTC");
        assert_eq!(class.label(), "Sydney+Tokyo");
    }

    #[test]
    fn test_wraparound_boundaries() {
        // New York closes at exactly 22:00; Sydney has been open since 21:00.
        assert_eq!(open_sessions(hm(22, 0)), vec!["Sydney"]);
        // Sydney closes at 06:00 leaving Tokyo alone until London opens.
        assert_eq!(open_sessions(hm(6, 0)), vec!["Tokyo"]);
        assert_eq!(classify("2024-01-15", "07:00", "UTC").label(), "Tokyo");
        // The four windows cover the whole day; Closed only renders when
        // no window matches.
        assert_eq!(SessionClass::Closed.label(), "Closed");
    }

    #[test]
    fn test_timezone_localization() {
        // Winter date: 08:30 US/Eastern is 13:30 UTC.
        let class = classify("2024-01-15", "08:30", "US/Eastern");
        assert_eq!(class.label(), "London+New York");
    }

    #[test]
    fn test_unknown_timezone_falls_back_to_utc() {
        let class = classify("2024-01-15", "09:30", "Mars/Olympus");
        assert_eq!(class.label(), "London");
    }

    #[test]
    fn test_invalid_date_or_time() {
        assert_eq!(classify("not-a-date", "09:30", "UTC"), SessionClass::InvalidInput);
        assert_eq!(classify("2024-01-15", "25:99", "UTC"), SessionClass::InvalidInput);
        assert_eq!(
            classify("2024-01-15", "xx", "UTC").label(),
            "Invalid Date/Time"
        );
    }

    #[test]
    fn test_bare_hour_is_padded() {
        // "9" is read as "9:00", inside the London window.
        assert_eq!(classify("2024-01-15", "9", "UTC").label(), "London");
    }

    #[test]
    fn test_triple_overlap_renders_all_pairs() {
        let class = SessionClass::Active(vec!["Sydney", "Tokyo", "London"]);
        assert_eq!(
            class.label(),
            "Sydney+Tokyo / Sydney+London / Tokyo+London"
        );
    }
}
