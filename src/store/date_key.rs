use chrono::NaiveDate;

/// Canonical on-disk form of a calendar day. Date-only, so keys are
/// timezone-stable and sort lexically in chronological order.
const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn to_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a stored day key. Accepts the canonical `YYYY-MM-DD` form and, for
/// calendars written by older builds, a full RFC 3339 timestamp whose civil
/// date is taken. Anything else is `None`; callers treat that as an absent
/// entry rather than an error.
pub fn from_key(key: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(key, DATE_KEY_FORMAT) {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(key)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_any_day() {
        for date in [
            NaiveDate::from_ymd_opt(2025, 4, 8).unwrap(),
            NaiveDate::from_ymd_opt(1999, 12, 31).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        ] {
            assert_eq!(from_key(&to_key(date)), Some(date));
        }
    }

    #[test]
    fn keys_sort_chronologically() {
        let a = to_key(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
        let b = to_key(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert!(a < b);
    }

    #[test]
    fn legacy_timestamp_keys_parse_to_their_day() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 8).unwrap();
        assert_eq!(from_key("2025-04-08T00:00:00Z"), Some(day));
        assert_eq!(from_key("2025-04-08T22:15:03+02:00"), Some(day));
    }

    #[test]
    fn malformed_keys_are_absent() {
        for bad in ["", "not-a-date", "2025-13-01", "2025-02-30", "08/04/2025"] {
            assert_eq!(from_key(bad), None, "{bad:?} should not parse");
        }
    }
}
