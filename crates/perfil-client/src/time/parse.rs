use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Reads a message timestamp into `zone`.
///
/// Values with `Z` or an explicit offset are converted into `zone`. Date-times
/// without an offset are wall-clock times in `zone`. A bare `YYYY-MM-DD` is
/// UTC midnight.
pub fn parse_timestamp<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<DateTime<Tz>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(zone));
    }
    let with_offset = zulu_as_offset(trimmed);
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&with_offset, format) {
            return Some(parsed.with_timezone(zone));
        }
    }

    if trimmed.len() == 10
        && let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(zone));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return resolve_wall_clock(zone, naive);
        }
    }

    None
}

fn zulu_as_offset(value: &str) -> String {
    match value.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    }
}

// Skipped wall-clock times (DST gaps) move forward by one hour.
fn resolve_wall_clock<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&naive).earliest().or_else(|| {
        zone.from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
    })
}
