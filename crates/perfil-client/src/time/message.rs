use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use super::parse::parse_timestamp;
use crate::{ClientError, ClientResult};

// es-ES abbreviated month names, as rendered for `{ day: "numeric", month: "short" }`.
const MONTHS_ES_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDay {
    Today,
    Yesterday,
    Older,
}

impl MessageDay {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Older => "older",
        }
    }
}

/// Buckets `message` by calendar day relative to `now`, in the zone of `now`.
///
/// Only the dates are compared. Messages dated after `now` fall into
/// [`MessageDay::Older`].
pub fn classify_message_day<Tz: TimeZone>(
    message: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> MessageDay {
    let message_day = message.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();

    if message_day == today {
        MessageDay::Today
    } else if today.pred_opt() == Some(message_day) {
        MessageDay::Yesterday
    } else {
        MessageDay::Older
    }
}

/// Chat timestamp label relative to the current local time.
pub fn format_message_time(value: &str) -> ClientResult<String> {
    format_message_time_at(value, &Local::now())
}

/// Chat timestamp label relative to `now`:
/// `HH:MM` today, `Ayer HH:MM` yesterday, `D MMM` otherwise.
pub fn format_message_time_at<Tz: TimeZone>(
    value: &str,
    now: &DateTime<Tz>,
) -> ClientResult<String> {
    let message = parse_timestamp(value, &now.timezone())
        .ok_or_else(|| ClientError::invalid_timestamp(value))?;

    let label = match classify_message_day(&message, now) {
        MessageDay::Today => clock_label(&message),
        MessageDay::Yesterday => format!("Ayer {}", clock_label(&message)),
        MessageDay::Older => day_month_label(&message),
    };
    Ok(label)
}

fn clock_label<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

fn day_month_label<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let month = MONTHS_ES_SHORT
        .get(value.month0() as usize)
        .copied()
        .unwrap_or("");
    format!("{} {month}", value.day())
}
