use chrono::{DateTime, Local};

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::TimeFormatData;
use crate::time::{classify_message_day, format_message_time_at, parse_timestamp};
use crate::{ClientError, ClientResult};

pub fn format(value: &str, now: Option<&str>) -> ClientResult<SuccessEnvelope> {
    success("time format", describe(value, now)?)
}

/// Labels `value` against `now`, or against the current local time when
/// `now` is absent.
pub fn describe(value: &str, now: Option<&str>) -> ClientResult<TimeFormatData> {
    let now = resolve_now(now)?;
    let message =
        parse_timestamp(value, &Local).ok_or_else(|| ClientError::invalid_timestamp(value))?;
    let day = classify_message_day(&message, &now);
    let display = format_message_time_at(value, &now)?;

    Ok(TimeFormatData {
        input: value.to_string(),
        now: now.to_rfc3339(),
        day: day.as_str().to_string(),
        display,
    })
}

fn resolve_now(value: Option<&str>) -> ClientResult<DateTime<Local>> {
    match value {
        Some(raw) => parse_timestamp(raw, &Local).ok_or_else(|| ClientError::invalid_timestamp(raw)),
        None => Ok(Local::now()),
    }
}
