//! Date formatting and parsing for task display.
//!
//! Timestamps are stored in UTC and shown in local time using the short
//! `YYYY-MM-DD HH:MM` form. The same form is accepted when a deadline is typed
//! on the command line.
//!
//! ```rust
//! use tasklist::libs::formatter::{format_deadline, parse_deadline};
//!
//! let due = parse_deadline("2030-06-01 09:00")?;
//! assert_eq!(format_deadline(Some(due)), "2030-06-01 09:00");
//! assert_eq!(format_deadline(None), "-");
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATETIME_FORMAT).to_string()
}

/// Formats an optional deadline, using `-` when there is none.
pub fn format_deadline(deadline: Option<DateTime<Utc>>) -> String {
    deadline.map(|d| format_timestamp(&d)).unwrap_or_else(|| "-".to_string())
}

/// Parses `YYYY-MM-DD HH:MM` in local time into a UTC timestamp.
///
/// During a DST fold the earlier of the two instants is used.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input.trim(), DATETIME_FORMAT)
        .map_err(|_| msg_error_anyhow!(Message::InvalidDueDate(input.to_string())))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(input.to_string())))
}

/// The first instant of tomorrow in local time, as UTC.
///
/// Used as the upper bound for "due today".
pub fn end_of_local_day(now: DateTime<Local>) -> DateTime<Utc> {
    now.date_naive()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .map(|midnight| midnight.with_timezone(&Utc))
        .unwrap_or_else(|| now.with_timezone(&Utc))
}
