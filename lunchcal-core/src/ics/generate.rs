//! ICS document generation for menu calendars.

use chrono::{DateTime, NaiveDate, Utc};

use super::escape::escape_text;
use crate::menu::MenuDay;
use crate::school::School;

pub const PRODID: &str = "-//a2schools-cal//EN";

/// Event title used when a day has no entree.
pub const FALLBACK_SUMMARY: &str = "Lunch Menu";

const DESCRIPTION_HEADER: &str = "Full menu:";

/// Stable event UID for a school's menu on a given day.
///
/// Regenerating the calendar yields the same UID for the same day, which
/// lets subscribed calendar apps update events in place.
pub fn event_uid(slug: &str, date: NaiveDate, district: &str) -> String {
    format!("{}-{}@{}", slug, date.format("%Y-%m-%d"), district)
}

/// Build the calendar for a school, stamped with the current time.
pub fn build_calendar(school: &School, days: &[MenuDay], district: &str) -> String {
    build_calendar_at(school, days, district, Utc::now())
}

/// Build the calendar for a school with an explicit DTSTAMP.
///
/// Days are written in the order given; callers pass them sorted by date.
pub fn build_calendar_at(
    school: &School,
    days: &[MenuDay],
    district: &str,
    stamp: DateTime<Utc>,
) -> String {
    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&school.name)),
    ];

    for day in days {
        let summary = day
            .entrees
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_SUMMARY);
        let description = format!("{}\n{}", DESCRIPTION_HEADER, day.foods.join("\n"));
        let uid = event_uid(&school.slug, day.date, district);

        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", escape_text(&uid)));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!("DTSTART;VALUE=DATE:{}", day.date.format("%Y%m%d")));
        lines.push(format!("SUMMARY:{}", escape_text(summary)));
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = lines.join("\r\n");
    output.push_str("\r\n");
    output
}
