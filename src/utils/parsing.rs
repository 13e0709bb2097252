use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Timelike};

use crate::domain::models::{DateRange, TimeLog, TimesheetEntry};
use crate::error::TimesheetError;

/// Longest explicit range the board accepts, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Groups logs by the day they started, newest day first. With `fill` set,
/// every day of `range` is emitted even when it has no logs.
pub fn group_by_date(logs: Vec<TimeLog>, range: &DateRange, fill: bool) -> Vec<TimesheetEntry> {
    let mut grouped: BTreeMap<NaiveDate, Vec<TimeLog>> = BTreeMap::new();
    for log in logs {
        grouped.entry(log.started_at.date()).or_default().push(log);
    }

    if fill {
        for day in range.from.iter_days().take_while(|day| *day <= range.to) {
            grouped.entry(day).or_default();
        }
    }

    grouped
        .into_iter()
        .rev()
        .map(|(date, mut tasks)| {
            tasks.sort_by(|a, b| a.started_at.cmp(&b.started_at));
            TimesheetEntry { date, tasks }
        })
        .collect()
}

pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%Y/%m/%d"))
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%d-%m-%Y"))
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%d/%m/%Y"))
        .ok()
}

pub fn week_of(day: NaiveDate) -> DateRange {
    let from = day - Duration::days(day.weekday().num_days_from_monday() as i64);
    DateRange {
        from,
        to: from + Duration::days(6),
    }
}

pub fn month_of(day: NaiveDate) -> DateRange {
    let from = NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(day);
    let next_month = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    };
    let to = next_month.map(|first| first - Duration::days(1)).unwrap_or(day);
    DateRange { from, to }
}

pub fn initial_date_range() -> DateRange {
    week_of(chrono::Local::now().date_naive())
}

pub fn parse_date_range(input: &str) -> Result<DateRange, TimesheetError> {
    parse_date_range_at(input, chrono::Local::now().date_naive())
}

pub fn parse_date_range_at(input: &str, today: NaiveDate) -> Result<DateRange, TimesheetError> {
    match input.trim().to_uppercase().as_str() {
        "AUTO" | "AUTO-WEEK" | "WEEK" => return Ok(week_of(today)),
        "AUTO-MONTH" | "MONTH" => return Ok(month_of(today)),
        _ => {}
    }

    let (start, end) = input.split_once("..").ok_or_else(|| {
        TimesheetError::InvalidRange(
            "use YYYY-MM-DD..YYYY-MM-DD, WEEK or MONTH".to_string(),
        )
    })?;
    let from = parse_date(start.trim())
        .ok_or_else(|| TimesheetError::InvalidRange(format!("bad start date: {}", start.trim())))?;
    let to = parse_date(end.trim())
        .ok_or_else(|| TimesheetError::InvalidRange(format!("bad end date: {}", end.trim())))?;
    if from > to {
        return Err(TimesheetError::InvalidRange(format!(
            "{from} is after {to}"
        )));
    }
    if (to - from).num_days() >= MAX_RANGE_DAYS {
        return Err(TimesheetError::InvalidRange(format!(
            "ranges are limited to {MAX_RANGE_DAYS} days"
        )));
    }
    Ok(DateRange { from, to })
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

pub fn greeting() -> &'static str {
    greeting_for_hour(chrono::Local::now().hour())
}
