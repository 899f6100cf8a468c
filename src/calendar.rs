use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A run of consecutive days of one month, Monday..Sunday at most.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub label: String,
    pub days: Vec<u32>,
}

/// Calendar date for a zero-indexed month.
pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 11 { (year + 1, 1) } else { (year, month + 2) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    date(year, month, days_in_month(year, month))
}

/// 0 = Monday .. 6 = Sunday.
pub fn day_of_week_monday_indexed(date: NaiveDate) -> u32 {
    (date.weekday().num_days_from_sunday() + 6) % 7
}

pub fn start_of_week_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(day_of_week_monday_indexed(date) as i64)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    day_of_week_monday_indexed(date) >= 5
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("?")
}

pub fn month_title(year: i32, month: u32) -> String {
    format!("{} {year}", month_name(month))
}

/// Splits a month into week groups. Day 1 always opens the first group and
/// every later Monday opens a new one.
pub fn compute_weeks(year: i32, month: u32) -> Vec<Week> {
    let mut groups: Vec<Vec<u32>> = Vec::new();
    for day in 1..=days_in_month(year, month) {
        let monday = date(year, month, day)
            .map(|d| day_of_week_monday_indexed(d) == 0)
            .unwrap_or(false);
        match groups.last_mut() {
            Some(current) if !monday => current.push(day),
            _ => groups.push(vec![day]),
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(idx, days)| Week {
            label: format!("Week {}", idx + 1),
            days,
        })
        .collect()
}
