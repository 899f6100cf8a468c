use crate::calendar;
use crate::models::Habit;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

type Bucket = BTreeMap<String, BTreeMap<u32, bool>>;

/// Completion flags keyed by month bucket, habit id and day of month.
///
/// Reads never fail: any missing level is treated as "not done".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Checks(BTreeMap<String, Bucket>);

/// Only `null` is rejected. Anything else that is not an object is skipped,
/// day keys that are not numbers are dropped and any flag other than `true`
/// reads as `false`.
impl<'de> Deserialize<'de> for Checks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Err(de::Error::custom("checks must not be null")),
            Value::Object(buckets) => Ok(Self(
                buckets
                    .iter()
                    .filter_map(|(key, bucket)| {
                        Some((key.clone(), lenient_bucket(bucket.as_object()?)))
                    })
                    .collect(),
            )),
            _ => Ok(Self::default()),
        }
    }
}

fn lenient_bucket(bucket: &Map<String, Value>) -> Bucket {
    bucket
        .iter()
        .filter_map(|(habit_id, days)| {
            Some((habit_id.clone(), lenient_days(days.as_object()?)))
        })
        .collect()
}

fn lenient_days(days: &Map<String, Value>) -> BTreeMap<u32, bool> {
    days.iter()
        .filter_map(|(day, done)| {
            let day = day.trim().parse::<u32>().ok()?;
            Some((day, done.as_bool() == Some(true)))
        })
        .collect()
}

/// `YYYY-MM` bucket key for a zero-indexed month.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year}-{:02}", month + 1)
}

fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (year, month) = key.split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month - 1))
}

impl Checks {
    pub fn ensure_month_bucket(&mut self, year: i32, month: u32, habits: &[Habit]) {
        let bucket = self.0.entry(month_key(year, month)).or_default();
        for habit in habits {
            bucket.entry(habit.id.clone()).or_default();
        }
    }

    pub fn set(&mut self, year: i32, month: u32, habit_id: &str, day: u32, value: bool) {
        self.0
            .entry(month_key(year, month))
            .or_default()
            .entry(habit_id.to_string())
            .or_default()
            .insert(day, value);
    }

    pub fn get(&self, year: i32, month: u32, habit_id: &str, day: u32) -> bool {
        self.0
            .get(&month_key(year, month))
            .and_then(|bucket| bucket.get(habit_id))
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn has_bucket(&self, year: i32, month: u32) -> bool {
        self.0.contains_key(&month_key(year, month))
    }

    #[cfg(test)]
    pub fn has_habit_entry(&self, year: i32, month: u32, habit_id: &str) -> bool {
        self.0
            .get(&month_key(year, month))
            .is_some_and(|bucket| bucket.contains_key(habit_id))
    }

    /// Every calendar date on which the habit was marked done, across all buckets.
    pub fn completed_dates(&self, habit_id: &str) -> BTreeSet<NaiveDate> {
        let mut dates = BTreeSet::new();
        for (key, bucket) in &self.0 {
            let Some((year, month)) = parse_month_key(key) else {
                continue;
            };
            let Some(days) = bucket.get(habit_id) else {
                continue;
            };
            dates.extend(
                days.iter()
                    .filter(|(_, done)| **done)
                    .filter_map(|(day, _)| calendar::date(year, month, *day)),
            );
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: &str) -> Habit {
        Habit::new(id, id, "")
    }

    #[test]
    fn month_key_is_one_indexed_and_padded() {
        assert_eq!(month_key(2024, 0), "2024-01");
        assert_eq!(month_key(2024, 11), "2024-12");
    }

    #[test]
    fn ensure_creates_entries_for_every_habit_and_is_idempotent() {
        let mut checks = Checks::default();
        let habits = vec![habit("a"), habit("b")];
        checks.ensure_month_bucket(2024, 2, &habits);
        checks.set(2024, 2, "a", 3, true);
        checks.ensure_month_bucket(2024, 2, &habits);

        assert!(checks.has_bucket(2024, 2));
        assert!(checks.has_habit_entry(2024, 2, "a"));
        assert!(checks.has_habit_entry(2024, 2, "b"));
        assert!(checks.get(2024, 2, "a", 3));
    }

    #[test]
    fn missing_keys_read_as_false() {
        let checks = Checks::default();
        assert!(!checks.get(2024, 2, "missing", 1));

        let mut checks = Checks::default();
        checks.ensure_month_bucket(2024, 2, &[habit("a")]);
        assert!(!checks.get(2024, 2, "a", 9));
        assert!(!checks.get(2024, 2, "b", 9));
    }

    #[test]
    fn out_of_month_days_are_stored_but_never_dated() {
        let mut checks = Checks::default();
        checks.set(2024, 1, "a", 31, true);
        assert!(checks.get(2024, 1, "a", 31));
        assert!(checks.completed_dates("a").is_empty());
    }

    #[test]
    fn completed_dates_span_buckets_and_skip_false() {
        let mut checks = Checks::default();
        checks.set(2024, 1, "a", 29, true);
        checks.set(2024, 2, "a", 1, true);
        checks.set(2024, 2, "a", 2, false);
        checks.set(2024, 2, "b", 3, true);

        let dates: Vec<String> = checks
            .completed_dates("a")
            .into_iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn serializes_day_keys_as_strings() {
        let mut checks = Checks::default();
        checks.set(2024, 2, "a", 5, true);
        let json = serde_json::to_value(&checks).unwrap();
        assert_eq!(json, serde_json::json!({ "2024-03": { "a": { "5": true } } }));

        let back: Checks = serde_json::from_value(json).unwrap();
        assert_eq!(back, checks);
    }

    #[test]
    fn mistyped_entries_are_tolerated() {
        let checks: Checks = serde_json::from_value(serde_json::json!({
            "2024-03": {
                "a": { "1": true, "2": null, "x": true, "4": "yes", "5": 1 },
                "b": 7
            },
            "2024-04": []
        }))
        .unwrap();

        assert!(checks.get(2024, 2, "a", 1));
        assert!(!checks.get(2024, 2, "a", 2));
        assert!(!checks.get(2024, 2, "a", 4));
        assert!(!checks.get(2024, 2, "a", 5));
        assert!(!checks.has_habit_entry(2024, 2, "b"));
        assert!(!checks.has_bucket(2024, 3));
        assert_eq!(checks.completed_dates("a").len(), 1);

        assert!(serde_json::from_value::<Checks>(serde_json::Value::Null).is_err());
    }
}
