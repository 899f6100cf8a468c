use crate::calendar::Week;
use crate::checks::Checks;
use chrono::{Datelike, Local};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_ICON: &str = "✅";
pub const DEFAULT_REMINDER_TIME: &str = "20:00";
pub const DEFAULT_WEEKLY_GOAL: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub reminder_enabled: bool,
    #[serde(default = "default_reminder_time", deserialize_with = "lenient_time")]
    pub reminder_time: String,
    #[serde(default = "default_weekly_goal", deserialize_with = "lenient_goal")]
    pub weekly_goal: u8,
}

impl Habit {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            reminder_enabled: false,
            reminder_time: default_reminder_time(),
            weekly_goal: DEFAULT_WEEKLY_GOAL,
        }
    }

    pub fn display_icon(&self) -> &str {
        if self.icon.is_empty() { DEFAULT_ICON } else { &self.icon }
    }
}

/// The whole persisted record. `habits` and `checks` are mandatory; a record
/// without them is treated as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default = "current_year", deserialize_with = "lenient_year")]
    pub year: i32,
    #[serde(default = "current_month", deserialize_with = "lenient_month")]
    pub month: u32,
    pub habits: Vec<Habit>,
    pub checks: Checks,
}

impl AppData {
    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: &str) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    pub fn ensure_current_bucket(&mut self) {
        self.checks.ensure_month_bucket(self.year, self.month, &self.habits);
    }
}

pub fn clamp_weekly_goal(goal: f64) -> u8 {
    if goal.is_finite() {
        goal.round().clamp(1.0, 7.0) as u8
    } else {
        DEFAULT_WEEKLY_GOAL
    }
}

fn default_reminder_time() -> String {
    DEFAULT_REMINDER_TIME.to_string()
}

fn default_weekly_goal() -> u8 {
    DEFAULT_WEEKLY_GOAL
}

fn current_year() -> i32 {
    Local::now().year()
}

fn current_month() -> u32 {
    Local::now().month0()
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}

fn lenient_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(time) => time,
        _ => default_reminder_time(),
    })
}

fn lenient_goal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_f64()
        .map(clamp_weekly_goal)
        .unwrap_or(DEFAULT_WEEKLY_GOAL))
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_i64()
        .filter(|year| (1..=9999).contains(year))
        .map(|year| year as i32)
        .unwrap_or_else(current_year))
}

fn lenient_month<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .filter(|month| *month < 12)
        .map(|month| month as u32)
        .unwrap_or_else(current_month))
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub habit_id: String,
    pub day: u32,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
pub struct HabitForm {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    pub reminder_enabled: Option<bool>,
    pub reminder_time: Option<String>,
    pub weekly_goal: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub to: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub reminder_enabled: bool,
    pub reminder_time: String,
    pub weekly_goal: u8,
    pub checks: Vec<bool>,
    pub done: u32,
    pub percent: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub week_done: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayColumn {
    pub day: u32,
    pub weekend: bool,
    pub done: u32,
    /// `None` when there are no active habits to measure against.
    pub percent: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekSummary {
    pub label: String,
    pub days: Vec<u32>,
    pub percent: u32,
}

impl WeekSummary {
    pub fn from_week(week: Week, percent: u32) -> Self {
        Self {
            label: week.label,
            days: week.days,
            percent,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Overall {
    pub percent: u32,
    pub done: u32,
    pub total: u32,
    pub perfect_days: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub month_key: String,
    pub title: String,
    pub days_in_month: u32,
    pub reference_date: String,
    pub days: Vec<DayColumn>,
    pub habits: Vec<HabitRow>,
    pub weeks: Vec<WeekSummary>,
    pub overall: Overall,
}
