use crate::calendar::{self, Week};
use crate::checks::{month_key, Checks};
use crate::models::{AppData, DayColumn, Habit, HabitRow, MonthView, Overall, WeekSummary};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::collections::BTreeSet;

/// Integer percentage rounded half up; zero when the denominator is zero.
pub fn percentage(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (u64::from(numerator), u64::from(denominator));
    ((200 * n + d) / (2 * d)) as u32
}

/// "Today" when the viewed month is the current one, otherwise the last day
/// of the viewed month.
pub fn reference_date(year: i32, month: u32, today: NaiveDate) -> NaiveDate {
    if today.year() == year && today.month0() == month {
        return today;
    }
    calendar::last_day_of_month(year, month).unwrap_or(today)
}

pub fn habit_month_done(checks: &Checks, year: i32, month: u32, habit_id: &str) -> u32 {
    (1..=calendar::days_in_month(year, month))
        .filter(|day| checks.get(year, month, habit_id, *day))
        .count() as u32
}

pub fn habit_month_percentage(checks: &Checks, year: i32, month: u32, habit_id: &str) -> u32 {
    percentage(
        habit_month_done(checks, year, month, habit_id),
        calendar::days_in_month(year, month),
    )
}

pub fn day_done(checks: &Checks, year: i32, month: u32, habits: &[Habit], day: u32) -> u32 {
    habits
        .iter()
        .filter(|habit| checks.get(year, month, &habit.id, day))
        .count() as u32
}

/// Share of habits completed on `day`, or `None` when there are no habits.
pub fn day_percentage(
    checks: &Checks,
    year: i32,
    month: u32,
    habits: &[Habit],
    day: u32,
) -> Option<u32> {
    if habits.is_empty() {
        return None;
    }
    Some(percentage(
        day_done(checks, year, month, habits, day),
        habits.len() as u32,
    ))
}

pub fn week_percentage(
    checks: &Checks,
    year: i32,
    month: u32,
    habits: &[Habit],
    week: &Week,
) -> u32 {
    let done: u32 = week
        .days
        .iter()
        .map(|day| day_done(checks, year, month, habits, *day))
        .sum();
    percentage(done, week.days.len() as u32 * habits.len() as u32)
}

pub fn overall(checks: &Checks, year: i32, month: u32, habits: &[Habit]) -> Overall {
    let dim = calendar::days_in_month(year, month);
    let mut done = 0;
    let mut perfect_days = 0;
    for day in 1..=dim {
        let completed = day_done(checks, year, month, habits, day);
        done += completed;
        if !habits.is_empty() && completed == habits.len() as u32 {
            perfect_days += 1;
        }
    }
    let total = dim * habits.len() as u32;
    Overall {
        percent: percentage(done, total),
        done,
        total,
        perfect_days,
    }
}

/// Consecutive completed days ending at `reference`, walking backwards.
pub fn current_streak(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = reference;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive calendar days in `dates`.
pub fn best_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in dates {
        run = match previous {
            Some(prev) if *date - prev == Duration::days(1) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(*date);
    }
    best
}

/// Completions inside the Monday..Sunday window containing `reference`.
pub fn week_progress(dates: &BTreeSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let start = calendar::start_of_week_monday(reference);
    let end = start + Duration::days(6);
    dates.range(start..=end).count() as u32
}

pub fn build_month_view(data: &AppData) -> MonthView {
    build_month_view_at(Local::now().date_naive(), data)
}

pub fn build_month_view_at(today: NaiveDate, data: &AppData) -> MonthView {
    let (year, month) = (data.year, data.month);
    let checks = &data.checks;
    let habits = &data.habits;
    let dim = calendar::days_in_month(year, month);
    let reference = reference_date(year, month, today);

    let days = (1..=dim)
        .map(|day| DayColumn {
            day,
            weekend: calendar::date(year, month, day)
                .map(calendar::is_weekend)
                .unwrap_or(false),
            done: day_done(checks, year, month, habits, day),
            percent: day_percentage(checks, year, month, habits, day),
        })
        .collect();

    let rows = habits
        .iter()
        .map(|habit| {
            let dates = checks.completed_dates(&habit.id);
            let done = habit_month_done(checks, year, month, &habit.id);
            HabitRow {
                id: habit.id.clone(),
                name: habit.name.clone(),
                icon: habit.display_icon().to_string(),
                reminder_enabled: habit.reminder_enabled,
                reminder_time: habit.reminder_time.clone(),
                weekly_goal: habit.weekly_goal,
                checks: (1..=dim).map(|day| checks.get(year, month, &habit.id, day)).collect(),
                done,
                percent: percentage(done, dim),
                current_streak: current_streak(&dates, reference),
                best_streak: best_streak(&dates),
                week_done: week_progress(&dates, reference),
            }
        })
        .collect();

    let weeks = calendar::compute_weeks(year, month)
        .into_iter()
        .map(|week| {
            let percent = week_percentage(checks, year, month, habits, &week);
            WeekSummary::from_week(week, percent)
        })
        .collect();

    MonthView {
        year,
        month,
        month_key: month_key(year, month),
        title: calendar::month_title(year, month),
        days_in_month: dim,
        reference_date: reference.to_string(),
        days,
        habits: rows,
        weeks,
        overall: overall(checks, year, month, habits),
    }
}
