use crate::models::Habit;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use std::{collections::HashMap, fmt, sync::Arc, time::Duration};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

pub const REMINDER_TITLE: &str = "Reminder";

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Outcome of asking the platform whether notifications may be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub habit_id: String,
    pub title: String,
    pub body: String,
    /// Repeated reminders for one habit replace each other.
    pub tag: String,
}

impl Notification {
    pub fn for_habit(habit: &Habit) -> Self {
        let body = if habit.icon.is_empty() {
            habit.name.clone()
        } else {
            format!("{} {}", habit.icon, habit.name)
        };
        Self {
            habit_id: habit.id.clone(),
            title: REMINDER_TITLE.to_string(),
            body,
            tag: format!("habit-reminder-{}", habit.id),
        }
    }
}

#[derive(Debug)]
pub struct NotifyError(pub String);

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl std::error::Error for NotifyError {}

/// System notification channel.
pub trait Notifier: Send + Sync + 'static {
    fn permission(&self) -> Permission;
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Uses the process log as the notification channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(habit = %notification.habit_id, "reminder: {}", notification.body);
        Ok(())
    }
}

/// Best-effort delivery. Never fails; anything short of a granted, working
/// channel falls back to a log line.
pub fn deliver(notifier: &dyn Notifier, notification: &Notification) {
    match notifier.permission() {
        Permission::Granted => {
            if let Err(err) = notifier.send(notification) {
                warn!(habit = %notification.habit_id, "{err}; reminder: {}", notification.body);
            }
        }
        Permission::Denied | Permission::Unsupported => {
            info!(habit = %notification.habit_id, "reminder: {}", notification.body);
        }
    }
}

/// Parses `HH:MM`. Each part falls back on its own (hour 20, minute 0) and an
/// impossible time falls back to 20:00.
pub fn parse_reminder_time(value: &str) -> NaiveTime {
    let mut parts = value.trim().splitn(2, ':');
    let hour = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(20);
    let minute = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let (hour, minute) = if hour < 24 && minute < 60 { (hour, minute) } else { (20, 0) };
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Time until the next occurrence of `time`: later today, else tomorrow.
pub fn delay_until(time: NaiveTime, now: NaiveDateTime) -> Duration {
    let mut target = now.date().and_time(time);
    if target <= now {
        target += ChronoDuration::days(1);
    }
    (target - now).to_std().unwrap_or(Duration::ZERO)
}

/// One daily timer per habit with reminders enabled.
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    timers: HashMap<String, JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            timers: HashMap::new(),
        }
    }

    pub fn armed(&self) -> usize {
        self.timers.len()
    }

    pub fn is_armed(&self, habit_id: &str) -> bool {
        self.timers.contains_key(habit_id)
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }

    /// Drops every armed timer and arms one for each enabled habit.
    pub fn reschedule(&mut self, habits: &[Habit]) {
        self.reschedule_at(habits, Local::now().naive_local());
    }

    /// Like `reschedule`, with the first occurrence measured from `now`.
    /// Later occurrences follow every 24 hours on the monotonic clock.
    pub fn reschedule_at(&mut self, habits: &[Habit], now: NaiveDateTime) {
        self.cancel_all();
        for habit in habits.iter().filter(|habit| habit.reminder_enabled) {
            let handle = self.arm(habit, now);
            self.timers.insert(habit.id.clone(), handle);
        }
        debug!(armed = self.timers.len(), "reminders scheduled");
    }

    fn arm(&self, habit: &Habit, now: NaiveDateTime) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let notification = Notification::for_habit(habit);
        let first = Instant::now() + delay_until(parse_reminder_time(&habit.reminder_time), now);
        tokio::spawn(async move {
            let mut daily = interval_at(first, DAY);
            daily.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                daily.tick().await;
                deliver(notifier.as_ref(), &notification);
            }
        })
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
