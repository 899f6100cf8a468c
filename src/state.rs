use crate::models::AppData;
use crate::reminders::{Notifier, ReminderScheduler};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub reminders: Arc<Mutex<ReminderScheduler>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            reminders: Arc::new(Mutex::new(ReminderScheduler::new(notifier))),
        }
    }

    /// Re-arms every reminder from the current habit list.
    pub async fn reschedule_reminders(&self, data: &AppData) {
        self.reminders.lock().await.reschedule(&data.habits);
    }
}
