use crate::checks::{month_key, Checks};
use crate::errors::AppError;
use crate::models::{AppData, Habit};
use chrono::{Datelike, Local, NaiveDate};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};
use uuid::Uuid;

const DEFAULT_HABITS: [(&str, &str); 7] = [
    ("Wake up at 6:00", "⏰"),
    ("Gym", "🏋️"),
    ("10k steps", "🚶"),
    ("Reading / study", "📚"),
    ("No alcohol", "🚫"),
    ("Journaling", "📝"),
    ("Cold shower", "🚿"),
];

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub fn new_habit_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn default_data_at(today: NaiveDate) -> AppData {
    AppData {
        year: today.year(),
        month: today.month0(),
        habits: DEFAULT_HABITS
            .iter()
            .map(|(name, icon)| Habit::new(new_habit_id(), *name, *icon))
            .collect(),
        checks: Checks::default(),
    }
}

pub fn default_data() -> AppData {
    default_data_at(Local::now().date_naive())
}

/// Missing, unreadable or structurally invalid state is replaced with the
/// default habit set.
pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                default_data()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => default_data(),
        Err(err) => {
            error!("failed to read data file: {err}");
            default_data()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

pub async fn remove_data(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Decodes an uploaded state document. Anything that is not JSON or lacks
/// `habits`/`checks` is rejected.
pub fn decode_import(bytes: &[u8]) -> Result<AppData, AppError> {
    serde_json::from_slice(bytes).map_err(|err| {
        warn!("rejected import: {err}");
        AppError::bad_request("could not import the JSON file: expected `habits` and `checks`")
    })
}

pub fn export_file_name(data: &AppData) -> String {
    format!("habit-tracker-{}.json", month_key(data.year, data.month))
}
