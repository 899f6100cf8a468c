pub mod app;
pub mod calendar;
pub mod checks;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reminders;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use reminders::LogNotifier;
pub use state::AppState;
pub use storage::{load_data, persist_data, resolve_data_path};
