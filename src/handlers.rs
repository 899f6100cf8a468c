use crate::errors::AppError;
use crate::models::{
    clamp_weekly_goal, AppData, CheckRequest, Habit, HabitForm, MonthView, MoveRequest, ViewRequest,
    DEFAULT_ICON, DEFAULT_REMINDER_TIME,
};
use crate::state::AppState;
use crate::stats::build_month_view;
use crate::storage::{
    decode_import, default_data, export_file_name, new_habit_id, persist_data, remove_data,
};
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Datelike, Local};
use tracing::info;

pub async fn index() -> Html<&'static str> {
    Html(render_index())
}

pub async fn get_month(State(state): State<AppState>) -> Json<MonthView> {
    let mut data = state.data.lock().await;
    data.ensure_current_bucket();
    Json(build_month_view(&data))
}

pub async fn set_view(
    State(state): State<AppState>,
    Json(payload): Json<ViewRequest>,
) -> Result<Json<MonthView>, AppError> {
    if payload.month > 11 {
        return Err(AppError::bad_request("month must be between 0 and 11"));
    }
    if !(1..=9999).contains(&payload.year) {
        return Err(AppError::bad_request("year must be between 1 and 9999"));
    }

    let mut data = state.data.lock().await;
    data.year = payload.year;
    data.month = payload.month;
    commit(&state, &mut data, false).await
}

pub async fn view_today(State(state): State<AppState>) -> Result<Json<MonthView>, AppError> {
    let today = Local::now().date_naive();
    let mut data = state.data.lock().await;
    data.year = today.year();
    data.month = today.month0();
    commit(&state, &mut data, false).await
}

pub async fn set_check(
    State(state): State<AppState>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<MonthView>, AppError> {
    if payload.day == 0 {
        return Err(AppError::bad_request("day must be a positive integer"));
    }

    let mut data = state.data.lock().await;
    if data.habit(&payload.habit_id).is_none() {
        return Err(AppError::unknown_habit(&payload.habit_id));
    }
    data.ensure_current_bucket();
    let (year, month) = (data.year, data.month);
    data.checks
        .set(year, month, &payload.habit_id, payload.day, payload.done);
    commit(&state, &mut data, false).await
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(form): Json<HabitForm>,
) -> Result<Json<MonthView>, AppError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }

    let mut habit = Habit::new(new_habit_id(), name, form_icon(&form));
    apply_reminder_fields(&mut habit, &form);

    let mut data = state.data.lock().await;
    info!(habit = %habit.id, "adding habit '{}'", habit.name);
    data.habits.push(habit);
    commit(&state, &mut data, true).await
}

/// An empty name discards the whole edit.
pub async fn edit_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<HabitForm>,
) -> Result<Json<MonthView>, AppError> {
    let mut data = state.data.lock().await;
    let Some(habit) = data.habit_mut(&id) else {
        return Err(AppError::unknown_habit(&id));
    };

    let name = form.name.trim();
    if name.is_empty() {
        return Ok(Json(build_month_view(&data)));
    }
    habit.name = name.to_string();
    habit.icon = form_icon(&form);
    apply_reminder_fields(habit, &form);
    commit(&state, &mut data, true).await
}

/// Removes the habit from the active list; its completion history stays.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MonthView>, AppError> {
    let mut data = state.data.lock().await;
    let before = data.habits.len();
    data.habits.retain(|habit| habit.id != id);
    if data.habits.len() == before {
        return Err(AppError::unknown_habit(&id));
    }
    info!(habit = %id, "habit deleted");
    commit(&state, &mut data, true).await
}

pub async fn move_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<MonthView>, AppError> {
    let mut data = state.data.lock().await;
    let Some(from) = data.habits.iter().position(|habit| habit.id == id) else {
        return Err(AppError::unknown_habit(&id));
    };
    if payload.to >= data.habits.len() {
        return Err(AppError::bad_request("target position is out of range"));
    }
    let habit = data.habits.remove(from);
    data.habits.insert(payload.to, habit);
    commit(&state, &mut data, true).await
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state.data.lock().await;
    let payload = serde_json::to_vec_pretty(&*data).map_err(AppError::internal)?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(&data));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        payload,
    ))
}

pub async fn import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MonthView>, AppError> {
    let imported = decode_import(&body)?;
    let mut data = state.data.lock().await;
    *data = imported;
    info!(habits = data.habits.len(), "state imported");
    commit(&state, &mut data, true).await
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<MonthView>, AppError> {
    let mut data = state.data.lock().await;
    remove_data(&state.data_path).await?;
    *data = default_data();
    info!("state reset to defaults");
    commit(&state, &mut data, true).await
}

/// Writes the state through to disk and answers with the refreshed view.
async fn commit(
    state: &AppState,
    data: &mut AppData,
    reschedule: bool,
) -> Result<Json<MonthView>, AppError> {
    data.ensure_current_bucket();
    persist_data(&state.data_path, data).await?;
    if reschedule {
        state.reschedule_reminders(data).await;
    }
    Ok(Json(build_month_view(data)))
}

fn form_icon(form: &HabitForm) -> String {
    let icon = form.icon.trim();
    if icon.is_empty() { DEFAULT_ICON.to_string() } else { icon.to_string() }
}

fn apply_reminder_fields(habit: &mut Habit, form: &HabitForm) {
    if let Some(enabled) = form.reminder_enabled {
        habit.reminder_enabled = enabled;
    }
    if let Some(time) = &form.reminder_time {
        let time = time.trim();
        let time = if time.is_empty() { DEFAULT_REMINDER_TIME } else { time };
        habit.reminder_time = time.to_string();
    }
    if let Some(goal) = form.weekly_goal {
        habit.weekly_goal = clamp_weekly_goal(goal);
    }
}
