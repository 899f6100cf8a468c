use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/month", get(handlers::get_month))
        .route("/api/view", post(handlers::set_view))
        .route("/api/view/today", post(handlers::view_today))
        .route("/api/checks", post(handlers::set_check))
        .route("/api/habits", post(handlers::add_habit))
        .route(
            "/api/habits/:id",
            put(handlers::edit_habit).delete(handlers::delete_habit),
        )
        .route("/api/habits/:id/move", post(handlers::move_habit))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
